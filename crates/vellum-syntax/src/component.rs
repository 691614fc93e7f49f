use vellum_tokenizer::{Location, TokenKind};

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ComponentKind {
    IDENT,
    AT_KEYWORD,
    HASH_UNRESTRICTED,
    HASH_ID,
    STRING,
    BAD_STRING,
    URL,
    BAD_URL,
    DELIM,
    NUMBER,
    PERCENTAGE,
    DIMENSION,
    WHITESPACE,
    CDO,
    CDC,
    COLON,
    SEMICOLON,
    COMMA,
    RIGHT_BRACKET,
    RIGHT_PAREN,
    RIGHT_BRACE,

    RULE_LIST,
    AT_RULE,
    QUALIFIED_RULE,
    FUNCTION,
    SIMPLE_BLOCK_CURLY,
    SIMPLE_BLOCK_BRACKET,
    SIMPLE_BLOCK_PAREN,
}

impl ComponentKind {
    /// The leaf kind preserving a token, if the token is kept as-is.
    ///
    /// Openers, function names, comments and end of input have no leaf kind:
    /// they either start a composite or never reach the tree.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let kind = match kind {
            TokenKind::IDENT => Self::IDENT,
            TokenKind::AT_KEYWORD => Self::AT_KEYWORD,
            TokenKind::HASH_UNRESTRICTED => Self::HASH_UNRESTRICTED,
            TokenKind::HASH_ID => Self::HASH_ID,
            TokenKind::STRING => Self::STRING,
            TokenKind::BAD_STRING => Self::BAD_STRING,
            TokenKind::URL => Self::URL,
            TokenKind::BAD_URL => Self::BAD_URL,
            TokenKind::DELIM => Self::DELIM,
            TokenKind::NUMBER => Self::NUMBER,
            TokenKind::PERCENTAGE => Self::PERCENTAGE,
            TokenKind::DIMENSION => Self::DIMENSION,
            TokenKind::WHITESPACE => Self::WHITESPACE,
            TokenKind::CDO => Self::CDO,
            TokenKind::CDC => Self::CDC,
            TokenKind::COLON => Self::COLON,
            TokenKind::SEMICOLON => Self::SEMICOLON,
            TokenKind::COMMA => Self::COMMA,
            TokenKind::RIGHT_BRACKET => Self::RIGHT_BRACKET,
            TokenKind::RIGHT_PAREN => Self::RIGHT_PAREN,
            TokenKind::RIGHT_BRACE => Self::RIGHT_BRACE,
            TokenKind::EOF
            | TokenKind::COMMENTS
            | TokenKind::FUNCTION
            | TokenKind::LEFT_BRACKET
            | TokenKind::LEFT_PAREN
            | TokenKind::LEFT_BRACE => return None,
        };
        Some(kind)
    }

    /// The token found at this component's location.
    pub fn token_kind(self) -> Option<TokenKind> {
        let kind = match self {
            Self::IDENT => TokenKind::IDENT,
            Self::AT_KEYWORD | Self::AT_RULE => TokenKind::AT_KEYWORD,
            Self::HASH_UNRESTRICTED => TokenKind::HASH_UNRESTRICTED,
            Self::HASH_ID => TokenKind::HASH_ID,
            Self::STRING => TokenKind::STRING,
            Self::BAD_STRING => TokenKind::BAD_STRING,
            Self::URL => TokenKind::URL,
            Self::BAD_URL => TokenKind::BAD_URL,
            Self::DELIM => TokenKind::DELIM,
            Self::NUMBER => TokenKind::NUMBER,
            Self::PERCENTAGE => TokenKind::PERCENTAGE,
            Self::DIMENSION => TokenKind::DIMENSION,
            Self::WHITESPACE => TokenKind::WHITESPACE,
            Self::CDO => TokenKind::CDO,
            Self::CDC => TokenKind::CDC,
            Self::COLON => TokenKind::COLON,
            Self::SEMICOLON => TokenKind::SEMICOLON,
            Self::COMMA => TokenKind::COMMA,
            Self::RIGHT_BRACKET => TokenKind::RIGHT_BRACKET,
            Self::RIGHT_PAREN => TokenKind::RIGHT_PAREN,
            Self::RIGHT_BRACE => TokenKind::RIGHT_BRACE,
            Self::FUNCTION => TokenKind::FUNCTION,
            Self::SIMPLE_BLOCK_CURLY => TokenKind::LEFT_BRACE,
            Self::SIMPLE_BLOCK_BRACKET => TokenKind::LEFT_BRACKET,
            Self::SIMPLE_BLOCK_PAREN => TokenKind::LEFT_PAREN,
            Self::RULE_LIST | Self::QUALIFIED_RULE => return None,
        };
        Some(kind)
    }

    pub fn is_composite(self) -> bool {
        matches!(
            self,
            Self::RULE_LIST
                | Self::AT_RULE
                | Self::QUALIFIED_RULE
                | Self::FUNCTION
                | Self::SIMPLE_BLOCK_CURLY
                | Self::SIMPLE_BLOCK_BRACKET
                | Self::SIMPLE_BLOCK_PAREN
        )
    }

    pub fn is_rule(self) -> bool {
        matches!(self, Self::AT_RULE | Self::QUALIFIED_RULE)
    }
}

/// One slot of the component tree; its skip lives in the tree itself.
///
/// `extra` is zero except on rules that own a `{}` block, where it is the
/// offset from the rule's slot to the block's slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    pub location: Location,
    pub extra: u32,
}

impl Component {
    pub fn new(kind: ComponentKind, location: Location) -> Self {
        Self { kind, location, extra: 0 }
    }
}
