mod classes;
mod source;
pub mod text;

use std::fmt;

use classes::{
    is_ident, is_ident_start, is_non_printable, is_valid_escape, is_whitespace, starts_ident,
    starts_number,
};
pub use source::{EOF_CHAR, Location, REPLACEMENT_CHARACTER, Source, SourceError};
use TokenKind::*;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    EOF,
    COMMENTS,
    WHITESPACE,

    IDENT,
    FUNCTION,
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
    CDO,
    CDC,

    COLON,
    SEMICOLON,
    COMMA,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | COMMENTS)
    }
}

/// A token is only its kind and where it starts; text is re-read from the
/// source on demand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: Location,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LexErrorKind {
    UnterminatedComment,
    UnterminatedString,
    BadString,
    UnterminatedUrl,
    BadUrl,
    InvalidEscape,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnterminatedComment => "unterminated comment",
            Self::UnterminatedString => "unterminated string",
            Self::BadString => "newline inside a string",
            Self::UnterminatedUrl => "unterminated url",
            Self::BadUrl => "invalid character inside an unquoted url",
            Self::InvalidEscape => "backslash followed by a newline",
        })
    }
}

/// A recoverable lexical error, reported at the start of the offending token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: Location,
}

pub struct Tokenizer<'a> {
    source: Source<'a>,
    start: Location,
    errors: Vec<LexError>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: Source<'a>) -> Self {
        Self { start: source.location(), source, errors: Vec::new() }
    }

    pub fn source(&self) -> &Source<'a> {
        &self.source
    }

    pub fn location(&self) -> Location {
        self.source.location()
    }

    /// Rewinds to the start of a token already returned by `next_token`.
    pub fn seek(&mut self, location: Location) {
        self.source.seek(location);
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Consumes one token. Never fails: malformed input turns into `BAD_STRING`,
    /// `BAD_URL` or `DELIM` tokens, and `EOF` repeats forever at the end.
    pub fn next_token(&mut self) -> Token {
        self.start = self.source.location();
        let kind = self.token_kind();
        Token { kind, start: self.start }
    }

    fn error(&mut self, kind: LexErrorKind) {
        self.errors.push(LexError { kind, location: self.start });
    }

    /// Puts the cursor back on the first code point of the token.
    fn reconsume(&mut self) {
        self.source.seek(self.start);
    }

    fn token_kind(&mut self) -> TokenKind {
        match self.source.advance() {
            '\n' | '\t' | ' ' => {
                self.source.advance_while(is_whitespace);
                WHITESPACE
            }
            '"' => self.string('"'),
            '\'' => self.string('\''),
            '#' => {
                let [first, second] = self.source.peek_n::<2>();
                if is_ident(first) || is_valid_escape(first, second) {
                    let id = starts_ident(self.source.peek_n());
                    self.ident_sequence();
                    if id { HASH_ID } else { HASH_UNRESTRICTED }
                } else {
                    DELIM
                }
            }
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            ':' => COLON,
            ';' => SEMICOLON,
            first_char @ ('+' | '.') => {
                let [second, third] = self.source.peek_n::<2>();
                if starts_number([first_char, second, third]) {
                    self.reconsume();
                    self.numeric()
                } else {
                    DELIM
                }
            }
            '-' => {
                let [second, third] = self.source.peek_n::<2>();
                if starts_number(['-', second, third]) {
                    self.reconsume();
                    self.numeric()
                } else if self.source.match_literal("->") {
                    CDC
                } else if starts_ident(['-', second, third]) {
                    self.reconsume();
                    self.ident_like()
                } else {
                    DELIM
                }
            }
            '/' if self.source.peek() == '*' => self.comments(),
            '<' if self.source.match_literal("!--") => CDO,
            '@' => {
                if starts_ident(self.source.peek_n()) {
                    self.ident_sequence();
                    AT_KEYWORD
                } else {
                    DELIM
                }
            }
            '\\' => {
                if is_valid_escape('\\', self.source.peek()) {
                    self.reconsume();
                    self.ident_like()
                } else {
                    self.error(LexErrorKind::InvalidEscape);
                    DELIM
                }
            }
            '0'..='9' => {
                self.reconsume();
                self.numeric()
            }
            EOF_CHAR => EOF,
            first_char if is_ident_start(first_char) => {
                self.reconsume();
                self.ident_like()
            }
            _ => DELIM,
        }
    }

    /// Consumes a run of comments; the opening `/` is already consumed.
    fn comments(&mut self) -> TokenKind {
        loop {
            self.source.advance();
            loop {
                match self.source.advance() {
                    '*' if self.source.peek() == '/' => {
                        self.source.advance();
                        break;
                    }
                    EOF_CHAR => {
                        self.error(LexErrorKind::UnterminatedComment);
                        return COMMENTS;
                    }
                    _ => {}
                }
            }

            if self.source.peek_n::<2>() != ['/', '*'] {
                return COMMENTS;
            }
            self.source.advance();
        }
    }

    fn ident_sequence(&mut self) {
        while self.source.next_ident_char().is_some() {}
    }

    fn numeric(&mut self) -> TokenKind {
        self.number();
        let ahead = self.source.peek_n::<3>();
        if starts_ident(ahead) {
            self.ident_sequence();
            DIMENSION
        } else if ahead[0] == '%' {
            self.source.advance();
            PERCENTAGE
        } else {
            NUMBER
        }
    }

    fn number(&mut self) {
        if matches!(self.source.peek(), '+' | '-') {
            self.source.advance();
        }
        self.digits();

        let [first, second] = self.source.peek_n::<2>();
        if first == '.' && second.is_ascii_digit() {
            self.source.advance();
            self.digits();
        }

        let [first, second, third] = self.source.peek_n::<3>();
        if matches!(first, 'e' | 'E')
            && (second.is_ascii_digit() || (matches!(second, '+' | '-') && third.is_ascii_digit()))
        {
            self.source.advance();
            if !second.is_ascii_digit() {
                self.source.advance();
            }
            self.digits();
        }
    }

    fn digits(&mut self) {
        self.source.advance_while(|c| c.is_ascii_digit());
    }

    /// Ident, function or url token. `url(` followed by a quote stays a
    /// function so that the quoted argument lexes as a string.
    fn ident_like(&mut self) -> TokenKind {
        let mut url = UrlMatcher::default();
        while let Some(c) = self.source.next_ident_char() {
            url.push(c);
        }

        if self.source.peek() != '(' {
            return IDENT;
        }
        self.source.advance();
        if !url.matched() {
            return FUNCTION;
        }

        let arguments = self.source.location();
        self.source.advance_while(is_whitespace);
        if matches!(self.source.peek(), '"' | '\'') {
            self.source.seek(arguments);
            FUNCTION
        } else {
            self.url()
        }
    }

    /// Unquoted url body; `url(` and leading whitespace are already consumed.
    fn url(&mut self) -> TokenKind {
        loop {
            match self.source.advance() {
                ')' => return URL,
                EOF_CHAR => {
                    self.error(LexErrorKind::UnterminatedUrl);
                    return URL;
                }
                c if is_whitespace(c) => {
                    self.source.advance_while(is_whitespace);
                    return match self.source.peek() {
                        ')' => {
                            self.source.advance();
                            URL
                        }
                        EOF_CHAR => {
                            self.error(LexErrorKind::UnterminatedUrl);
                            URL
                        }
                        _ => self.bad_url(),
                    };
                }
                '"' | '\'' | '(' => return self.bad_url(),
                '\\' if is_valid_escape('\\', self.source.peek()) => {
                    self.source.consume_escape();
                }
                c if c == '\\' || is_non_printable(c) => return self.bad_url(),
                _ => {}
            }
        }
    }

    /// Skips to the next unescaped `)` or the end of input.
    fn bad_url(&mut self) -> TokenKind {
        self.error(LexErrorKind::BadUrl);
        loop {
            match self.source.advance() {
                ')' | EOF_CHAR => return BAD_URL,
                '\\' if is_valid_escape('\\', self.source.peek()) => {
                    self.source.consume_escape();
                }
                _ => {}
            }
        }
    }

    fn string(&mut self, quote: char) -> TokenKind {
        loop {
            let before = self.source.location();
            match self.source.advance() {
                c if c == quote => return STRING,
                EOF_CHAR => {
                    self.error(LexErrorKind::UnterminatedString);
                    return STRING;
                }
                '\n' => {
                    self.source.seek(before);
                    self.error(LexErrorKind::BadString);
                    return BAD_STRING;
                }
                '\\' => match self.source.peek() {
                    EOF_CHAR => {}
                    '\n' => {
                        self.source.advance();
                    }
                    _ => {
                        self.source.consume_escape();
                    }
                },
                _ => {}
            }
        }
    }
}

/// Tracks whether an ident sequence spells `url`, ignoring ASCII case.
#[derive(Default)]
struct UrlMatcher {
    matched: u8,
    failed: bool,
}

impl UrlMatcher {
    const KEYWORD: [char; 3] = ['u', 'r', 'l'];

    fn push(&mut self, c: char) {
        match Self::KEYWORD.get(self.matched as usize) {
            Some(expected) if !self.failed && c.eq_ignore_ascii_case(expected) => {
                self.matched += 1;
            }
            _ => self.failed = true,
        }
    }

    fn matched(&self) -> bool {
        !self.failed && self.matched as usize == Self::KEYWORD.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(text: &str) -> Vec<(TokenKind, &str)> {
        let source = Source::new(text).unwrap();
        let mut tokenizer = Tokenizer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token();
            if token.kind == EOF {
                break;
            }
            tokens.push((token.kind, source.slice(token.start, tokenizer.location())));
        }
        tokens
    }

    fn single(text: &str) -> TokenKind {
        match tokenize(text).as_slice() {
            [(kind, lexeme)] => {
                assert_eq!(*lexeme, text, "token did not span the whole input");
                *kind
            }
            tokens => panic!("expected one token for {text:?}, got {tokens:?}"),
        }
    }

    #[test]
    fn numeric_tokens() {
        let inputs = vec![
            ("5", NUMBER),
            ("-5", NUMBER),
            ("+.5", NUMBER),
            (".5", NUMBER),
            ("1.5e3", NUMBER),
            ("1e-3", NUMBER),
            ("5%", PERCENTAGE),
            ("-0.5%", PERCENTAGE),
            ("5px", DIMENSION),
            ("1em", DIMENSION),
            ("1e3px", DIMENSION),
            ("5-a", DIMENSION),
            ("5\\41", DIMENSION),
        ];

        for (input, expected_kind) in inputs {
            assert_eq!(single(input), expected_kind, "Input: '{}'", input);
        }
    }

    #[test]
    fn ident_like_tokens() {
        let inputs = vec![
            ("-weird", IDENT),
            ("--custom", IDENT),
            ("_a1", IDENT),
            ("\\41 b", IDENT),
            ("rgb(", FUNCTION),
            ("@media", AT_KEYWORD),
            ("@-x", AT_KEYWORD),
            ("#fff", HASH_ID),
            ("#123", HASH_UNRESTRICTED),
            ("#-", HASH_UNRESTRICTED),
            ("url(abc)", URL),
            ("URL(a\\)b)", URL),
            ("u\\72l(x)", URL),
            ("url(  abc  )", URL),
            ("url(a\"b)", BAD_URL),
            ("url(a b)", BAD_URL),
        ];

        for (input, expected_kind) in inputs {
            assert_eq!(single(input), expected_kind, "Input: '{}'", input);
        }
    }

    #[test]
    fn delimiters() {
        let inputs = vec![".", "+", "-", "@", "#", "<", "/", "*", "!", "\\\n"];
        for input in inputs {
            let kind = tokenize(input)[0].0;
            assert_eq!(kind, DELIM, "Input: '{}'", input);
        }
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            tokenize("<!-- --> :;,[](){}"),
            vec![
                (CDO, "<!--"),
                (WHITESPACE, " "),
                (CDC, "-->"),
                (WHITESPACE, " "),
                (COLON, ":"),
                (SEMICOLON, ";"),
                (COMMA, ","),
                (LEFT_BRACKET, "["),
                (RIGHT_BRACKET, "]"),
                (LEFT_PAREN, "("),
                (RIGHT_PAREN, ")"),
                (LEFT_BRACE, "{"),
                (RIGHT_BRACE, "}"),
            ]
        );
    }

    #[test]
    fn quoted_url_is_a_function() {
        assert_eq!(
            tokenize("url( \"abc\" )"),
            vec![
                (FUNCTION, "url("),
                (WHITESPACE, " "),
                (STRING, "\"abc\""),
                (WHITESPACE, " "),
                (RIGHT_PAREN, ")"),
            ]
        );
    }

    #[test]
    fn strings() {
        assert_eq!(single("'a\\'b'"), STRING);
        assert_eq!(single("\"a\\\nb\""), STRING);
        assert_eq!(single("\"unterminated"), STRING);
        assert_eq!(
            tokenize("\"ab\ncd\""),
            vec![(BAD_STRING, "\"ab"), (WHITESPACE, "\n"), (IDENT, "cd"), (STRING, "\"")]
        );
    }

    #[test]
    fn comments_collapse_into_one_token() {
        assert_eq!(
            tokenize("a/* x *//**/ b/* open"),
            vec![
                (IDENT, "a"),
                (COMMENTS, "/* x *//**/"),
                (WHITESPACE, " "),
                (IDENT, "b"),
                (COMMENTS, "/* open"),
            ]
        );
    }

    #[test]
    fn lexical_errors_are_recorded() {
        let source = Source::new("url(a b) 'x\n /*").unwrap();
        let mut tokenizer = Tokenizer::new(source);
        while tokenizer.next_token().kind != EOF {}
        let kinds: Vec<_> = tokenizer.errors().iter().map(|error| error.kind).collect();
        assert_eq!(
            kinds,
            [LexErrorKind::BadUrl, LexErrorKind::BadString, LexErrorKind::UnterminatedComment]
        );
        assert_eq!(tokenizer.errors()[1].location, Location::new(9));
    }

    #[test]
    fn eof_repeats() {
        let source = Source::new("").unwrap();
        let mut tokenizer = Tokenizer::new(source);
        assert_eq!(tokenizer.next_token().kind, EOF);
        assert_eq!(tokenizer.next_token().kind, EOF);
    }

    #[test]
    fn total_over_ascii() {
        let text: String = (0u8..128).map(char::from).collect();
        for start in 0..text.len() {
            let source = Source::new(&text[start..]).unwrap();
            let mut tokenizer = Tokenizer::new(source);
            let mut previous = tokenizer.location();
            loop {
                let token = tokenizer.next_token();
                if token.kind == EOF {
                    break;
                }
                assert!(tokenizer.location() > previous, "no progress at {previous:?}");
                previous = tokenizer.location();
            }
        }
    }
}
