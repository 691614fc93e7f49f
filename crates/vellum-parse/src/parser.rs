use vellum_errors::Diagnostic;
use vellum_skip_tree::Builder;
use vellum_syntax::{Component, ComponentKind, ComponentTree};
use vellum_tokenizer::text::token_range;
use vellum_tokenizer::{Location, Source, Token, TokenKind, Tokenizer};

use crate::{Error, ListKind, Parse};

/// One suspended consumer. Every frame owns the innermost open node of the
/// builder, so the two stacks always have the same depth.
#[derive(Clone, Copy, Debug)]
enum Frame {
    RuleList { top_level: bool },
    AtRule { start: Location },
    QualifiedRule { start: Location },
    /// `attached` blocks belong to the rule right below them and close it.
    SimpleBlock { start: Location, closer: TokenKind, attached: bool },
    Function { start: Location },
}

/// Builds a component tree without recursion: nesting lives on `stack`, and
/// each turn of the loop feeds a single token to the innermost frame.
pub(crate) struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    builder: Builder<Component, u32>,
    stack: Vec<Frame>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: Source<'a>) -> Self {
        Self {
            tokenizer: Tokenizer::new(source),
            builder: Builder::new(),
            stack: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, kind: ListKind) -> Result<Parse, Error> {
        let start = self.tokenizer.location();
        self.push(
            Frame::RuleList { top_level: kind == ListKind::TopLevel },
            Component::new(ComponentKind::RULE_LIST, start),
        )?;

        while let Some(&frame) = self.stack.last() {
            let token = self.next_token();
            match frame {
                Frame::RuleList { top_level } => self.rule_list(token, top_level)?,
                Frame::AtRule { start } => self.at_rule(token, start)?,
                Frame::QualifiedRule { start } => self.qualified_rule(token, start)?,
                Frame::SimpleBlock { start, closer, attached } => {
                    self.simple_block(token, start, closer, attached)?;
                }
                Frame::Function { start } => self.function(token, start)?,
            }
        }

        Ok(self.finish())
    }

    fn next_token(&mut self) -> Token {
        loop {
            let token = self.tokenizer.next_token();
            if token.kind != TokenKind::COMMENTS {
                return token;
            }
        }
    }

    fn rule_list(&mut self, token: Token, top_level: bool) -> Result<(), Error> {
        match token.kind {
            TokenKind::WHITESPACE => {}
            TokenKind::EOF => self.pop(),
            TokenKind::CDO | TokenKind::CDC if top_level => {}
            TokenKind::AT_KEYWORD => self.push(
                Frame::AtRule { start: token.start },
                Component::new(ComponentKind::AT_RULE, token.start),
            )?,
            _ => {
                // The token opens the prelude; hand it back to the new rule.
                self.tokenizer.seek(token.start);
                self.push(
                    Frame::QualifiedRule { start: token.start },
                    Component::new(ComponentKind::QUALIFIED_RULE, token.start),
                )?;
            }
        }
        Ok(())
    }

    fn at_rule(&mut self, token: Token, start: Location) -> Result<(), Error> {
        match token.kind {
            TokenKind::SEMICOLON => self.pop(),
            TokenKind::EOF => {
                self.error(start, "at-rule is not closed by `;` or a block");
                self.pop();
            }
            TokenKind::LEFT_BRACE => self.open_block(token, true)?,
            _ => self.component_value(token)?,
        }
        Ok(())
    }

    fn qualified_rule(&mut self, token: Token, start: Location) -> Result<(), Error> {
        match token.kind {
            TokenKind::EOF => {
                self.error(start, "qualified rule has no block");
                tracing::trace!(offset = u32::from(start.offset()), "discarding qualified rule");
                self.stack.pop();
                self.builder.abandon_node();
            }
            TokenKind::LEFT_BRACE => self.open_block(token, true)?,
            _ => self.component_value(token)?,
        }
        Ok(())
    }

    fn simple_block(
        &mut self,
        token: Token,
        start: Location,
        closer: TokenKind,
        attached: bool,
    ) -> Result<(), Error> {
        if token.kind == closer {
            self.close_block(attached);
        } else if token.kind == TokenKind::EOF {
            let message = match closer {
                TokenKind::RIGHT_BRACE => "unclosed `{`",
                TokenKind::RIGHT_BRACKET => "unclosed `[`",
                _ => "unclosed `(`",
            };
            self.error(start, message);
            self.close_block(attached);
        } else {
            self.component_value(token)?;
        }
        Ok(())
    }

    fn function(&mut self, token: Token, start: Location) -> Result<(), Error> {
        match token.kind {
            TokenKind::RIGHT_PAREN => self.pop(),
            TokenKind::EOF => {
                self.error(start, "unclosed function");
                self.pop();
            }
            _ => self.component_value(token)?,
        }
        Ok(())
    }

    fn component_value(&mut self, token: Token) -> Result<(), Error> {
        match token.kind {
            TokenKind::LEFT_BRACE | TokenKind::LEFT_BRACKET | TokenKind::LEFT_PAREN => {
                self.open_block(token, false)
            }
            TokenKind::FUNCTION => self.push(
                Frame::Function { start: token.start },
                Component::new(ComponentKind::FUNCTION, token.start),
            ),
            kind => {
                let Some(kind) = ComponentKind::from_token(kind) else {
                    unreachable!("{kind:?} is consumed by every frame")
                };
                self.builder.leaf(Component::new(kind, token.start))?;
                Ok(())
            }
        }
    }

    fn open_block(&mut self, token: Token, attached: bool) -> Result<(), Error> {
        let (kind, closer) = match token.kind {
            TokenKind::LEFT_BRACE => (ComponentKind::SIMPLE_BLOCK_CURLY, TokenKind::RIGHT_BRACE),
            TokenKind::LEFT_BRACKET => {
                (ComponentKind::SIMPLE_BLOCK_BRACKET, TokenKind::RIGHT_BRACKET)
            }
            TokenKind::LEFT_PAREN => (ComponentKind::SIMPLE_BLOCK_PAREN, TokenKind::RIGHT_PAREN),
            kind => unreachable!("{kind:?} does not open a block"),
        };
        self.push(
            Frame::SimpleBlock { start: token.start, closer, attached },
            Component::new(kind, token.start),
        )
    }

    /// Closes a block and, when it is a rule's block, the rule as well.
    fn close_block(&mut self, attached: bool) {
        self.stack.pop();
        let block = self.builder.finish_node();
        if attached {
            self.stack.pop();
            let rule = self.builder.finish_node();
            self.builder.value_mut(rule).extra = block - rule;
        }
    }

    fn push(&mut self, frame: Frame, component: Component) -> Result<(), Error> {
        self.builder.start_node(component)?;
        self.stack.push(frame);
        Ok(())
    }

    fn pop(&mut self) {
        self.stack.pop();
        self.builder.finish_node();
    }

    fn error(&mut self, location: Location, message: &str) {
        let range = token_range(self.tokenizer.source(), location);
        self.diagnostics.push(Diagnostic::error(message, range));
    }

    fn finish(mut self) -> Parse {
        // A prelude token handed back by `rule_list` is lexed twice.
        let mut lex_errors = self.tokenizer.take_errors();
        lex_errors.sort_by_key(|error| (error.location, error.kind as u8));
        lex_errors.dedup();

        let source = *self.tokenizer.source();
        self.diagnostics.extend(lex_errors.into_iter().map(|error| {
            Diagnostic::error(error.kind.to_string(), token_range(&source, error.location))
        }));
        self.diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());

        Parse { tree: ComponentTree::new(self.builder.finish()), diagnostics: self.diagnostics }
    }
}
