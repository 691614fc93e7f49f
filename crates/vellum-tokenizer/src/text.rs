//! Re-reading token text from the source, given only a token's start.

use text_size::TextRange;

use crate::classes::is_whitespace;
use crate::{EOF_CHAR, Location, Source, TokenKind, Tokenizer};

/// Decoded code points of an ident sequence.
#[derive(Clone, Debug)]
pub struct IdentChars<'a> {
    source: Source<'a>,
}

impl<'a> IdentChars<'a> {
    pub fn new(source: &Source<'a>, location: Location) -> Self {
        Self { source: source.at(location) }
    }
}

impl Iterator for IdentChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.next_ident_char()
    }
}

/// Decoded contents of a string token, `location` being the opening quote.
#[derive(Clone, Debug)]
pub struct StringChars<'a> {
    source: Source<'a>,
    quote: char,
    done: bool,
}

impl<'a> StringChars<'a> {
    pub fn new(source: &Source<'a>, location: Location) -> Self {
        let mut source = source.at(location);
        let quote = source.advance();
        Self { source, quote, done: false }
    }
}

impl Iterator for StringChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.source.advance() {
                c if c == self.quote => self.done = true,
                EOF_CHAR | '\n' => self.done = true,
                '\\' => match self.source.peek() {
                    EOF_CHAR => self.done = true,
                    '\n' => {
                        self.source.advance();
                    }
                    _ => return Some(self.source.consume_escape()),
                },
                c => return Some(c),
            }
        }
        None
    }
}

/// Decoded contents of an unquoted url token, `location` being the start of
/// its `url(` prefix.
#[derive(Clone, Debug)]
pub struct UrlChars<'a> {
    source: Source<'a>,
    done: bool,
}

impl<'a> UrlChars<'a> {
    pub fn new(source: &Source<'a>, location: Location) -> Self {
        let mut source = source.at(location);
        while source.next_ident_char().is_some() {}
        source.advance();
        source.advance_while(is_whitespace);
        Self { source, done: false }
    }
}

impl Iterator for UrlChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.advance() {
            '\\' => Some(self.source.consume_escape()),
            c if c == ')' || c == EOF_CHAR || is_whitespace(c) => {
                self.done = true;
                None
            }
            c => Some(c),
        }
    }
}

/// The decoded value of a token: the name of an ident, function, at-keyword
/// or hash, the contents of a string or url, or the code point of a delimiter.
/// `None` for every other kind.
pub fn token_text(source: &Source<'_>, kind: TokenKind, location: Location) -> Option<String> {
    let text = match kind {
        TokenKind::IDENT | TokenKind::FUNCTION => IdentChars::new(source, location).collect(),
        TokenKind::AT_KEYWORD | TokenKind::HASH_ID | TokenKind::HASH_UNRESTRICTED => {
            let mut source = source.at(location);
            source.advance();
            IdentChars::new(&source, source.location()).collect()
        }
        TokenKind::STRING | TokenKind::BAD_STRING => StringChars::new(source, location).collect(),
        TokenKind::URL => UrlChars::new(source, location).collect(),
        TokenKind::DELIM => source.at(location).advance().to_string(),
        _ => return None,
    };
    Some(text)
}

/// Re-lexes the token starting at `location` to find where it ends.
pub fn token_range(source: &Source<'_>, location: Location) -> TextRange {
    let mut tokenizer = Tokenizer::new(source.at(location));
    tokenizer.next_token();
    TextRange::new(location.offset(), tokenizer.location().offset())
}
