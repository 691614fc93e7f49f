use text_size::TextSize;

use crate::classes::{is_ident, is_valid_escape, is_whitespace};

/// Returned by `Source::advance` at the end of input. Real NULs are replaced
/// before they reach the tokenizer, so the sentinel never collides with input.
pub const EOF_CHAR: char = '\0';
pub const REPLACEMENT_CHARACTER: char = '\u{fffd}';

/// Offset of a code point in the original input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location(TextSize);

impl Location {
    pub const START: Self = Self(TextSize::new(0));

    pub fn new(offset: u32) -> Self {
        Self(TextSize::new(offset))
    }

    pub fn offset(self) -> TextSize {
        self.0
    }
}

impl From<Location> for TextSize {
    fn from(location: Location) -> Self {
        location.0
    }
}

impl From<Location> for usize {
    fn from(location: Location) -> Self {
        location.0.into()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("byte {byte:#04x} at offset {offset} is not 7-bit ASCII")]
    NonAscii { offset: usize, byte: u8 },
    #[error("input of {len} bytes does not fit a 32-bit offset")]
    TooLong { len: usize },
}

/// Cursor over 7-bit input that hands out preprocessed code points.
///
/// CR, CRLF and FF read as a single LF and NUL reads as U+FFFD. The cursor is
/// `Copy`, so lookahead is done on a copy and backtracking with `seek`.
#[derive(Clone, Copy, Debug)]
pub struct Source<'a> {
    text: &'a str,
    position: u32,
}

impl<'a> Source<'a> {
    pub fn new(text: &'a str) -> Result<Self, SourceError> {
        if let Some(offset) = text.bytes().position(|byte| !byte.is_ascii()) {
            return Err(SourceError::NonAscii { offset, byte: text.as_bytes()[offset] });
        }
        if u32::try_from(text.len()).is_err() {
            return Err(SourceError::TooLong { len: text.len() });
        }
        Ok(Self { text, position: 0 })
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn location(&self) -> Location {
        Location::new(self.position)
    }

    /// Moves the cursor to a location previously returned by `location`.
    pub fn seek(&mut self, location: Location) {
        debug_assert!(usize::from(location) <= self.text.len());
        self.position = location.offset().into();
    }

    /// A copy of this source positioned at `location`.
    pub fn at(&self, location: Location) -> Self {
        let mut source = *self;
        source.seek(location);
        source
    }

    pub fn is_eof(&self) -> bool {
        self.position as usize >= self.text.len()
    }

    /// Raw input between two locations.
    pub fn slice(&self, start: Location, end: Location) -> &'a str {
        &self.text[usize::from(start)..usize::from(end)]
    }

    fn byte_at(&self, position: u32) -> Option<u8> {
        self.text.as_bytes().get(position as usize).copied()
    }

    /// Consumes the next code point, or returns `EOF_CHAR` without moving.
    pub fn advance(&mut self) -> char {
        let Some(byte) = self.byte_at(self.position) else {
            return EOF_CHAR;
        };
        self.position += 1;
        match byte {
            b'\r' => {
                if self.byte_at(self.position) == Some(b'\n') {
                    self.position += 1;
                }
                '\n'
            }
            b'\x0c' => '\n',
            b'\0' => REPLACEMENT_CHARACTER,
            _ => byte as char,
        }
    }

    pub fn peek(&self) -> char {
        let mut ahead = *self;
        ahead.advance()
    }

    pub fn peek_n<const N: usize>(&self) -> [char; N] {
        let mut ahead = *self;
        std::array::from_fn(|_| ahead.advance())
    }

    pub fn advance_while(&mut self, f: impl Fn(char) -> bool) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }

    /// Consumes `literal` if the raw input continues with it.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.text.as_bytes()[self.position as usize..].starts_with(literal.as_bytes()) {
            self.position += literal.len() as u32;
            true
        } else {
            false
        }
    }

    /// Consumes an ident sequence spelling `keyword`, ignoring ASCII case and
    /// decoding escapes. On failure nothing is consumed.
    pub fn match_keyword(&mut self, keyword: &str) -> bool {
        let start = self.location();
        let matched = keyword.chars().all(|expected| {
            self.next_ident_char().is_some_and(|c| c.eq_ignore_ascii_case(&expected))
        });
        let [first, second] = self.peek_n::<2>();
        if matched && !is_ident(first) && !is_valid_escape(first, second) {
            true
        } else {
            self.seek(start);
            false
        }
    }

    /// Consumes one code point of an ident sequence, decoding an escape if
    /// there is one. Returns `None`, consuming nothing, where the sequence ends.
    pub fn next_ident_char(&mut self) -> Option<char> {
        let [first, second] = self.peek_n::<2>();
        if is_ident(first) {
            self.advance();
            Some(first)
        } else if is_valid_escape(first, second) {
            self.advance();
            Some(self.consume_escape())
        } else {
            None
        }
    }

    /// Consumes an escape sequence whose backslash is already consumed.
    pub fn consume_escape(&mut self) -> char {
        let first = self.advance();
        let Some(mut value) = first.to_digit(16) else {
            return if first == EOF_CHAR { REPLACEMENT_CHARACTER } else { first };
        };

        for _ in 0..5 {
            let Some(digit) = self.peek().to_digit(16) else { break };
            self.advance();
            value = value * 16 + digit;
        }
        if is_whitespace(self.peek()) {
            self.advance();
        }

        match char::from_u32(value) {
            Some(c) if value != 0 => c,
            _ => REPLACEMENT_CHARACTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> String {
        let mut source = Source::new(text).unwrap();
        std::iter::from_fn(|| Some(source.advance()).filter(|&c| c != EOF_CHAR)).collect()
    }

    #[test]
    fn preprocessing() {
        assert_eq!(chars("a\r\nb\rc\x0cd"), "a\nb\nc\nd");
        assert_eq!(chars("\0x"), "\u{fffd}x");
        assert_eq!(chars("\r\r\n"), "\n\n");
    }

    #[test]
    fn rejects_8_bit_input() {
        assert!(matches!(Source::new("ab\u{e9}"), Err(SourceError::NonAscii { offset: 2, .. })));
    }

    #[test]
    fn seek_backtracks() {
        let mut source = Source::new("abc").unwrap();
        source.advance();
        let location = source.location();
        assert_eq!(source.peek_n::<3>(), ['b', 'c', EOF_CHAR]);
        source.advance();
        source.advance();
        assert!(source.is_eof());
        assert_eq!(source.advance(), EOF_CHAR);
        source.seek(location);
        assert_eq!(source.advance(), 'b');
    }

    #[test]
    fn escapes() {
        let escape = |text: &str| {
            let mut source = Source::new(text).unwrap();
            let c = source.consume_escape();
            (c, usize::from(source.location()))
        };
        assert_eq!(escape("41 b"), ('A', 3));
        assert_eq!(escape("41\r\nb"), ('A', 4));
        assert_eq!(escape("000041b"), ('A', 6));
        assert_eq!(escape("0"), (REPLACEMENT_CHARACTER, 1));
        assert_eq!(escape("d800"), (REPLACEMENT_CHARACTER, 4));
        assert_eq!(escape("110000"), (REPLACEMENT_CHARACTER, 6));
        assert_eq!(escape("g"), ('g', 1));
        assert_eq!(escape(""), (REPLACEMENT_CHARACTER, 0));
    }

    #[test]
    fn keywords() {
        let mut source = Source::new("URL(").unwrap();
        assert!(source.match_keyword("url"));
        assert_eq!(source.peek(), '(');

        let mut source = Source::new("u\\72 l").unwrap();
        assert!(source.match_keyword("url"));
        assert!(source.is_eof());

        let mut source = Source::new("urls").unwrap();
        assert!(!source.match_keyword("url"));
        assert_eq!(source.location(), Location::START);

        let mut source = Source::new("ur").unwrap();
        assert!(!source.match_keyword("url"));
        assert_eq!(source.location(), Location::START);
    }

    #[test]
    fn literals() {
        let mut source = Source::new("<!-- x").unwrap();
        assert!(!source.match_literal("-->"));
        assert!(source.match_literal("<!--"));
        assert_eq!(source.advance(), ' ');
    }
}
