use crate::EOF_CHAR;

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ')
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

pub(crate) fn is_ident(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '-'
}

pub(crate) fn is_non_printable(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{e}'..='\u{1f}' | '\u{7f}')
}

/// A backslash not followed by a newline. End of input still counts.
pub(crate) fn is_valid_escape(first: char, second: char) -> bool {
    first == '\\' && second != '\n'
}

pub(crate) fn starts_ident([first, second, third]: [char; 3]) -> bool {
    match first {
        '-' => is_ident_start(second) || second == '-' || is_valid_escape(second, third),
        '\\' => is_valid_escape(first, second),
        EOF_CHAR => false,
        _ => is_ident_start(first),
    }
}

pub(crate) fn starts_number([first, second, third]: [char; 3]) -> bool {
    match first {
        '+' | '-' => second.is_ascii_digit() || (second == '.' && third.is_ascii_digit()),
        '.' => second.is_ascii_digit(),
        _ => first.is_ascii_digit(),
    }
}
