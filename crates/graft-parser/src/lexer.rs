//! Lexing helpers for binding expressions.

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::satisfy,
    combinator::{map, opt, recognize},
    error::{Error, ErrorKind},
    sequence::{pair, tuple},
    IResult,
};

/// Parse an identifier (starts with letter/underscore/`$`, followed by
/// alphanumeric/underscore). `$` admits engine-provided names like `$slots`.
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// Parse an unsigned number (integer or float). Negation is handled as a
/// unary operator by the grammar.
pub fn number(input: &str) -> IResult<&str, f64> {
    map(
        recognize(tuple((
            take_while1(|c: char| c.is_ascii_digit()),
            opt(pair(
                nom::character::complete::char('.'),
                take_while1(|c: char| c.is_ascii_digit()),
            )),
        ))),
        |s: &str| s.parse().unwrap_or(0.0),
    )(input)
}

/// Parse a single- or double-quoted string literal with `\`-escapes.
///
/// Returns a hard failure (not a recoverable error) on an unterminated
/// literal so the grammar can report it distinctly.
pub fn string_literal(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    let quote = match chars.next() {
        Some((_, c @ ('\'' | '"'))) => c,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };
    let mut out = String::new();
    while let Some((i, c)) = chars.next() {
        if c == quote {
            return Ok((&input[i + c.len_utf8()..], out));
        }
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            other => out.push(other),
        }
    }
    Err(nom::Err::Failure(Error::new(input, ErrorKind::Char)))
}
