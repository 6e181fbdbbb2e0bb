//! nom-based tokenizer for normalized TecSql text.
//!
//! The lexer is total: every non-space character belongs to some token, with a
//! single-character `Symbol` as the fallback, so `tokenize` always terminates
//! and never fails. Structural problems (an unterminated literal, an unmapped
//! marker) surface later, in the resolver.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while, take_while1},
    character::complete::{char, one_of, satisfy},
    combinator::{map, opt, recognize, rest},
    multi::many0,
    sequence::{pair, preceded},
    IResult, Parser,
};

use super::token::{Keyword, Token};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Quoted literal: `'...'` with `''` as an escaped quote. An unterminated
/// literal consumes the remainder of the input.
fn string_literal(input: &str) -> IResult<&str, Token> {
    let body = (
        take_till(|c| c == '\''),
        many0(pair(tag("''"), take_till(|c| c == '\''))),
    );
    map(
        alt((
            recognize((char('\''), body, char('\''))),
            recognize((char('\''), rest)),
        )),
        |s: &str| Token::String(s.to_string()),
    )
    .parse(input)
}

/// `?` followed by an optional `!` and a run of word characters.
fn parameter_marker(input: &str) -> IResult<&str, Token> {
    map(
        recognize((char('?'), opt(char('!')), take_while(is_word_char))),
        |s: &str| Token::Param(s.to_string()),
    )
    .parse(input)
}

/// `$table`, `$table.field` or `$table.*`.
fn logical_marker(input: &str) -> IResult<&str, Token> {
    map(
        pair(
            recognize(pair(char('$'), take_while(is_word_char))),
            opt(preceded(char('.'), alt((tag("*"), take_while1(is_word_char))))),
        ),
        |(table, suffix): (&str, Option<&str>)| match suffix {
            Some("*") => Token::TableStar {
                text: format!("{table}.*"),
                table: table.to_string(),
            },
            Some(field) => Token::LogicalField {
                text: format!("{table}.{field}"),
                table: table.to_string(),
                field: field.to_string(),
            },
            None => Token::LogicalName(table.to_string()),
        },
    )
    .parse(input)
}

/// Legacy `#` operators: `#` plus a letters-only run (e.g. `#LIKE`) or a
/// comparison character optionally followed by `=`. A lone `#` falls through
/// to the symbol rule.
fn legacy_operator(input: &str) -> IResult<&str, Token> {
    map(
        recognize(preceded(
            char('#'),
            alt((
                take_while1(|c: char| c.is_alphabetic()),
                recognize((one_of("=<>!"), opt(char('=')))),
            )),
        )),
        |s: &str| Token::Operator(s.to_string()),
    )
    .parse(input)
}

/// The fixed two-character operator set, lexed greedily before the
/// single-character symbol fallback.
fn two_char_operator(input: &str) -> IResult<&str, Token> {
    map(
        alt((tag(">="), tag("<="), tag("<>"), tag("!="), tag("=="), tag("||"))),
        |s: &str| Token::Operator(s.to_string()),
    )
    .parse(input)
}

/// Identifier or reserved word: a letter-or-underscore start, then word chars.
fn word(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(
            satisfy(|c| c.is_alphabetic() || c == '_'),
            take_while(is_word_char),
        )),
        |s: &str| match Keyword::from_ident(s) {
            Some(kw) => Token::Keyword {
                kw,
                text: s.to_string(),
            },
            None => Token::Ident(s.to_string()),
        },
    )
    .parse(input)
}

/// Digit run, dots included; multiple dots are not validated here.
fn number(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_digit()),
            take_while(|c: char| c.is_ascii_digit() || c == '.'),
        )),
        |s: &str| Token::Number(s.to_string()),
    )
    .parse(input)
}

fn symbol(input: &str) -> IResult<&str, Token> {
    map(satisfy(|c| !c.is_whitespace()), |c| {
        Token::Symbol(c.to_string())
    })
    .parse(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        string_literal,
        parameter_marker,
        logical_marker,
        legacy_operator,
        two_char_operator,
        word,
        number,
        symbol,
    ))
    .parse(input)
}

/// Tokenize normalized query text. Whitespace separates tokens and is never
/// itself a token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut remaining = input.trim_start();
    while !remaining.is_empty() {
        match token(remaining) {
            Ok((rest, tok)) => {
                tokens.push(tok);
                remaining = rest.trim_start();
            }
            Err(_) => {
                // The symbol fallback makes this unreachable for valid UTF-8,
                // but skipping one character keeps the loop finite regardless.
                let mut chars = remaining.chars();
                chars.next();
                remaining = chars.as_str().trim_start();
            }
        }
    }
    tokens
}
