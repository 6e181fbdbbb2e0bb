//! TecSql translator core.
//!
//! TecSql is a legacy query dialect written against stable logical names
//! (`$table`, `$table.field`) instead of the physical schema, with a legacy
//! `OUTER` marker that the target dialect expresses as a `(+)` suffix on
//! predicate fields. This module rewrites a TecSql statement, token by token,
//! into a statement against the physical schema:
//!
//! raw text → [`normalize_query_text`] → lexer → pre-scan (base table +
//! outer set) → context-tracking resolver → formatter → SQL text.
//!
//! The pipeline is a pure, synchronous computation over in-memory data: no
//! I/O, no logging, no global state. The [`Dictionary`] it reads is owned by
//! the caller; the server layer keeps one process-wide behind a lock and
//! swaps it wholesale on every catalog load.

pub mod dictionary;
pub mod errors;
pub mod formatter;
pub mod lexer;
pub mod prescan;
pub mod resolver;
pub mod token;

use lazy_static::lazy_static;
use regex::Regex;

pub use dictionary::{Dictionary, DictionaryRow};
pub use errors::TranslateError;

lazy_static! {
    static ref NEWLINE_RUNS: Regex = Regex::new(r"[\r\n]+").unwrap();
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Collapse newline runs to a single space, collapse repeated whitespace and
/// trim. Total over any input; idempotent.
pub fn normalize_query_text(query: &str) -> String {
    let text = NEWLINE_RUNS.replace_all(query, " ");
    let text = WHITESPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}

/// Translate a normalized TecSql statement against the given dictionary.
///
/// Fails with a [`TranslateError`] on an empty query, an unloaded dictionary,
/// or any unresolved or structurally invalid logical reference. On success
/// the rewritten statement is returned as a single string.
pub fn translate(dictionary: &Dictionary, normalized_query: &str) -> Result<String, TranslateError> {
    if normalized_query.trim().is_empty() {
        return Err(TranslateError::EmptyQuery);
    }
    if dictionary.is_empty() {
        return Err(TranslateError::DictionaryNotLoaded);
    }

    let tokens = lexer::tokenize(normalized_query);
    let scan = prescan::prescan(&tokens, dictionary);
    let output = resolver::resolve(&tokens, dictionary, &scan)?;
    Ok(formatter::format_tokens(&output))
}
