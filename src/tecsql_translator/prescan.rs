//! Pre-scan pass: one forward sweep over the token stream that determines the
//! implicit base table (for unqualified field markers) and the set of tables
//! flagged with the legacy `OUTER` marker. Nothing is resolved or rewritten
//! here and this pass never raises: identifiers it cannot classify as tables
//! are simply skipped.

use std::collections::HashSet;

use super::dictionary::{normalize_table_key, Dictionary};
use super::token::{Keyword, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Clause {
    Other,
    From,
    Join,
}

/// Result of the pre-scan, consumed by the resolver.
#[derive(Debug, Default)]
pub struct PreScan {
    /// Normalized logical key of the first non-outer table, falling back to
    /// the first table seen overall when every table is outer.
    pub base_table: Option<String>,
    /// Normalized logical keys of tables flagged with the legacy marker.
    pub outer_tables: HashSet<String>,
}

/// Logical key for a token that can stand in table position: a logical-name
/// marker, or a plain identifier known to the dictionary either as a logical
/// key or as a physical table name.
fn table_candidate_key(token: &Token, dictionary: &Dictionary) -> Option<String> {
    match token {
        Token::LogicalName(text) => {
            let key = normalize_table_key(text);
            if key.is_empty() {
                None
            } else {
                Some(key)
            }
        }
        Token::Ident(name) => {
            if dictionary.contains_table(name) {
                Some(normalize_table_key(name))
            } else {
                dictionary
                    .logical_key_for_physical(name)
                    .map(str::to_string)
            }
        }
        _ => None,
    }
}

/// True when this `OUTER` keyword is the legacy outer-join marker rather than
/// part of a standard `LEFT/RIGHT/FULL OUTER JOIN`.
pub(super) fn outer_is_legacy_marker(tokens: &[Token], index: usize) -> bool {
    !matches!(tokens.get(index + 1), Some(next) if next.is_keyword(Keyword::Join))
}

pub fn prescan(tokens: &[Token], dictionary: &Dictionary) -> PreScan {
    let mut base: Option<String> = None;
    let mut first_seen: Option<String> = None;
    let mut outer_tables = HashSet::new();

    let mut clause = Clause::Other;
    let mut expecting_table = false;
    let mut outer_next = false;
    let mut last_table: Option<String> = None;

    for (i, token) in tokens.iter().enumerate() {
        if let Some(kw) = token.keyword() {
            match kw {
                Keyword::From => {
                    clause = Clause::From;
                    expecting_table = true;
                }
                Keyword::Join => {
                    clause = Clause::Join;
                    expecting_table = true;
                }
                Keyword::Select
                | Keyword::Where
                | Keyword::On
                | Keyword::Having
                | Keyword::Order
                | Keyword::Group => {
                    clause = Clause::Other;
                    expecting_table = false;
                }
                Keyword::Outer if outer_is_legacy_marker(tokens, i) => {
                    if expecting_table {
                        outer_next = true;
                    } else if let Some(key) = last_table.take() {
                        // Trailing form: `FROM $cust OUTER` flags the table
                        // just introduced.
                        if base.as_deref() == Some(key.as_str()) {
                            base = None;
                        }
                        outer_tables.insert(key);
                    }
                }
                _ => {}
            }
            continue;
        }

        if token.is_symbol(",") && clause == Clause::From {
            expecting_table = true;
            continue;
        }

        if expecting_table {
            if let Some(key) = table_candidate_key(token, dictionary) {
                if first_seen.is_none() {
                    first_seen = Some(key.clone());
                }
                if outer_next {
                    outer_tables.insert(key.clone());
                    outer_next = false;
                } else if base.is_none() {
                    base = Some(key.clone());
                }
                last_table = Some(key);
                expecting_table = false;
            }
        }
    }

    PreScan {
        // A query whose only tables are outer still needs a base for
        // unqualified field resolution.
        base_table: base.or(first_seen),
        outer_tables,
    }
}
