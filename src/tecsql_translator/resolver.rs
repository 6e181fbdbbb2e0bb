//! Context-tracking resolver: the main translation pass.
//!
//! A single linear sweep over the token stream, tracking clause context (with
//! a stack for parenthesized groups rather than recursion), alias bindings
//! and table expectation, resolving logical markers against the dictionary
//! and emitting a rewritten token stream. Legacy-outer fields gain a `(+)`
//! suffix, but only in predicate clauses (WHERE/ON/HAVING) where the target
//! dialect accepts the marker.

use std::collections::HashMap;

use super::dictionary::{normalize_table_key, Dictionary};
use super::errors::TranslateError;
use super::prescan::{outer_is_legacy_marker, PreScan};
use super::token::{Keyword, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Clause {
    None,
    Select,
    From,
    Join,
    Where,
    On,
    Having,
    Order,
    OrderBy,
    Group,
    GroupBy,
}

impl Clause {
    /// Clauses where the target dialect accepts the `(+)` marker.
    fn is_predicate(self) -> bool {
        matches!(self, Clause::Where | Clause::On | Clause::Having)
    }

    fn is_table_clause(self) -> bool {
        matches!(self, Clause::From | Clause::Join)
    }
}

/// What a resolved table reference stands for, kept for alias lookups. The
/// alias itself stays as the output qualifier, so only the logical key is
/// needed for field resolution.
#[derive(Debug, Clone)]
enum TableRef {
    /// Dictionary-resolved logical table.
    Logical { key: String },
    /// Pass-through physical table unknown to the dictionary.
    Physical,
}

#[derive(Debug, Clone)]
struct AliasTarget {
    table: TableRef,
    outer: bool,
}

/// Armed immediately after a table reference resolves; the next `AS <ident>`
/// or bare `<ident>` binds, anything else cancels.
struct PendingAlias {
    target: AliasTarget,
}

fn with_outer_marker(text: String, outer: bool, clause: Clause) -> String {
    if outer && clause.is_predicate() {
        format!("{text}(+)")
    } else {
        text
    }
}

pub fn resolve(
    tokens: &[Token],
    dictionary: &Dictionary,
    scan: &PreScan,
) -> Result<Vec<Token>, TranslateError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut aliases: HashMap<String, AliasTarget> = HashMap::new();
    let mut clause = Clause::None;
    let mut clause_stack: Vec<Clause> = Vec::new();
    let mut expecting_table = false;
    let mut pending: Option<PendingAlias> = None;
    let mut verbatim = false;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];

        // `AS IS` escape hatch: copy everything that follows unchanged.
        if verbatim {
            output.push(token.clone());
            i += 1;
            continue;
        }

        if let Some(kw) = token.keyword() {
            match kw {
                Keyword::As => {
                    if matches!(tokens.get(i + 1), Some(t) if t.is_keyword(Keyword::Is)) {
                        pending = None;
                        verbatim = true;
                        output.push(token.clone());
                        i += 1;
                        continue;
                    }
                    // `AS` keeps an armed alias binding alive; the identifier
                    // that follows still binds.
                    output.push(token.clone());
                }
                Keyword::From => {
                    clause = Clause::From;
                    expecting_table = true;
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::Join => {
                    clause = Clause::Join;
                    expecting_table = true;
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::Select => {
                    clause = Clause::Select;
                    expecting_table = false;
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::Where => {
                    clause = Clause::Where;
                    expecting_table = false;
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::On => {
                    clause = Clause::On;
                    expecting_table = false;
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::Having => {
                    clause = Clause::Having;
                    expecting_table = false;
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::Order => {
                    clause = Clause::Order;
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::Group => {
                    clause = Clause::Group;
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::By => {
                    clause = match clause {
                        Clause::Order => Clause::OrderBy,
                        Clause::Group => Clause::GroupBy,
                        other => other,
                    };
                    pending = None;
                    output.push(token.clone());
                }
                Keyword::Outer if outer_is_legacy_marker(tokens, i) => {
                    // The legacy marker keyword is consumed here; outerness
                    // reappears as `(+)` on predicate fields. Standard
                    // `LEFT OUTER JOIN` falls through below and is kept.
                    pending = None;
                }
                _ => {
                    pending = None;
                    output.push(token.clone());
                }
            }
            i += 1;
            continue;
        }

        match token {
            Token::Symbol(sym) => {
                match sym.as_str() {
                    "(" => {
                        // Context is preserved, not reset, inside the group.
                        clause_stack.push(clause);
                    }
                    ")" => {
                        if let Some(saved) = clause_stack.pop() {
                            clause = saved;
                        }
                    }
                    "," if clause == Clause::From => {
                        expecting_table = true;
                    }
                    _ => {}
                }
                pending = None;
                output.push(token.clone());
                i += 1;
            }

            Token::LogicalName(text) => {
                if expecting_table || clause.is_table_clause() {
                    let key = normalize_table_key(text);
                    let physical = dictionary
                        .physical_table(&key)
                        .ok_or_else(|| TranslateError::UnmappedTable {
                            table: text.clone(),
                        })?
                        .to_string();
                    output.push(Token::Ident(physical));
                    pending = Some(PendingAlias {
                        target: AliasTarget {
                            outer: scan.outer_tables.contains(&key),
                            table: TableRef::Logical { key },
                        },
                    });
                    expecting_table = false;
                    i += 1;
                    continue;
                }

                // Bare marker in field position: resolve against the base table.
                pending = None;
                let field = text.trim_start_matches('$');
                let resolved = scan.base_table.as_deref().and_then(|base| {
                    let physical_table = dictionary.physical_table(base)?;
                    let physical_field = dictionary.physical_field(base, field)?;
                    let outer = scan.outer_tables.contains(base);
                    Some(with_outer_marker(
                        format!("{physical_table}.{physical_field}"),
                        outer,
                        clause,
                    ))
                });
                match resolved {
                    Some(text) => output.push(Token::Ident(text)),
                    None if dictionary.contains_table(text) => {
                        return Err(TranslateError::UnexpectedTableReference {
                            table: text.clone(),
                        });
                    }
                    None => {
                        return Err(TranslateError::UnmappedField {
                            reference: text.clone(),
                        });
                    }
                }
                i += 1;
            }

            Token::LogicalField { text, table, field } => {
                pending = None;
                let physical_table = dictionary.physical_table(table).ok_or_else(|| {
                    TranslateError::UnmappedTable {
                        table: table.clone(),
                    }
                })?;
                let physical_field = dictionary.physical_field(table, field).ok_or_else(|| {
                    TranslateError::UnmappedField {
                        reference: text.clone(),
                    }
                })?;
                let outer = scan.outer_tables.contains(&normalize_table_key(table));
                output.push(Token::Ident(with_outer_marker(
                    format!("{physical_table}.{physical_field}"),
                    outer,
                    clause,
                )));
                i += 1;
            }

            Token::TableStar { table, .. } => {
                pending = None;
                let physical_table = dictionary.physical_table(table).ok_or_else(|| {
                    TranslateError::UnmappedTable {
                        table: table.clone(),
                    }
                })?;
                output.push(Token::Ident(format!("{physical_table}.*")));
                i += 1;
            }

            Token::Ident(name) => {
                // A table was just resolved: this identifier is its alias.
                if let Some(armed) = pending.take() {
                    aliases.insert(name.to_lowercase(), armed.target);
                    output.push(token.clone());
                    i += 1;
                    continue;
                }

                if expecting_table {
                    i += resolve_identifier_table(
                        name,
                        tokens,
                        i,
                        dictionary,
                        scan,
                        &mut output,
                        &mut pending,
                    );
                    expecting_table = false;
                    continue;
                }

                // Alias-qualified or table-qualified dotted reference.
                if let Some(consumed) = resolve_qualified(
                    name,
                    tokens,
                    i,
                    dictionary,
                    scan,
                    clause,
                    &aliases,
                    &mut output,
                )? {
                    i += consumed;
                    continue;
                }

                output.push(token.clone());
                i += 1;
            }

            // Strings, parameters, numbers and generic operators pass through.
            _ => {
                pending = None;
                output.push(token.clone());
                i += 1;
            }
        }
    }

    Ok(output)
}

/// Resolve an identifier in table position. Known logical keys and known
/// physical names go through the dictionary; anything else passes through as
/// a physical table, keeping a `schema.table` qualification together so the
/// alias that may follow still binds. Returns the number of tokens consumed.
fn resolve_identifier_table(
    name: &str,
    tokens: &[Token],
    i: usize,
    dictionary: &Dictionary,
    scan: &PreScan,
    output: &mut Vec<Token>,
    pending: &mut Option<PendingAlias>,
) -> usize {
    let logical = if dictionary.contains_table(name) {
        Some(normalize_table_key(name))
    } else {
        dictionary.logical_key_for_physical(name).map(str::to_string)
    };

    if let Some(key) = logical {
        let physical = dictionary
            .physical_table(&key)
            .unwrap_or(name)
            .to_string();
        output.push(Token::Ident(physical));
        *pending = Some(PendingAlias {
            target: AliasTarget {
                outer: scan.outer_tables.contains(&key),
                table: TableRef::Logical { key },
            },
        });
        return 1;
    }

    // Pass-through physical table, possibly schema-qualified.
    if let (Some(dot), Some(Token::Ident(second))) = (tokens.get(i + 1), tokens.get(i + 2)) {
        if dot.is_symbol(".") {
            output.push(Token::Ident(format!("{name}.{second}")));
            *pending = Some(PendingAlias {
                target: AliasTarget {
                    outer: false,
                    table: TableRef::Physical,
                },
            });
            return 3;
        }
    }

    output.push(Token::Ident(name.to_string()));
    *pending = Some(PendingAlias {
        target: AliasTarget {
            outer: false,
            table: TableRef::Physical,
        },
    });
    1
}

/// Resolve `name.field` / `name.*` where `name` is a bound alias or a known
/// logical-table key. Returns `Ok(Some(consumed))` when the reference was
/// handled, `Ok(None)` when it is not a qualified reference this pass
/// rewrites (the tokens then pass through individually).
#[allow(clippy::too_many_arguments)]
fn resolve_qualified(
    name: &str,
    tokens: &[Token],
    i: usize,
    dictionary: &Dictionary,
    scan: &PreScan,
    clause: Clause,
    aliases: &HashMap<String, AliasTarget>,
    output: &mut Vec<Token>,
) -> Result<Option<usize>, TranslateError> {
    let dotted = matches!(tokens.get(i + 1), Some(t) if t.is_symbol("."));
    if !dotted {
        return Ok(None);
    }
    let member = match tokens.get(i + 2) {
        Some(Token::Ident(field)) => Some(field.as_str()),
        Some(t) if t.is_symbol("*") => None,
        _ => return Ok(None),
    };

    if let Some(target) = aliases.get(&name.to_lowercase()) {
        let text = match (member, &target.table) {
            // The alias stays as the qualifier; only the field is rewritten.
            (None, _) => format!("{name}.*"),
            (Some(field), TableRef::Logical { key, .. }) => {
                let physical_field = dictionary.physical_field(key, field).ok_or_else(|| {
                    TranslateError::UnmappedField {
                        reference: format!("{name}.{field}"),
                    }
                })?;
                with_outer_marker(format!("{name}.{physical_field}"), target.outer, clause)
            }
            (Some(field), TableRef::Physical) => format!("{name}.{field}"),
        };
        output.push(Token::Ident(text));
        return Ok(Some(3));
    }

    if dictionary.contains_table(name) {
        let key = normalize_table_key(name);
        let physical_table = dictionary.physical_table(&key).unwrap_or(name).to_string();
        let text = match member {
            None => format!("{physical_table}.*"),
            Some(field) => {
                let physical_field = dictionary.physical_field(&key, field).ok_or_else(|| {
                    TranslateError::UnmappedField {
                        reference: format!("{name}.{field}"),
                    }
                })?;
                with_outer_marker(
                    format!("{physical_table}.{physical_field}"),
                    scan.outer_tables.contains(&key),
                    clause,
                )
            }
        };
        output.push(Token::Ident(text));
        return Ok(Some(3));
    }

    Ok(None)
}
