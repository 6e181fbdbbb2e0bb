//! TecSql - logical-SQL translation service
//!
//! This crate rewrites statements in the legacy TecSql dialect (stable
//! logical names such as `$table` and `$table.field`) into SQL against the
//! physical schema of the connected database, through:
//! - A logical/physical dictionary rebuilt from catalog rows
//! - A hand-written lexer and a two-pass context-sensitive resolver
//! - Legacy outer-join marker emulation (`(+)` in predicate clauses)
//! - A small HTTP API for translation, dictionary loads and history

pub mod config;
pub mod server;
pub mod tecsql_translator;
