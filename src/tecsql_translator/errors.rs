//! Error types for the translation pipeline.
//!
//! Every error is detected synchronously during a single `translate` call and
//! is terminal for that call: no partial output, no silent recovery. The
//! surrounding request layer decides how to present it; the core never logs.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslateError {
    #[error("empty TecSql query")]
    EmptyQuery,

    #[error("TecSql dictionary not loaded; load catalog rows before translating")]
    DictionaryNotLoaded,

    #[error("no dictionary mapping for logical table `{table}`")]
    UnmappedTable { table: String },

    #[error("no dictionary mapping for logical field `{reference}`")]
    UnmappedField { reference: String },

    #[error("logical table reference `{table}` where no table is expected")]
    UnexpectedTableReference { table: String },
}
