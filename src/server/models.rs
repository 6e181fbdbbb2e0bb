use serde::{Deserialize, Serialize};

use crate::tecsql_translator::DictionaryRow;

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub normalized_query: String,
    pub sql: String,
}

/// Error body for failed requests; the message carries the offending logical
/// name(s) verbatim from the translator.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Catalog rows as fetched by the surrounding application; this service owns
/// no database connection.
#[derive(Debug, Deserialize)]
pub struct LoadDictionaryRequest {
    pub rows: Vec<DictionaryRow>,
}

#[derive(Debug, Serialize)]
pub struct LoadDictionaryResponse {
    pub success: bool,
    pub tables: usize,
    pub fields: usize,
}

#[derive(Debug, Serialize)]
pub struct DictionaryStatus {
    pub loaded: bool,
    pub tables: usize,
    pub fields: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddSearchRequest {
    pub physical: String,
    pub logical: String,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}
