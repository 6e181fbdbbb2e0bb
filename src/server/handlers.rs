use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::tecsql_translator::{normalize_query_text, translate, Dictionary};

use super::{
    current_dictionary, install_dictionary,
    history::{SearchEntry, TranslationEntry},
    models::{
        AckResponse, AddSearchRequest, DictionaryStatus, ErrorResponse, LoadDictionaryRequest,
        LoadDictionaryResponse, TranslateRequest, TranslateResponse,
    },
    AppState,
};

/// Simple health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "tecsql",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn translate_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.query.len() > state.config.max_query_len {
        return Err(bad_request(format!(
            "query exceeds maximum length of {} bytes",
            state.config.max_query_len
        )));
    }

    let normalized = normalize_query_text(&payload.query);
    let dictionary = current_dictionary().await;

    match translate(&dictionary, &normalized) {
        Ok(sql) => {
            let history = state.history.lock().await;
            if let Err(e) = history.add_translation(&normalized, &sql) {
                // History is best-effort; the translation itself succeeded.
                log::warn!("Failed to record translation history: {}", e);
            }
            log::debug!("Translated query: {} -> {}", normalized, sql);
            Ok(Json(TranslateResponse {
                normalized_query: normalized,
                sql,
            }))
        }
        Err(e) => {
            log::debug!("Translation failed: {}", e);
            Err(bad_request(e.to_string()))
        }
    }
}

/// Install a freshly built dictionary from catalog rows. The replacement is
/// built in full before it is swapped in, so concurrent translations only
/// ever see the old or the new dictionary, never a partial one.
pub async fn load_dictionary(
    Json(payload): Json<LoadDictionaryRequest>,
) -> Json<LoadDictionaryResponse> {
    let dictionary = Dictionary::from_rows(&payload.rows);
    let tables = dictionary.table_count();
    let fields = dictionary.field_count();
    install_dictionary(dictionary).await;

    log::info!(
        "Dictionary loaded: {} tables, {} fields from {} catalog rows",
        tables,
        fields,
        payload.rows.len()
    );
    Json(LoadDictionaryResponse {
        success: true,
        tables,
        fields,
    })
}

pub async fn dictionary_status() -> Json<DictionaryStatus> {
    let dictionary = current_dictionary().await;
    Json(DictionaryStatus {
        loaded: !dictionary.is_empty(),
        tables: dictionary.table_count(),
        fields: dictionary.field_count(),
    })
}

pub async fn get_search_history(State(state): State<Arc<AppState>>) -> Json<Vec<SearchEntry>> {
    let history = state.history.lock().await;
    Json(history.search_history())
}

pub async fn add_search_history(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddSearchRequest>,
) -> Result<Json<AckResponse>, (StatusCode, Json<ErrorResponse>)> {
    let history = state.history.lock().await;
    history
        .add_search(SearchEntry {
            physical: payload.physical,
            logical: payload.logical,
        })
        .map_err(|e| bad_request(e.to_string()))?;
    Ok(Json(AckResponse { success: true }))
}

pub async fn get_translation_history(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TranslationEntry>> {
    let history = state.history.lock().await;
    Json(history.translation_history())
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}
