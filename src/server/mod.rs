use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
};

use crate::config::ServerConfig;
use crate::tecsql_translator::Dictionary;
use handlers::{
    add_search_history, dictionary_status, get_search_history, get_translation_history,
    health_check, load_dictionary, translate_query,
};
use history::HistoryStore;

pub mod handlers;
pub mod history;
pub mod models;

/// Request body cap; dictionary loads can carry thousands of catalog rows.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub history: Arc<Mutex<HistoryStore>>,
}

// ==================================================================================
// DICTIONARY STORAGE
// ==================================================================================
// The logical/physical dictionary is process-wide state with a lifecycle of
// its own: rebuilt wholesale by each catalog load, read by every translation.
// Readers clone the Arc and translate against an immutable snapshot; a load
// installs a fully built replacement with one write-lock assignment, so a
// half-populated dictionary is never observable.
// ==================================================================================

pub static GLOBAL_DICTIONARY: OnceCell<RwLock<Arc<Dictionary>>> = OnceCell::const_new();

/// Snapshot of the current dictionary; empty (untranslatable) before the
/// first successful load.
pub async fn current_dictionary() -> Arc<Dictionary> {
    match GLOBAL_DICTIONARY.get() {
        Some(lock) => lock.read().await.clone(),
        None => Arc::new(Dictionary::default()),
    }
}

/// Atomically replace the process-wide dictionary.
pub async fn install_dictionary(dictionary: Dictionary) {
    let dictionary = Arc::new(dictionary);
    let lock = GLOBAL_DICTIONARY
        .get_or_init(|| async { RwLock::new(dictionary.clone()) })
        .await;
    *lock.write().await = dictionary;
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(app_state.config.request_timeout_secs);
    Router::new()
        .route("/health", get(health_check))
        .route("/api/translate-query", post(translate_query))
        .route("/api/dictionary/load", post(load_dictionary))
        .route("/api/dictionary/status", get(dictionary_status))
        .route("/api/search-history", get(get_search_history))
        .route("/api/add-search-history", post(add_search_history))
        .route("/api/translation-history", get(get_translation_history))
        // The timeout layer sits innermost so it wraps the infallible route
        // service directly; body limiting changes the response body type in a
        // way the timeout middleware cannot wrap.
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    timeout,
                )),
        )
        .with_state(app_state)
}

pub async fn run_with_config(config: ServerConfig) {
    dotenv().ok();

    log::info!(
        "Server configuration: http={}:{}, max_query_len={}, data_dir={}",
        config.http_host,
        config.http_port,
        config.max_query_len,
        config.data_dir
    );

    let history = match HistoryStore::new(&config.data_dir) {
        Ok(store) => Arc::new(Mutex::new(store)),
        Err(e) => {
            log::error!("Failed to open data directory {}: {}", config.data_dir, e);
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState {
        config: config.clone(),
        history,
    });
    let app = build_router(app_state);

    let bind_address = format!("{}:{}", config.http_host, config.http_port);
    log::info!("Starting HTTP server on {}", bind_address);

    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind HTTP listener to {}: {}", bind_address, e);
            log::error!("  Is another process using port {}?", config.http_port);
            std::process::exit(1);
        }
    };

    println!("TecSql translator is running");
    println!("  HTTP API: http://{}", bind_address);
    println!("  Dictionary: load catalog rows via POST /api/dictionary/load");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = async { server.await } => {
            if let Err(e) = result {
                log::error!("HTTP server fatal error: {:?}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("Received shutdown signal, shutting down...");
        }
    }
}
