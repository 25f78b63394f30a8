//! Router assembly.
//!
//! Binds the websocket relay, the upload endpoint, and static serving of the
//! client assets and the upload directory under a single axum router.

pub mod upload;
pub mod ws;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the directory holding the browser client assets.
fn public_dir() -> PathBuf {
    std::env::var("PUBLIC_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("public"))
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads_service = ServeDir::new((*state.upload_dir).clone());
    let public_service = ServeDir::new(public_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/ws", get(ws::handle_ws))
        .route("/upload", post(upload::handle_upload))
        .route("/healthz", get(healthz))
        .nest_service("/uploads", uploads_service)
        .fallback_service(public_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
