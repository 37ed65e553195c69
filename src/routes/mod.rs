//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON command surface under `/api` and serves the static
//! browser UI at `/`. CORS is wide open — the editor is a self-hosted,
//! single-user tool.

pub mod layout;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the static UI directory.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"))
}

/// Full application router: API plus the static editor UI.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let ui = ServeDir::new(static_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/api/layout", get(layout::get_layout))
        .route("/api/cells", post(layout::add_cell))
        .route("/api/cells/{id}", delete(layout::delete_cell))
        .route("/api/cells/{id}/rotate-text", post(layout::rotate_text))
        .route("/api/cells/{id}/toggle-lock", post(layout::toggle_lock))
        .route("/api/layout/grid-change", post(layout::grid_change))
        .route("/api/layout/colors", put(layout::set_colors))
        .route("/api/layout/save", post(layout::save))
        .route("/api/layout/clear", post(layout::clear))
        .route("/api/layout/export", get(layout::export))
        .route("/api/layout/import", post(layout::import))
        .route("/api/layout/render.png", get(layout::render_png))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback_service(ui)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
