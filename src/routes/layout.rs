//! Layout command surface.
//!
//! DESIGN
//! ======
//! Each endpoint applies one pure transition under the board write lock and
//! responds with the resulting cell collection, so the browser mirrors the
//! authoritative state after every action. Failures are structured
//! `{code, message}` bodies with grepable codes; import and render detail
//! goes to the log, the client gets the generic code the UI alerts on.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::cell::Cell;
use crate::grid::{GridConfig, GridItem};
use crate::services;
use crate::services::render::RENDER_SCALE;
use crate::state::AppState;

/// Fixed filename for JSON downloads.
pub const EXPORT_JSON_FILENAME: &str = "production-line-layout.json";
/// Fixed filename for PNG downloads.
pub const EXPORT_PNG_FILENAME: &str = "production-line-layout.png";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResponse {
    pub cells: Vec<Cell>,
    pub background_color: String,
    pub border_color: String,
    /// Declarative grid contract the browser widget must be configured with.
    pub grid: GridConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCellBody {
    pub name: String,
    pub background_color: String,
    pub text_color: String,
}

#[derive(Deserialize)]
pub struct GridChangeBody {
    pub items: Vec<GridItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorsBody {
    pub background_color: String,
    pub border_color: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

fn error_response(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { code, message: message.into() })).into_response()
}

/// Current time as milliseconds since Unix epoch.
fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// BOARD SNAPSHOT
// =============================================================================

/// `GET /api/layout` — board snapshot plus the grid contract.
pub async fn get_layout(State(state): State<AppState>) -> Json<LayoutResponse> {
    let board = state.board.read().await;
    Json(LayoutResponse {
        cells: board.cells.clone(),
        background_color: board.background_color.clone(),
        border_color: board.border_color.clone(),
        grid: GridConfig::DEFAULT,
    })
}

// =============================================================================
// CELL ACTIONS
// =============================================================================

/// `POST /api/cells` — add a cell below the current stack.
pub async fn add_cell(State(state): State<AppState>, Json(body): Json<AddCellBody>) -> Response {
    let mut board = state.board.write().await;
    match services::layout::add_cell(
        &mut board.cells,
        &body.name,
        &body.background_color,
        &body.text_color,
        now_ms(),
    ) {
        Ok(cell) => {
            info!(id = %cell.id, name = %cell.name, y = cell.y, "cell added");
            (StatusCode::CREATED, Json(board.cells.clone())).into_response()
        }
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, e.error_code(), e.to_string()),
    }
}

/// `POST /api/layout/grid-change` — reconcile reported widget geometry.
/// Locked cells keep their geometry.
pub async fn grid_change(
    State(state): State<AppState>,
    Json(body): Json<GridChangeBody>,
) -> Json<Vec<Cell>> {
    let mut board = state.board.write().await;
    services::layout::apply_grid_change(&mut board.cells, &body.items);
    Json(board.cells.clone())
}

/// `POST /api/cells/:id/rotate-text` — cycle the label by 90 degrees.
/// Unknown ids are a no-op.
pub async fn rotate_text(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Cell>> {
    let mut board = state.board.write().await;
    services::layout::rotate_text(&mut board.cells, &id);
    Json(board.cells.clone())
}

/// `POST /api/cells/:id/toggle-lock` — flip the lock flag. Unknown ids are
/// a no-op.
pub async fn toggle_lock(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Cell>> {
    let mut board = state.board.write().await;
    services::layout::toggle_lock(&mut board.cells, &id);
    Json(board.cells.clone())
}

/// `DELETE /api/cells/:id` — remove a cell. Irreversible; unknown ids are
/// a no-op.
pub async fn delete_cell(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Cell>> {
    let mut board = state.board.write().await;
    services::layout::delete_cell(&mut board.cells, &id);
    Json(board.cells.clone())
}

/// `PUT /api/layout/colors` — set the global background/border colors.
pub async fn set_colors(State(state): State<AppState>, Json(body): Json<ColorsBody>) -> Json<serde_json::Value> {
    let mut board = state.board.write().await;
    board.background_color = body.background_color;
    board.border_color = body.border_color;
    Json(serde_json::json!({ "ok": true }))
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// `POST /api/layout/save` — persist the current collection.
pub async fn save(State(state): State<AppState>) -> Response {
    let board = state.board.read().await;
    match services::storage::save_layout(state.store.as_ref(), &board.cells) {
        Ok(()) => {
            info!(cells = board.cells.len(), "layout snapshot saved");
            Json(serde_json::json!({ "ok": true })).into_response()
        }
        Err(e) => {
            error!(code = e.error_code(), error = %e, "layout snapshot save failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "E_STORAGE", "layout could not be saved")
        }
    }
}

/// `POST /api/layout/clear` — drop the persisted snapshot and empty the
/// in-memory collection. The confirmation prompt lives in the UI.
pub async fn clear(State(state): State<AppState>) -> Response {
    let mut board = state.board.write().await;
    if let Err(e) = services::storage::clear_layout(state.store.as_ref()) {
        error!(code = e.error_code(), error = %e, "persisted layout clear failed");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "E_STORAGE", "layout could not be cleared");
    }
    board.cells.clear();
    info!("layout cleared");
    Json(serde_json::json!({ "ok": true })).into_response()
}

// =============================================================================
// TRANSFER
// =============================================================================

/// `GET /api/layout/export` — pretty-printed JSON download with a fixed
/// filename.
pub async fn export(State(state): State<AppState>) -> Response {
    let board = state.board.read().await;
    let text = services::transfer::export_json(&board.cells);
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, String::from("application/json")),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{EXPORT_JSON_FILENAME}\"")),
        ],
        text,
    )
        .into_response()
}

/// `POST /api/layout/import` — raw JSON text body; on success the whole
/// collection is replaced (never merged).
pub async fn import(State(state): State<AppState>, body: String) -> Response {
    match services::transfer::import_json(&body) {
        Ok(cells) => {
            let mut board = state.board.write().await;
            info!(incoming = cells.len(), replaced = board.cells.len(), "layout imported; collection replaced");
            board.cells = cells;
            Json(board.cells.clone()).into_response()
        }
        Err(e) => {
            warn!(code = e.error_code(), error = %e, "layout import rejected");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "E_IMPORT", "layout file could not be imported")
        }
    }
}

// =============================================================================
// RASTERIZATION
// =============================================================================

/// `GET /api/layout/render.png` — PNG download of the surface at 2x pixel
/// density, fixed filename.
pub async fn render_png(State(state): State<AppState>) -> Response {
    let board = state.board.read().await;
    let result = services::render::render_png(
        &board.cells,
        &GridConfig::DEFAULT,
        &board.background_color,
        &board.border_color,
        RENDER_SCALE,
    );
    drop(board);

    match result {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, String::from("image/png")),
                (CONTENT_DISPOSITION, format!("attachment; filename=\"{EXPORT_PNG_FILENAME}\"")),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!(code = e.error_code(), error = %e, "surface rasterization failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "E_RENDER", "layout could not be rendered to PNG")
        }
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
