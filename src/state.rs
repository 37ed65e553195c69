//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into axum handlers via the `State` extractor. It
//! holds the authoritative board behind an async `RwLock` and the key-value
//! store used for snapshots. One state transition per request, applied
//! under the write lock; responses clone the collection so they never hold
//! the lock.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cell::Cell;
use crate::services::storage::KvStore;

/// Default surface background color.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
/// Default cell border color.
pub const DEFAULT_BORDER_COLOR: &str = "#93c5fd";

// =============================================================================
// BOARD
// =============================================================================

/// The authoritative layout: the cell collection plus the two global
/// presentation colors mirrored by the color form.
#[derive(Debug, Clone)]
pub struct Board {
    pub cells: Vec<Cell>,
    pub background_color: String,
    pub border_color: String,
}

impl Board {
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into axum handlers via the State
/// extractor. Clone is required by axum — inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<RwLock<Board>>,
    pub store: Arc<dyn KvStore>,
}

impl AppState {
    /// Build the state owner around a store and the cells restored from it
    /// (empty when no snapshot existed).
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>, cells: Vec<Cell>) -> Self {
        Self { board: Arc::new(RwLock::new(Board::new(cells))), store }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_defaults_are_the_editor_palette() {
        let board = Board::default();
        assert!(board.cells.is_empty());
        assert_eq!(board.background_color, "#ffffff");
        assert_eq!(board.border_color, "#93c5fd");
    }

    #[tokio::test]
    async fn app_state_seeds_the_board_from_restored_cells() {
        let state = test_helpers::test_app_state_with_cells(vec![test_helpers::dummy_cell("1")]);
        let board = state.board.read().await;
        assert_eq!(board.cells.len(), 1);
        assert_eq!(board.cells[0].id, "1");
    }
}
