//! Layout transitions — the pure core every user action funnels through.
//!
//! DESIGN
//! ======
//! Each operation is one synchronous function over the cell collection, so
//! the whole editing model is testable without HTTP or a rendering surface.
//! Lock enforcement lives in `apply_grid_change`: the browser widget has no
//! native lock, so reported geometry for a locked cell is discarded at this
//! boundary.

use crate::cell::{Cell, NEW_CELL_SPAN};
use crate::grid::GridItem;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("cell name must not be blank")]
    EmptyName,
}

impl LayoutError {
    /// Grepable code for structured error bodies.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "E_EMPTY_NAME",
        }
    }
}

/// Reconcile the collection with geometry reported by the grid widget.
///
/// Unlocked cells with a matching reported entry (by `id`) adopt its
/// x/y/w/h wholesale. Locked cells keep their geometry no matter what the
/// widget reports. Cells without a reported entry, and reported entries
/// without a cell, are both left alone.
pub fn apply_grid_change(cells: &mut [Cell], reported: &[GridItem]) {
    for cell in cells.iter_mut() {
        if cell.is_locked {
            continue;
        }
        let Some(item) = reported.iter().find(|item| item.id == cell.id) else {
            continue;
        };
        cell.x = item.x;
        cell.y = item.y;
        cell.w = item.w;
        cell.h = item.h;
    }
}

/// Cycle the matching cell's label by +90 degrees, wrapping at 360.
/// Unknown ids are a no-op.
pub fn rotate_text(cells: &mut [Cell], id: &str) {
    let Some(cell) = cells.iter_mut().find(|cell| cell.id == id) else {
        return;
    };
    cell.text_rotation = (cell.text_rotation + 90) % 360;
}

/// Flip the matching cell's lock flag. Unknown ids are a no-op.
pub fn toggle_lock(cells: &mut [Cell], id: &str) {
    let Some(cell) = cells.iter_mut().find(|cell| cell.id == id) else {
        return;
    };
    cell.is_locked = !cell.is_locked;
}

/// Remove exactly the matching cell, keeping the order of the rest.
/// Unknown ids are a no-op.
pub fn delete_cell(cells: &mut Vec<Cell>, id: &str) {
    cells.retain(|cell| cell.id != id);
}

/// Append a new cell below everything currently on the grid and return a
/// copy of it.
///
/// # Errors
///
/// Returns `EmptyName` when the name is blank after trimming.
pub fn add_cell(
    cells: &mut Vec<Cell>,
    name: &str,
    background_color: &str,
    text_color: &str,
    now_ms: i64,
) -> Result<Cell, LayoutError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LayoutError::EmptyName);
    }

    let cell = Cell {
        id: unique_cell_id(cells, now_ms),
        name: name.to_string(),
        x: 0,
        y: next_stack_y(cells),
        w: NEW_CELL_SPAN,
        h: NEW_CELL_SPAN,
        rotation: 0,
        text_rotation: 0,
        background_color: background_color.to_string(),
        text_color: text_color.to_string(),
        is_locked: false,
    };
    cells.push(cell.clone());
    Ok(cell)
}

/// First free row below the existing stack: max(y + h), floored at 0.
fn next_stack_y(cells: &[Cell]) -> i32 {
    cells.iter().map(|cell| cell.y + cell.h).fold(0, i32::max)
}

/// Timestamp-derived id, bumped by one millisecond until unique within the
/// collection. Two cells added within the same millisecond stay distinct.
fn unique_cell_id(cells: &[Cell], now_ms: i64) -> String {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !cells.iter().any(|cell| cell.id == id) {
            return id;
        }
        candidate += 1;
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
