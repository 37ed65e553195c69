//! Layout import/export as JSON text.
//!
//! DESIGN
//! ======
//! Export is pretty-printed with 2-space indent so downloaded files diff
//! cleanly. Import is strict about the envelope (valid JSON, top-level
//! array) and descriptive about which element failed to shape into a cell.
//! Importing the output of `export_json` reproduces the collection
//! field-for-field.

use crate::cell::Cell;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("layout text is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("top-level JSON value must be an array of cells, got {found}")]
    NotAnArray { found: &'static str },
    #[error("cell at index {index} is malformed: {source}")]
    BadCell {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ImportError {
    /// Grepable code for logs and structured error bodies.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Syntax(_) => "E_IMPORT_SYNTAX",
            Self::NotAnArray { .. } => "E_IMPORT_SHAPE",
            Self::BadCell { .. } => "E_IMPORT_CELL",
        }
    }
}

/// Serialize the collection as pretty-printed JSON (2-space indent).
#[must_use]
pub fn export_json(cells: &[Cell]) -> String {
    serde_json::to_string_pretty(cells).unwrap_or_else(|_| String::from("[]"))
}

/// Parse a JSON text into a cell collection.
///
/// # Errors
///
/// Returns `Syntax` for text that is not JSON, `NotAnArray` when the
/// top-level value has the wrong shape, and `BadCell` when an element
/// cannot be deserialized into a [`Cell`].
pub fn import_json(text: &str) -> Result<Vec<Cell>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ImportError::Syntax)?;
    let serde_json::Value::Array(items) = value else {
        return Err(ImportError::NotAnArray { found: json_type_name(&value) });
    };

    let mut cells = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let cell = serde_json::from_value(item).map_err(|source| ImportError::BadCell { index, source })?;
        cells.push(cell);
    }
    Ok(cells)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "transfer_test.rs"]
mod tests;
