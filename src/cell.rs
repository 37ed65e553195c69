//! Cell — the single domain entity: one named, colored rectangle on the grid.
//!
//! DESIGN
//! ======
//! Wire and snapshot representations use camelCase field names so layouts
//! exported by earlier builds of the editor import unchanged. `rotation` is
//! reserved: serialized, never transitioned by any action. `isLocked`
//! defaults to false so older snapshots without the field still load.

use serde::{Deserialize, Serialize};

/// Grid span (both axes) of a freshly created cell, in grid units.
pub const NEW_CELL_SPAN: i32 = 10;

/// One production cell on the layout grid. Identity is `id`; the struct is
/// flat and references no other entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Stable identifier derived from the creation timestamp in
    /// milliseconds. Unique across the collection.
    pub id: String,
    /// Display label. Non-empty after trimming at creation.
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Reserved. Always 0.
    #[serde(default)]
    pub rotation: i32,
    /// Label rotation in degrees, one of {0, 90, 180, 270}.
    #[serde(default)]
    pub text_rotation: i32,
    pub background_color: String,
    pub text_color: String,
    /// When set, drag/resize reports never touch this cell's geometry.
    #[serde(default)]
    pub is_locked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_camel_case_names() {
        let cell = Cell {
            id: "1700000000000".into(),
            name: "Line A".into(),
            x: 0,
            y: 0,
            w: 10,
            h: 10,
            rotation: 0,
            text_rotation: 90,
            background_color: "#ffffff".into(),
            text_color: "#000000".into(),
            is_locked: true,
        };

        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json.get("textRotation").and_then(serde_json::Value::as_i64), Some(90));
        assert_eq!(json.get("backgroundColor").and_then(|v| v.as_str()), Some("#ffffff"));
        assert_eq!(json.get("textColor").and_then(|v| v.as_str()), Some("#000000"));
        assert_eq!(json.get("isLocked").and_then(serde_json::Value::as_bool), Some(true));
        assert!(json.get("text_rotation").is_none());
    }

    #[test]
    fn json_round_trip() {
        let cell = Cell {
            id: "1700000000001".into(),
            name: "Paint Shop".into(),
            x: 3,
            y: 7,
            w: 12,
            h: 4,
            rotation: 0,
            text_rotation: 270,
            background_color: "#fde047".into(),
            text_color: "#1f2937".into(),
            is_locked: false,
        };

        let json = serde_json::to_string(&cell).unwrap();
        let restored: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cell);
    }

    #[test]
    fn missing_lock_and_rotation_default() {
        // Snapshot shape from before the lock flag existed.
        let json = r##"{
            "id": "1690000000000",
            "name": "Assembly",
            "x": 0, "y": 0, "w": 10, "h": 10,
            "backgroundColor": "#ffffff",
            "textColor": "#000000"
        }"##;

        let cell: Cell = serde_json::from_str(json).unwrap();
        assert!(!cell.is_locked);
        assert_eq!(cell.rotation, 0);
        assert_eq!(cell.text_rotation, 0);
    }
}
