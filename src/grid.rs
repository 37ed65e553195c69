//! Grid surface contract — declarative constants plus pixel math.
//!
//! DESIGN
//! ======
//! The browser widget owns drag physics, collision handling, and resize
//! math; this module owns the numbers both sides must agree on. The pixel
//! math mirrors the widget's placement formula so server-side rasterization
//! lines up with what the user sees on screen.

use serde::{Deserialize, Serialize};

/// Declarative grid configuration, published to the browser widget and
/// consumed by the rasterizer.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub cols: i32,
    pub row_height: i32,
    pub width: i32,
    /// Horizontal and vertical gap between items, in pixels.
    pub margin: [i32; 2],
    pub container_padding: [i32; 2],
}

impl GridConfig {
    /// The fixed surface the editor runs on: 96 columns, 15px rows,
    /// 1200px wide, 1px margins and padding, no compaction.
    pub const DEFAULT: Self = Self {
        cols: 96,
        row_height: 15,
        width: 1200,
        margin: [1, 1],
        container_padding: [1, 1],
    };

    /// Width of a single column in pixels, before margins.
    #[must_use]
    pub fn col_width(&self) -> f64 {
        let usable = self.width - self.container_padding[0] * 2 - self.margin[0] * (self.cols - 1);
        f64::from(usable) / f64::from(self.cols)
    }

    /// Pixel rectangle of a grid item as `(left, top, width, height)`.
    #[must_use]
    pub fn item_rect(&self, x: i32, y: i32, w: i32, h: i32) -> (f64, f64, f64, f64) {
        let col_w = self.col_width();
        let left = f64::from(self.container_padding[0]) + f64::from(x) * (col_w + f64::from(self.margin[0]));
        let top = f64::from(self.container_padding[1]) + f64::from(y) * f64::from(self.row_height + self.margin[1]);
        let width = col_w * f64::from(w) + f64::from(self.margin[0] * (w - 1).max(0));
        let height = f64::from(self.row_height * h + self.margin[1] * (h - 1).max(0));
        (left, top, width, height)
    }

    /// Total surface height in pixels for the given number of occupied
    /// rows. An empty surface still renders one row band.
    #[must_use]
    pub fn surface_height(&self, rows: i32) -> i32 {
        let rows = rows.max(1);
        self.container_padding[1] * 2 + self.row_height * rows + self.margin[1] * (rows - 1)
    }
}

/// Geometry reported by the grid widget for one item after a drag or
/// resize pass. Matched to cells by `id` during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}
