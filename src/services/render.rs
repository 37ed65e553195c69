//! Rasterization — the grid surface as PNG bytes.
//!
//! DESIGN
//! ======
//! The surface is drawn as an SVG document (background, one bordered rect
//! and centered rotated label per cell), parsed with usvg against the
//! system font database, rendered with resvg into a tiny-skia pixmap at
//! the requested scale, and encoded as PNG. Only printable layers exist
//! server-side; the browser's interactive controls never reach the output.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::cell::Cell;
use crate::grid::GridConfig;

/// Pixel density multiplier for PNG downloads.
pub const RENDER_SCALE: f32 = 2.0;

const LABEL_FONT_SIZE: f64 = 18.0;
const CELL_CORNER_RADIUS: f64 = 8.0;
const CELL_BORDER_WIDTH: f64 = 2.0;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface SVG rejected: {0}")]
    Svg(#[from] usvg::Error),
    #[error("pixmap allocation failed for {width}x{height}")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

impl RenderError {
    /// Grepable code for logs and structured error bodies.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Svg(_) => "E_RENDER_SVG",
            Self::PixmapAlloc { .. } => "E_RENDER_ALLOC",
            Self::Png(_) => "E_RENDER_ENCODE",
        }
    }
}

/// Rasterize the full surface to PNG bytes at `scale` pixel density,
/// honoring the current background and border colors.
///
/// # Errors
///
/// Returns `Svg` when the generated document is rejected, `PixmapAlloc`
/// when the target bitmap cannot be allocated, and `Png` on encode
/// failure.
pub fn render_png(
    cells: &[Cell],
    grid: &GridConfig,
    background_color: &str,
    border_color: &str,
    scale: f32,
) -> Result<Vec<u8>, RenderError> {
    let rows = cells.iter().map(|cell| cell.y + cell.h).max().unwrap_or(0);
    let surface_height = grid.surface_height(rows);
    let svg = surface_svg(cells, grid, background_color, border_color, surface_height);

    let mut options = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    options.fontdb = Arc::new(fontdb);

    let tree = usvg::Tree::from_str(&svg, &options)?;

    let width_px = scale_dim(grid.width, scale);
    let height_px = scale_dim(surface_height, scale);
    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px)
        .ok_or(RenderError::PixmapAlloc { width: width_px, height: height_px })?;
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap.encode_png()?)
}

/// Build the surface SVG. Labels are XML-escaped; colors pass through as
/// attribute values.
fn surface_svg(
    cells: &[Cell],
    grid: &GridConfig,
    background_color: &str,
    border_color: &str,
    surface_height: i32,
) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = grid.width,
        h = surface_height,
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{bg}"/>"#,
        w = grid.width,
        h = surface_height,
        bg = escape_attr(background_color),
    );

    for cell in cells {
        let (left, top, box_w, box_h) = grid.item_rect(cell.x, cell.y, cell.w, cell.h);
        let _ = write!(
            svg,
            r#"<rect x="{left:.2}" y="{top:.2}" width="{box_w:.2}" height="{box_h:.2}" rx="{CELL_CORNER_RADIUS}" fill="{fill}" stroke="{stroke}" stroke-width="{CELL_BORDER_WIDTH}"/>"#,
            fill = escape_attr(&cell.background_color),
            stroke = escape_attr(border_color),
        );

        let cx = left + box_w / 2.0;
        let cy = top + box_h / 2.0;
        let _ = write!(
            svg,
            r#"<text x="{cx:.2}" y="{cy:.2}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-size="{LABEL_FONT_SIZE}" font-weight="600" fill="{fill}" transform="rotate({rot} {cx:.2} {cy:.2})">{label}</text>"#,
            fill = escape_attr(&cell.text_color),
            rot = cell.text_rotation,
            label = escape_text(&cell.name),
        );
    }

    svg.push_str("</svg>");
    svg
}

fn scale_dim(dim: i32, scale: f32) -> u32 {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let px = (dim as f32 * scale).round() as u32;
    px.max(1)
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
