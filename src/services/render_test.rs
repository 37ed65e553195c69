use super::*;
use crate::state::test_helpers::dummy_cell;

fn decode(bytes: &[u8]) -> tiny_skia::Pixmap {
    tiny_skia::Pixmap::decode_png(bytes).expect("PNG should decode")
}

#[test]
fn empty_surface_renders_at_double_density() {
    let grid = GridConfig::DEFAULT;
    let bytes = render_png(&[], &grid, "#ff0000", "#0000ff", RENDER_SCALE).unwrap();

    let pixmap = decode(&bytes);
    assert_eq!(pixmap.width(), 2400);
    // One row band floor: (2*1 padding + 15) * 2.
    assert_eq!(pixmap.height(), 34);
}

#[test]
fn surface_honors_the_background_color() {
    let grid = GridConfig::DEFAULT;
    let bytes = render_png(&[], &grid, "#ff0000", "#0000ff", RENDER_SCALE).unwrap();

    let pixmap = decode(&bytes);
    let px = pixmap.pixel(pixmap.width() / 2, pixmap.height() / 2).unwrap();
    assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (255, 0, 0, 255));
}

#[test]
fn cell_fill_lands_where_the_grid_math_says() {
    let grid = GridConfig::DEFAULT;
    let mut cell = dummy_cell("1700000000000");
    cell.background_color = "#00ff00".into();
    cell.name = "A".into();

    let bytes = render_png(&[cell], &grid, "#ff0000", "#0000ff", RENDER_SCALE).unwrap();
    let pixmap = decode(&bytes);

    // Surface grows to the occupied rows: (2 + 150 + 9) * 2.
    assert_eq!(pixmap.height(), 322);

    // (11, 11) unscaled is inside the cell body, clear of the 2px border
    // and the rounded corner.
    let inside = pixmap.pixel(22, 22).unwrap();
    assert_eq!((inside.red(), inside.green(), inside.blue()), (0, 255, 0));

    // Far right of the surface is still background.
    let background = pixmap.pixel(2300, 160).unwrap();
    assert_eq!((background.red(), background.green(), background.blue()), (255, 0, 0));
}

#[test]
fn unit_scale_renders_native_size() {
    let grid = GridConfig::DEFAULT;
    let bytes = render_png(&[], &grid, "#ffffff", "#93c5fd", 1.0).unwrap();
    let pixmap = decode(&bytes);
    assert_eq!((pixmap.width(), pixmap.height()), (1200, 17));
}

#[test]
fn labels_are_xml_escaped() {
    let grid = GridConfig::DEFAULT;
    let mut cell = dummy_cell("1700000000000");
    cell.name = "Weld & <Paint> \"shop\"".into();

    // The document must still parse and render.
    let bytes = render_png(&[cell], &grid, "#ffffff", "#93c5fd", 1.0).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(escape_text("a & b < c > d"), "a &amp; b &lt; c &gt; d");
    assert_eq!(escape_attr(r#"x" onload='y'"#), "x&quot; onload=&apos;y&apos;");
}

#[test]
fn surface_svg_carries_rotation_about_the_label_center() {
    let grid = GridConfig::DEFAULT;
    let mut cell = dummy_cell("1700000000000");
    cell.text_rotation = 90;

    let svg = surface_svg(&[cell], &grid, "#ffffff", "#93c5fd", grid.surface_height(10));
    assert!(svg.contains("rotate(90 "), "missing label rotation: {svg}");
}
