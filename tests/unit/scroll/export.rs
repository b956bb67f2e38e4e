use super::*;
use crate::raster::DimensionQuery;

/// Rasterizer that must never be reached.
struct Unreachable;

impl VectorRasterizer for Unreachable {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    fn export_area(&self, _svg: &Path, _rect: &Rect, _out: &Path) -> ScrollResult<()> {
        panic!("raster sources must not hit the rasterizer")
    }

    fn query(&self, _svg: &Path, _query: DimensionQuery) -> ScrollResult<f64> {
        panic!("raster sources must not hit the rasterizer")
    }
}

/// Rasterizer that always fails, leaving a stray partial file behind.
struct Broken;

impl VectorRasterizer for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn export_area(&self, svg: &Path, rect: &Rect, out: &Path) -> ScrollResult<()> {
        std::fs::write(out, b"partial").unwrap();
        Err(ScrollError::tool_unavailable(
            format!("exporting {rect} of '{}' to '{}'", svg.display(), out.display()),
            "exit status: 1",
        ))
    }

    fn query(&self, _svg: &Path, _query: DimensionQuery) -> ScrollResult<f64> {
        Ok(0.0)
    }
}

/// 4 px wide, one distinct color per row.
fn row_gradient(rows: u32) -> image::RgbaImage {
    image::RgbaImage::from_fn(4, rows, |_, y| image::Rgba([y as u8, 0, 255 - y as u8, 255]))
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("scrollvid-export-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn crop_is_exactly_the_viewport() {
    let full = row_gradient(50);
    let rect = Rect::at_origin(4, 10).unwrap().shifted_down(7.0);
    let frame = crop(&full, &rect).unwrap();
    assert_eq!(frame.dimensions(), (4, 10));
    assert_eq!(frame.get_pixel(0, 0).0[0], 7);
    assert_eq!(frame.get_pixel(3, 9).0[0], 16);
}

#[test]
fn crop_snaps_fractional_origins() {
    let full = row_gradient(50);
    let rect = Rect::at_origin(4, 10).unwrap().shifted_down(7.5);
    let frame = crop(&full, &rect).unwrap();
    assert_eq!(frame.get_pixel(0, 0).0[0], 8);
}

#[test]
fn crop_past_the_cache_is_an_error() {
    let full = row_gradient(20);
    let inside = Rect::at_origin(4, 10).unwrap().shifted_down(10.0);
    assert!(crop(&full, &inside).is_ok());
    let outside = inside.shifted_down(1.0);
    assert!(crop(&full, &outside).is_err());
    let too_wide = Rect::at_origin(5, 10).unwrap();
    assert!(crop(&full, &too_wide).is_err());
}

#[test]
fn buffer_and_raster_file_sources_agree() {
    let dir = scratch("agree");
    let full = row_gradient(64);
    let full_path = dir.join("full.png");
    full.save(&full_path).unwrap();

    let rect = Rect::at_origin(4, 16).unwrap().shifted_down(21.0);
    let from_buf = dir.join("buf.png");
    let from_file = dir.join("file.png");
    export_area(&rect, &AreaSource::Buffer(full), &from_buf, &Unreachable).unwrap();
    export_area(&rect, &AreaSource::RasterFile(full_path), &from_file, &Unreachable).unwrap();

    let a = image::open(&from_buf).unwrap().to_rgba8();
    let b = image::open(&from_file).unwrap().to_rgba8();
    assert_eq!(a.dimensions(), (4, 16));
    assert_eq!(a, b);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_export_leaves_nothing_behind() {
    let dir = scratch("broken");
    let out = dir.join("000003.png");
    let rect = Rect::at_origin(4, 4).unwrap();
    let err = export_area(
        &rect,
        &AreaSource::Vector(PathBuf::from("in.svg")),
        &out,
        &Broken,
    )
    .unwrap_err();
    assert!(matches!(err, ScrollError::ExternalToolFailure { .. }));
    assert!(err.to_string().contains("in.svg"));
    assert!(!out.exists());

    let _ = std::fs::remove_dir_all(&dir);
}
