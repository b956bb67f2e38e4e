use super::*;

#[test]
fn rect_rejects_zero_sizes() {
    assert!(Rect::at_origin(0, 10).is_err());
    assert!(Rect::at_origin(10, 0).is_err());
    assert!(Rect::new(Point::new(f64::NAN, 0.0), 1, 1).is_err());
}

#[test]
fn rect_corners_follow_size() {
    let r = Rect::new(Point::new(3.0, 4.5), 10, 20).unwrap();
    assert_eq!(r.top_left(), Point::new(3.0, 4.5));
    assert_eq!(r.bottom_right(), Point::new(13.0, 24.5));
    assert_eq!((r.x2(), r.y2()), (13.0, 24.5));
}

#[test]
fn shifted_down_moves_only_the_origin() {
    let r = Rect::at_origin(1920, 1080).unwrap();
    let s = r.shifted_down(36.0);
    assert_eq!(s.x1(), 0.0);
    assert_eq!(s.y1(), 36.0);
    assert_eq!(s.y2(), 1116.0);
    assert_eq!(s.x2(), 1920.0);
    assert_eq!((s.width(), s.height()), (1920, 1080));
    // Pure: the original rect is untouched.
    assert_eq!(r.y1(), 0.0);
}

#[test]
fn pixel_origin_rounds_to_nearest() {
    let r = Rect::at_origin(4, 4).unwrap();
    assert_eq!(r.shifted_down(4.4).pixel_origin(), (0, 4));
    assert_eq!(r.shifted_down(4.5).pixel_origin(), (0, 5));
    assert_eq!(r.shifted_down(4.6).pixel_origin(), (0, 5));
}

#[test]
fn export_area_arg_is_snapped_to_the_crop_grid() {
    let r = Rect::at_origin(1920, 1080).unwrap();
    assert_eq!(r.export_area_arg(), "0:0:1920:1080");
    assert_eq!(r.shifted_down(36.0).export_area_arg(), "0:36:1920:1116");

    let half = r.shifted_down(4.5);
    let (x, y) = half.pixel_origin();
    assert_eq!((x, y), (0, 5));
    assert_eq!(half.export_area_arg(), "0:5:1920:1085");
}

#[test]
fn frame_file_names_are_zero_padded() {
    assert_eq!(FrameIndex(0).file_name(), "000000.png");
    assert_eq!(FrameIndex(117).file_name(), "000117.png");
    assert_eq!(FrameIndex(1_234_567).file_name(), "1234567.png");
}

#[test]
fn deserialized_rects_are_validated() {
    let zero = r#"{"origin":{"x":0.0,"y":0.0},"width":0,"height":1080}"#;
    let err = serde_json::from_str::<Rect>(zero).unwrap_err();
    assert!(err.to_string().contains("width/height must be > 0"), "{err}");

    let ok = r#"{"origin":{"x":0.0,"y":36.0},"width":1920,"height":1080}"#;
    let r: Rect = serde_json::from_str(ok).unwrap();
    assert_eq!(r, Rect::at_origin(1920, 1080).unwrap().shifted_down(36.0));
    assert_eq!(serde_json::from_str::<Rect>(&serde_json::to_string(&r).unwrap()).unwrap(), r);
}
