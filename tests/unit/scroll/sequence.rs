use super::*;

// Yellow bar of the reference drawing, in px.
const BAR_TOP_Y: f64 = 1119.626;
const BAR_HEIGHT: f64 = 3058.242;

fn hd_sequence(drawing_height: f64, pace: f64) -> FrameSequence {
    let advance = advance_px_per_frame(1080, pace, 30).unwrap();
    FrameSequence::new(Rect::at_origin(1920, 1080).unwrap(), drawing_height, advance).unwrap()
}

#[test]
fn advance_is_linear_in_height_and_inverse_in_pace_and_fps() {
    assert_eq!(advance_px_per_frame(100, 1.0, 1).unwrap(), 100.0);
    assert_eq!(advance_px_per_frame(100, 10.0, 1).unwrap(), 10.0);
    assert_eq!(advance_px_per_frame(100, 1.0, 10).unwrap(), 10.0);
    assert_eq!(advance_px_per_frame(200, 1.0, 10).unwrap(), 20.0);
    assert_eq!(advance_px_per_frame(1080, 1.0, 30).unwrap(), 36.0);
}

#[test]
fn advance_rejects_degenerate_inputs() {
    for pace in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            advance_px_per_frame(100, pace, 30),
            Err(ScrollError::InvalidConfiguration(_))
        ));
    }
    assert!(matches!(
        advance_px_per_frame(100, 1.0, 0),
        Err(ScrollError::InvalidConfiguration(_))
    ));
}

#[test]
fn frame_zero_is_the_origin_viewport() {
    let seq = hd_sequence(5000.0, 1.0);
    let first = seq.frame_rect(FrameIndex(0)).unwrap();
    assert_eq!((first.x1(), first.y1()), (0.0, 0.0));
    assert_eq!((first.x2(), first.y2()), (1920.0, 1080.0));
}

#[test]
fn reference_drawing_needs_118_frames_and_clears_the_content() {
    let height = (BAR_TOP_Y + BAR_HEIGHT).ceil();
    assert_eq!(height, 4178.0);

    let seq = hd_sequence(height, 1.0);
    assert_eq!(seq.advance_px(), 36.0);
    assert_eq!(seq.estimated_frame_count(), 118);

    let last = seq.last_frame_rect();
    assert!(last.y1() > BAR_TOP_Y + BAR_HEIGHT);
    assert!(last.y1() > height);
    assert_eq!(last.y1(), 117.0 * 36.0);
}

#[test]
fn slower_pace_needs_proportionally_more_frames() {
    let fast = hd_sequence(4178.0, 1.0);
    let slow = hd_sequence(4178.0, 8.0);
    assert_eq!(slow.advance_px(), 4.5);
    // ceil(4178 / 4.5) + 1
    assert_eq!(slow.estimated_frame_count(), 930);
    assert!(slow.estimated_frame_count() > 7 * fast.estimated_frame_count());
}

#[test]
fn exact_multiple_of_advance_still_ends_on_an_empty_frame() {
    let seq = hd_sequence(3600.0, 1.0);
    assert_eq!(seq.estimated_frame_count(), 101);

    let last = seq.last_frame_rect();
    let before = seq.frame_rect(FrameIndex(99)).unwrap();
    // Half-open rows: the last frame starts at the first row below the drawing.
    assert_eq!(last.y1(), 3600.0);
    assert!(before.y1() < 3600.0);
    assert!(before.y2() > 3600.0);
}

#[test]
fn frame_rects_are_deterministic_and_bounded() {
    let seq = hd_sequence(4178.0, 1.0);
    let a = seq.frame_rect(FrameIndex(42)).unwrap();
    let b = seq.frame_rect(FrameIndex(42)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.y1(), 42.0 * 36.0);

    assert!(seq.frame_rect(FrameIndex(118)).is_err());

    let all: Vec<_> = seq.iter().collect();
    assert_eq!(all.len(), 118);
    assert_eq!(all[42], (FrameIndex(42), a));
    assert_eq!(all.last().unwrap().1, seq.last_frame_rect());
}

#[test]
fn cover_rect_contains_every_frame() {
    let seq = hd_sequence(4178.0, 8.0);
    let cover = seq.cover_rect().unwrap();
    assert_eq!(cover.width(), 1920);
    assert_eq!((cover.x1(), cover.y1()), (0.0, 0.0));
    for (_, rect) in seq.iter() {
        let (_, y) = rect.pixel_origin();
        assert!(y as f64 + f64::from(rect.height()) <= f64::from(cover.height()));
    }
    let last = seq.last_frame_rect();
    assert_eq!(
        f64::from(cover.height()),
        last.y2().ceil() + f64::from(GUARD_MARGIN_PX)
    );
}

#[test]
fn empty_drawing_yields_a_single_frame() {
    let seq = hd_sequence(0.0, 1.0);
    assert_eq!(seq.estimated_frame_count(), 1);
}

#[test]
fn sequence_rejects_bad_inputs() {
    let origin = Rect::at_origin(10, 10).unwrap();
    assert!(FrameSequence::new(origin, 100.0, 0.0).is_err());
    assert!(FrameSequence::new(origin, -1.0, 1.0).is_err());
    assert!(FrameSequence::new(origin.shifted_down(1.0), 100.0, 1.0).is_err());
}
