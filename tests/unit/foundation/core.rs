use super::*;

#[test]
fn frame_range_validation_and_len() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert!(r.contains(FrameIndex(2)));
    assert!(!r.contains(FrameIndex(5)));
    assert!(FrameRange::from_duration(0).is_empty());
}

#[test]
fn fps_conversions() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::whole(30);
    assert_eq!(fps, Fps::new(30, 1).unwrap());
    assert!((fps.frames_to_secs(45) - 1.5).abs() < 1e-12);
    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn canvas_rejects_degenerate_sizes() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(1920, 1080).unwrap();
    assert_eq!(c.rgba8_len(), 1920 * 1080 * 4);
}
