use super::*;
use crate::foundation::core::Fps;

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("textreel_png_{tag}_{}", std::process::id()))
}

fn frame(rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: [rgba, rgba].concat(),
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::whole(30),
    }
}

#[test]
fn frame_names_are_zero_padded() {
    assert_eq!(frame_file_name(FrameIndex(0)), "frame_000000.png");
    assert_eq!(frame_file_name(FrameIndex(1234)), "frame_001234.png");
}

#[test]
fn writes_one_png_per_frame_with_straight_alpha() {
    let dir = temp_dir("seq");
    let mut sink = PngSequenceSink::new(&dir, true);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &frame([255, 0, 0, 255])).unwrap();
    sink.push_frame(FrameIndex(4), &frame([64, 0, 0, 128])).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames_written(), 2);

    let opaque = image::open(dir.join("frame_000003.png")).unwrap().to_rgba8();
    assert_eq!(opaque.get_pixel(1, 0).0, [255, 0, 0, 255]);
    let half = image::open(dir.join("frame_000004.png")).unwrap().to_rgba8();
    assert_eq!(half.get_pixel(0, 0).0, [128, 0, 0, 128]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rejects_out_of_order_and_mismatched_frames() {
    let dir = temp_dir("order");
    let mut sink = PngSequenceSink::new(&dir, true);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(2), &frame([0, 0, 0, 255])).unwrap();
    assert!(sink.push_frame(FrameIndex(2), &frame([0, 0, 0, 255])).is_err());

    let wrong = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 255],
        premultiplied: true,
    };
    assert!(matches!(
        sink.push_frame(FrameIndex(5), &wrong),
        Err(ReelError::Validation(_))
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_png_respects_overwrite_flag() {
    let dir = temp_dir("overwrite");
    let path = dir.join("still.png");
    write_png(&path, &frame([0, 255, 0, 255]), true).unwrap();
    let err = write_png(&path, &frame([0, 0, 255, 255]), false).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));

    let kept = image::open(&path).unwrap().to_rgba8();
    assert_eq!(kept.get_pixel(0, 0).0, [0, 255, 0, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn end_without_begin_is_an_error() {
    let mut sink = PngSequenceSink::new(temp_dir("unused"), true);
    assert!(sink.end().is_err());
}
