use super::*;
use crate::components::{Component, FrameContext};
use crate::components::terminal::TerminalTyper;
use crate::components::title::TitleAnimator;
use crate::composition::params::AnimationParams;
use crate::foundation::core::Fps;

fn no_font_renderer() -> CpuRenderer {
    CpuRenderer::new(CpuRendererOptions {
        fonts: FontOptions {
            system_fonts: false,
            font_dirs: Vec::new(),
            sans_serif_file: None,
            monospace_file: None,
        },
    })
}

fn params(text: &str, bg: &str) -> AnimationParams {
    AnimationParams {
        text: text.to_string(),
        bg_color: bg.to_string(),
        ..AnimationParams::default()
    }
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [frame.data[i], frame.data[i + 1], frame.data[i + 2], frame.data[i + 3]]
}

#[test]
fn background_fills_the_whole_canvas() {
    let desc = TitleAnimator::new().render(
        &params("", "#ff0000"),
        FrameContext::new(10, Fps::whole(30)),
    );
    let frame = no_font_renderer()
        .render(&desc, Canvas::new(64, 32).unwrap())
        .unwrap();

    assert_eq!((frame.width, frame.height), (64, 32));
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 64 * 32 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));
}

#[test]
fn terminal_cursor_pixels_follow_blink_phase() {
    let mut r = no_font_renderer();
    let canvas = Canvas::new(200, 150).unwrap();
    let p = params("", "#ffffff");

    let on = TerminalTyper.render(&p, FrameContext::new(0, Fps::whole(30)));
    let off = TerminalTyper.render(&p, FrameContext::new(16, Fps::whole(30)));
    let on = r.render(&on, canvas).unwrap();
    let off = r.render(&off, canvas).unwrap();

    // Cursor box spans (45, 48)..(69, 88).
    assert_eq!(pixel(&on, 57, 68), [0x33, 0xff, 0x00, 255]);
    assert_eq!(pixel(&off, 57, 68), [0x1e, 0x1e, 0x1e, 255]);
    assert_eq!(pixel(&on, 120, 120), [0x1e, 0x1e, 0x1e, 255]);
    assert_eq!(pixel(&on, 5, 5), [0x1e, 0x1e, 0x1e, 255]);
}

#[test]
fn context_is_rebuilt_when_canvas_size_changes() {
    let mut r = no_font_renderer();
    let desc = TitleAnimator::new().render(
        &params("", "#0000ff"),
        FrameContext::new(0, Fps::whole(30)),
    );
    let a = r.render(&desc, Canvas::new(16, 8).unwrap()).unwrap();
    let b = r.render(&desc, Canvas::new(8, 16).unwrap()).unwrap();
    let c = r.render(&desc, Canvas::new(16, 8).unwrap()).unwrap();

    assert_eq!((b.width, b.height), (8, 16));
    assert_eq!(a, c);
    assert!(b.data.chunks_exact(4).all(|px| px == [0, 0, 255, 255]));
}

#[test]
fn text_without_fonts_reports_font_error() {
    let desc = TitleAnimator::new().render(
        &params("Hello", "#ffffff"),
        FrameContext::new(30, Fps::whole(30)),
    );
    let err = no_font_renderer()
        .render(&desc, Canvas::new(64, 64).unwrap())
        .unwrap_err();
    assert!(matches!(err, ReelError::Font(_)), "{err:?}");
}

#[test]
fn worker_options_mirror_construction() {
    let r = no_font_renderer();
    let opts = r.worker_options().unwrap();
    assert!(!opts.fonts.system_fonts);
    assert!(opts.fonts.font_dirs.is_empty());
}
