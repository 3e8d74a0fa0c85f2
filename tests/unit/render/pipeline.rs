use super::*;
use crate::components::ComponentKind;
use crate::composition::params::AnimationParams;
use crate::foundation::core::Canvas;
use crate::render::fonts::FontOptions;

fn terminal_target(duration: u64) -> RenderTarget {
    RenderTarget::new(
        "TinyTerminal",
        ComponentKind::TerminalTyper,
        Canvas {
            width: 96,
            height: 96,
        },
        AnimationParams {
            text: String::new(),
            duration_in_frames: duration,
            ..AnimationParams::default()
        },
    )
}

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

/// Counts calls and encodes the cursor opacity into the first byte.
#[derive(Default)]
struct CountingRenderer {
    calls: usize,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, desc: &VisualDescription, canvas: Canvas) -> ReelResult<FrameRGBA> {
        self.calls += 1;
        let visible = desc.root.children.iter().any(|n| {
            matches!(n, crate::view::Node::Block(b) if b.opacity > 0.0)
        });
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: vec![u8::from(visible); canvas.rgba8_len()],
            premultiplied: true,
        })
    }
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn sink_sees_frames_in_order_with_target_config() {
    let target = terminal_target(40);
    let mut renderer = CountingRenderer::default();
    let mut sink = InMemorySink::new();
    let threading = RenderThreading {
        chunk_size: 7,
        ..RenderThreading::default()
    };

    let stats = render_range(&target, range(5, 40), &mut renderer, &threading, &mut sink).unwrap();

    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 96,
            height: 96,
            fps: target.fps,
        })
    );
    assert!(sink.is_finished());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (5..40).collect::<Vec<_>>());
    for (i, frame) in sink.frames() {
        assert_eq!(frame.data[0], u8::from(crate::cursor_visible(i.0)));
    }
    assert_eq!(stats.frames_total, 35);
    assert_eq!(stats.frames_rendered + stats.frames_elided, 35);
}

#[test]
fn identical_descriptions_render_once_per_chunk() {
    let target = terminal_target(60);
    let mut renderer = CountingRenderer::default();
    let (frames, stats) = render_frames_with_stats(
        &target,
        target.frame_range(),
        &mut renderer,
        &RenderThreading::default(),
    )
    .unwrap();

    assert_eq!(frames.len(), 60);
    assert_eq!(renderer.calls, 2);
    assert_eq!(
        stats,
        RenderStats {
            frames_total: 60,
            frames_rendered: 2,
            frames_elided: 58,
        }
    );

    let mut renderer = CountingRenderer::default();
    let no_elision = RenderThreading {
        static_frame_elision: false,
        ..RenderThreading::default()
    };
    let (_, stats) =
        render_frames_with_stats(&target, target.frame_range(), &mut renderer, &no_elision)
            .unwrap();
    assert_eq!(renderer.calls, 60);
    assert_eq!(stats.frames_elided, 0);
}

#[test]
fn parallel_matches_sequential_bytes() {
    let target = terminal_target(45);
    let sequential = render_frames(&target, target.frame_range(), &mut no_font_renderer()).unwrap();

    let threading = RenderThreading {
        parallel: true,
        chunk_size: 8,
        threads: Some(3),
        static_frame_elision: false,
    };
    let (parallel, stats) = render_frames_with_stats(
        &target,
        target.frame_range(),
        &mut no_font_renderer(),
        &threading,
    )
    .unwrap();

    assert_eq!(stats.frames_rendered, 45);
    assert_eq!(parallel, sequential);
    assert_ne!(sequential[0], sequential[15]);
}

#[test]
fn parallel_requires_worker_options() {
    let target = terminal_target(10);
    let threading = RenderThreading {
        parallel: true,
        ..RenderThreading::default()
    };
    let err = render_range(
        &target,
        target.frame_range(),
        &mut CountingRenderer::default(),
        &threading,
        &mut InMemorySink::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Render(_)), "{err:?}");
}

#[test]
fn invalid_ranges_and_threads_are_rejected() {
    let target = terminal_target(10);
    let mut renderer = CountingRenderer::default();
    let mut sink = InMemorySink::new();

    let empty = FrameRange {
        start: FrameIndex(3),
        end: FrameIndex(3),
    };
    let err = render_range(&target, empty, &mut renderer, &RenderThreading::default(), &mut sink)
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));

    let err = render_range(
        &target,
        range(0, 11),
        &mut renderer,
        &RenderThreading::default(),
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(msg) if msg.contains("duration")));

    let threading = RenderThreading {
        parallel: true,
        threads: Some(0),
        ..RenderThreading::default()
    };
    let err = render_range(
        &target,
        range(0, 10),
        &mut no_font_renderer(),
        &threading,
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert_eq!(renderer.calls, 0);
    assert!(sink.config().is_none());
}

#[test]
fn render_frame_validates_params_and_evaluates_past_duration() {
    let mut target = terminal_target(10);
    let frame = render_frame(&target, FrameIndex(500), &mut CountingRenderer::default()).unwrap();
    assert_eq!(frame.data[0], u8::from(crate::cursor_visible(500)));

    target.params.title_color = "nope".to_string();
    let err = render_frame(&target, FrameIndex(0), &mut CountingRenderer::default()).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}
