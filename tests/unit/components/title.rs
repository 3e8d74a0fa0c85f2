use super::*;
use crate::foundation::core::{Fps, FrameIndex};

fn params(text: &str) -> AnimationParams {
    AnimationParams {
        text: text.to_string(),
        ..AnimationParams::default()
    }
}

fn ctx(frame: u64) -> FrameContext {
    FrameContext::new(frame, Fps::whole(30))
}

struct LinearSpring;

impl SpringFunction for LinearSpring {
    fn sample(&self, frame: FrameIndex, _fps: Fps, config: &SpringConfig) -> f64 {
        assert_eq!(config.damping, TITLE_DAMPING);
        frame.0 as f64 / 10.0
    }
}

#[test]
fn two_lines_at_frame_zero_start_near_zero_scale() {
    let st = TitleAnimator::new().state(&params("A\nB"), ctx(0));
    assert_eq!(st.lines, vec!["A".to_string(), "B".to_string()]);
    assert!(st.scale.abs() < 1e-9);
}

#[test]
fn scale_saturates_past_duration() {
    let anim = TitleAnimator::new();
    for f in [90, 150, 1_000, 100_000] {
        let st = anim.state(&params("x"), ctx(f));
        assert!((st.scale - 1.0).abs() < 1e-3, "frame {f}");
    }
}

#[test]
fn empty_text_renders_no_lines() {
    let anim = TitleAnimator::new();
    assert!(anim.state(&params(""), ctx(5)).lines.is_empty());
    let desc = anim.render(&params(""), ctx(5));
    let Node::Box(block) = &desc.root.children[0] else {
        panic!("expected scaled box");
    };
    assert!(block.children.is_empty());
}

#[test]
fn split_lines_keeps_order_and_blank_lines() {
    assert_eq!(split_lines("a\n\nb\r\nc"), vec!["a", "", "b", "c"]);
    assert_eq!(split_lines("a\n"), vec!["a", ""]);
}

#[test]
fn description_carries_colors_and_scale() {
    let mut p = params("Hello\nWorld");
    p.title_color = "#ff0000".to_string();
    p.bg_color = "#00ff00".to_string();
    let desc = TitleAnimator::with_spring(LinearSpring).render(&p, ctx(5));

    assert_eq!(desc.background, "#00ff00");
    assert_eq!(desc.root.anchor, Anchor::Center);
    let Node::Box(block) = &desc.root.children[0] else {
        panic!("expected scaled box");
    };
    assert!((block.scale - 0.5).abs() < 1e-12);
    assert_eq!(block.children.len(), 2);
    for (child, expected) in block.children.iter().zip(["Hello", "World"]) {
        let Node::Text(t) = child else {
            panic!("expected text line");
        };
        assert_eq!(t.content, expected);
        assert_eq!(t.style.color, "#ff0000");
        assert_eq!(t.style.family, FontFamily::SansSerif);
        assert_eq!(t.style.size_px, TITLE_FONT_SIZE_PX);
    }
}

#[test]
fn render_is_idempotent() {
    let anim = TitleAnimator::new();
    let p = params("Welcome to\nBusiness Automation");
    for f in [0, 7, 42, 149] {
        assert_eq!(anim.render(&p, ctx(f)), anim.render(&p, ctx(f)));
    }
}
