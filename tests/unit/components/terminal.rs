use super::*;
use crate::foundation::core::Fps;

fn params(text: &str) -> AnimationParams {
    AnimationParams {
        text: text.to_string(),
        ..AnimationParams::default()
    }
}

fn state(text: &str, frame: u64) -> TerminalState {
    TerminalTyper.state(&params(text), FrameContext::new(frame, Fps::whole(30)))
}

#[test]
fn hello_scenarios() {
    let s = state("HELLO", 0);
    assert_eq!((s.chars_shown, s.revealed.as_str()), (0, ""));
    assert!(s.cursor_visible);

    let s = state("HELLO", 4);
    assert_eq!((s.chars_shown, s.revealed.as_str()), (4, "HELL"));

    let s = state("HELLO", 20);
    assert_eq!((s.chars_shown, s.revealed.as_str()), (5, "HELLO"));

    assert!(!state("HELLO", 16).cursor_visible);
}

#[test]
fn reveal_is_clamped_and_monotonic() {
    let text = "ab\ncd ef";
    let len = text.chars().count();
    let mut prev = 0;
    for f in 0..200u64 {
        let n = chars_shown(text, f);
        let expected = ((f as f64 * 1.5).floor() as usize).min(len);
        assert_eq!(n, expected, "frame {f}");
        assert!(n >= prev);
        prev = n;
    }
    assert_eq!(chars_shown(text, u64::MAX), len);
    assert_eq!(chars_shown("", 10), 0);
}

#[test]
fn reveal_counts_chars_not_bytes() {
    let s = state("héllo→", 2);
    assert_eq!(s.revealed, "hél");
    assert_eq!(state("héllo→", 100).revealed, "héllo→");
}

#[test]
fn line_breaks_are_kept_literally() {
    assert_eq!(state("ab\ncd", 2).revealed, "ab\n");
}

#[test]
fn cursor_blinks_with_period_thirty() {
    for f in 0..300u64 {
        assert_eq!(cursor_visible(f), (f / 15) % 2 == 0, "frame {f}");
        assert_eq!(cursor_visible(f), cursor_visible(f + 30));
    }
    assert_eq!((0..30).filter(|f| cursor_visible(*f)).count(), 15);
}

#[test]
fn presentation_ignores_param_colors() {
    let mut p = params("hi");
    p.title_color = "#0000ff".to_string();
    p.bg_color = "#ff00ff".to_string();
    let desc = TerminalTyper.render(&p, FrameContext::new(16, Fps::whole(30)));

    assert_eq!(desc.background, TERMINAL_BG);
    assert_eq!(desc.root.anchor, Anchor::TopLeft);
    assert_eq!(desc.root.padding_px, TERMINAL_PADDING_PX);
    let [Node::Text(text), Node::Block(cursor)] = desc.root.children.as_slice() else {
        panic!("expected text + cursor");
    };
    assert_eq!(text.content, "hi");
    assert_eq!(text.style.color, TERMINAL_FG);
    assert_eq!(text.style.white_space, WhiteSpace::PreWrap);
    assert_eq!(cursor.color, TERMINAL_FG);
    assert_eq!(cursor.opacity, 0.0);
}

#[test]
fn render_is_idempotent() {
    let p = params("echo hello");
    for f in [0, 5, 15, 29, 400] {
        let ctx = FrameContext::new(f, Fps::whole(30));
        assert_eq!(TerminalTyper.render(&p, ctx), TerminalTyper.render(&p, ctx));
    }
}
