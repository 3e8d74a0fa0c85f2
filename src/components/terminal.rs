use crate::components::{Component, FrameContext};
use crate::composition::params::AnimationParams;
use crate::view::{
    Anchor, BlockNode, BoxNode, FontFamily, Node, TextAlign, TextNode, TextStyle,
    VisualDescription, WhiteSpace,
};

/// Characters revealed per frame.
pub const CHARS_PER_FRAME: f64 = 1.5;
/// Frames per cursor phase; the cursor is on for one phase and off for the next.
pub const CURSOR_HALF_PERIOD_FRAMES: u64 = 15;

/// Terminal background. Fixed: the terminal look ignores `bgColor`.
pub const TERMINAL_BG: &str = "#1e1e1e";
/// Terminal text and cursor color. Fixed: the terminal look ignores `titleColor`.
pub const TERMINAL_FG: &str = "#33ff00";
/// Terminal font size in pixels (2.5em on a 16px base).
pub const TERMINAL_FONT_SIZE_PX: f32 = 40.0;
/// Line height multiplier.
pub const TERMINAL_LINE_HEIGHT: f32 = 1.4;
/// Padding around the terminal text in pixels.
pub const TERMINAL_PADDING_PX: f32 = 40.0;

/// Derived per-frame state of the terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalState {
    /// Number of characters revealed.
    pub chars_shown: usize,
    /// The revealed prefix of the text.
    pub revealed: String,
    /// Whether the cursor is drawn this frame.
    pub cursor_visible: bool,
}

/// Text typed out character by character behind a blinking block cursor.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalTyper;

impl TerminalTyper {
    /// Compute the reveal and cursor state for `ctx`.
    pub fn state(&self, params: &AnimationParams, ctx: FrameContext) -> TerminalState {
        let chars_shown = chars_shown(&params.text, ctx.frame.0);
        TerminalState {
            chars_shown,
            revealed: params.text.chars().take(chars_shown).collect(),
            cursor_visible: cursor_visible(ctx.frame.0),
        }
    }
}

impl Component for TerminalTyper {
    fn render(&self, params: &AnimationParams, ctx: FrameContext) -> VisualDescription {
        let state = self.state(params, ctx);

        let mut root = BoxNode::new(Anchor::TopLeft, TextAlign::Start);
        root.padding_px = TERMINAL_PADDING_PX;
        root.children.push(Node::Text(TextNode {
            content: state.revealed,
            style: TextStyle {
                color: TERMINAL_FG.to_string(),
                family: FontFamily::Monospace,
                size_px: TERMINAL_FONT_SIZE_PX,
                bold: true,
                line_height: Some(TERMINAL_LINE_HEIGHT),
                white_space: WhiteSpace::PreWrap,
            },
        }));
        root.children.push(Node::Block(BlockNode {
            width_px: 0.6 * TERMINAL_FONT_SIZE_PX,
            height_px: TERMINAL_FONT_SIZE_PX,
            margin_left_px: 5.0,
            color: TERMINAL_FG.to_string(),
            opacity: if state.cursor_visible { 1.0 } else { 0.0 },
        }));

        VisualDescription {
            background: TERMINAL_BG.to_string(),
            root,
        }
    }
}

/// `floor(frame * 1.5)` clamped to the character length of `text`.
pub fn chars_shown(text: &str, frame: u64) -> usize {
    let typed = (frame as f64 * CHARS_PER_FRAME).floor();
    let len = text.chars().count();
    if typed >= len as f64 {
        len
    } else {
        typed as usize
    }
}

/// Square-wave blink: visible while `floor(frame / 15)` is even.
pub fn cursor_visible(frame: u64) -> bool {
    (frame / CURSOR_HALF_PERIOD_FRAMES).is_multiple_of(2)
}

#[cfg(test)]
#[path = "../../tests/unit/components/terminal.rs"]
mod tests;
