use crate::animation::spring::{DampedSpring, SpringConfig, SpringFunction};
use crate::components::{Component, FrameContext};
use crate::composition::params::AnimationParams;
use crate::view::{
    Anchor, BoxNode, FontFamily, Node, TextAlign, TextNode, TextStyle, VisualDescription,
    WhiteSpace,
};

/// Damping coefficient of the title's entrance spring.
pub const TITLE_DAMPING: f64 = 10.0;
/// Title font size in pixels (7em on a 16px base).
pub const TITLE_FONT_SIZE_PX: f32 = 112.0;

/// Derived per-frame state of the title card.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleState {
    /// Uniform scale applied to the whole text block.
    pub scale: f64,
    /// Text lines in order.
    pub lines: Vec<String>,
}

/// Centered title that springs from scale 0 to 1.
#[derive(Clone, Debug)]
pub struct TitleAnimator<S = DampedSpring> {
    spring: S,
    config: SpringConfig,
}

impl TitleAnimator<DampedSpring> {
    /// Title animator with closed-form spring physics.
    pub fn new() -> Self {
        Self::with_spring(DampedSpring)
    }
}

impl Default for TitleAnimator<DampedSpring> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SpringFunction> TitleAnimator<S> {
    /// Title animator driven by a caller-provided spring function.
    pub fn with_spring(spring: S) -> Self {
        Self {
            spring,
            config: SpringConfig::with_damping(TITLE_DAMPING),
        }
    }

    /// Spring configuration used for the entrance.
    pub fn spring_config(&self) -> &SpringConfig {
        &self.config
    }

    /// Compute the scale and line split for `ctx`.
    pub fn state(&self, params: &AnimationParams, ctx: FrameContext) -> TitleState {
        TitleState {
            scale: self
                .spring
                .sample(ctx.frame, ctx.fps, &self.config)
                .max(0.0),
            lines: split_lines(&params.text),
        }
    }
}

impl<S: SpringFunction> Component for TitleAnimator<S> {
    fn render(&self, params: &AnimationParams, ctx: FrameContext) -> VisualDescription {
        let state = self.state(params, ctx);
        let style = TextStyle {
            color: params.title_color.clone(),
            family: FontFamily::SansSerif,
            size_px: TITLE_FONT_SIZE_PX,
            bold: true,
            line_height: None,
            white_space: WhiteSpace::Normal,
        };

        let mut block = BoxNode::new(Anchor::Center, TextAlign::Center);
        block.scale = state.scale;
        block.children = state
            .lines
            .into_iter()
            .map(|line| {
                Node::Text(TextNode {
                    content: line,
                    style: style.clone(),
                })
            })
            .collect();

        let mut root = BoxNode::new(Anchor::Center, TextAlign::Center);
        root.children.push(Node::Box(block));

        VisualDescription {
            background: params.bg_color.clone(),
            root,
        }
    }
}

/// Split on `\n` keeping order; a trailing `\r` per line is dropped. Empty text has no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/components/title.rs"]
mod tests;
