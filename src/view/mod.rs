//! Serializable markup/style tree produced by components for one frame.
//!
//! A [`VisualDescription`] is plain data: it carries CSS color strings and pixel metrics and is
//! only interpreted by a [`crate::Renderer`].

/// CSS color parsing.
pub mod color;

use serde::{Deserialize, Serialize};

/// Everything needed to draw one frame of a component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualDescription {
    /// Canvas background as a CSS color string.
    pub background: String,
    /// Root container, laid out against the full canvas.
    pub root: BoxNode,
}

/// Node in the visual tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Nested container.
    Box(BoxNode),
    /// Run of text, split into lines on `\n`.
    Text(TextNode),
    /// Solid inline block placed after the preceding text.
    Block(BlockNode),
}

/// Where a box's content sits inside the area it is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Centered on both axes.
    Center,
    /// Pinned to the top-left padding corner.
    TopLeft,
}

/// Horizontal alignment of lines within a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Lines start at the left edge.
    Start,
    /// Lines are centered.
    Center,
}

/// Stacking container.
///
/// Children are stacked top to bottom, except [`Node::Block`] which continues the previous line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxNode {
    /// Content placement within the available area.
    pub anchor: Anchor,
    /// Line alignment for child text and boxes.
    pub text_align: TextAlign,
    /// Uniform inner padding in pixels.
    pub padding_px: f32,
    /// Uniform visual scale about the box center. Does not affect layout.
    pub scale: f64,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl BoxNode {
    /// Unscaled, unpadded box with the given placement.
    pub fn new(anchor: Anchor, text_align: TextAlign) -> Self {
        Self {
            anchor,
            text_align,
            padding_px: 0.0,
            scale: 1.0,
            children: Vec::new(),
        }
    }
}

/// Generic font class; resolved to a concrete face by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Helvetica/Arial-like sans-serif.
    SansSerif,
    /// Consolas/Monaco-like monospace.
    Monospace,
}

/// Whitespace handling, following CSS `white-space`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhiteSpace {
    /// Collapse runs of spaces; empty lines take no height.
    Normal,
    /// Keep spaces verbatim; empty lines keep their line height.
    PreWrap,
}

/// Text styling for a [`TextNode`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Fill color as a CSS color string.
    pub color: String,
    /// Font class.
    pub family: FontFamily,
    /// Font size in pixels.
    pub size_px: f32,
    /// Bold weight.
    pub bold: bool,
    /// Line height as a multiple of `size_px`; `None` uses the font's own metrics.
    pub line_height: Option<f32>,
    /// Whitespace mode.
    pub white_space: WhiteSpace,
}

/// Text content with a style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    /// Text; `\n` starts a new line.
    pub content: String,
    /// Style applied to every line.
    pub style: TextStyle,
}

/// Solid rectangle flowing inline after the preceding text, vertically centered on its line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Width in pixels.
    pub width_px: f32,
    /// Height in pixels.
    pub height_px: f32,
    /// Gap to the preceding text in pixels.
    pub margin_left_px: f32,
    /// Fill color as a CSS color string.
    pub color: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}
