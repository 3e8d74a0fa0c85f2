use kurbo::{Affine, Rect};

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::view::color::CssColor;
use crate::view::{
    Anchor, BlockNode, BoxNode, FontFamily, Node, TextAlign, TextNode, TextStyle,
    VisualDescription, WhiteSpace,
};

/// Line height used for empty pre-wrapped lines when the style leaves it to the font.
const FALLBACK_LINE_HEIGHT: f32 = 1.2;

/// One glyph, `x` from the line start and `y` relative to the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShapedGlyph {
    pub(crate) id: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// One visual line produced by shaping (and possibly wrapping) a hard line.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ShapedLine {
    pub(crate) advance: f32,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
    pub(crate) leading: f32,
    pub(crate) glyphs: Vec<ShapedGlyph>,
}

/// Text shaping capability used by [`layout_frame`].
pub(crate) trait TextShaper {
    /// Shape `text` (which contains no `\n`), wrapping at `max_width` pixels.
    fn shape(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: f32,
    ) -> ReelResult<Vec<ShapedLine>>;
}

/// Positioned primitive ready for rasterization.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawItem {
    Glyphs {
        family: FontFamily,
        bold: bool,
        size_px: f32,
        color: CssColor,
        glyphs: Vec<ShapedGlyph>,
        transform: Affine,
    },
    Rect {
        rect: Rect,
        color: CssColor,
        opacity: f32,
        transform: Affine,
    },
}

impl DrawItem {
    fn transformed(self, outer: Affine) -> Self {
        match self {
            Self::Glyphs {
                family,
                bold,
                size_px,
                color,
                glyphs,
                transform,
            } => Self::Glyphs {
                family,
                bold,
                size_px,
                color,
                glyphs,
                transform: outer * transform,
            },
            Self::Rect {
                rect,
                color,
                opacity,
                transform,
            } => Self::Rect {
                rect,
                color,
                opacity,
                transform: outer * transform,
            },
        }
    }
}

/// Background plus draw items in painter's order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FrameLayout {
    pub(crate) background: CssColor,
    pub(crate) items: Vec<DrawItem>,
}

/// Resolve colors and positions for every node of `desc` on `canvas`.
pub(crate) fn layout_frame(
    desc: &VisualDescription,
    canvas: Canvas,
    shaper: &mut dyn TextShaper,
) -> ReelResult<FrameLayout> {
    let background = parse_color(&desc.background, "background")?;
    let laid = layout_box(&desc.root, canvas.width as f32, shaper)?;

    let (x, y) = match desc.root.anchor {
        Anchor::Center => (
            (canvas.width as f32 - laid.width) * 0.5,
            (canvas.height as f32 - laid.height) * 0.5,
        ),
        Anchor::TopLeft => (0.0, 0.0),
    };
    let outer = Affine::translate((f64::from(x), f64::from(y)))
        * scale_about_center(desc.root.scale, laid.width, laid.height);

    Ok(FrameLayout {
        background,
        items: laid
            .items
            .into_iter()
            .map(|item| item.transformed(outer))
            .collect(),
    })
}

struct Laid {
    width: f32,
    height: f32,
    items: Vec<DrawItem>,
}

struct TextRun {
    line: ShapedLine,
    baseline: f32,
    family: FontFamily,
    bold: bool,
    size_px: f32,
    color: CssColor,
}

enum RowContent {
    Text(TextRun),
    Empty,
    Box { laid: Laid, scale: f64 },
}

struct InlineBlock {
    x: f32,
    width: f32,
    height: f32,
    color: CssColor,
    opacity: f32,
}

struct Row {
    width: f32,
    height: f32,
    content: RowContent,
    inline: Vec<InlineBlock>,
}

fn layout_box(node: &BoxNode, avail_width: f32, shaper: &mut dyn TextShaper) -> ReelResult<Laid> {
    let pad = node.padding_px.max(0.0);
    let inner_width = (avail_width - 2.0 * pad).max(0.0);

    let mut rows = Vec::<Row>::new();
    for child in &node.children {
        match child {
            Node::Text(t) => push_text_rows(&mut rows, t, inner_width, shaper)?,
            Node::Block(b) => push_inline_block(&mut rows, b)?,
            Node::Box(b) => {
                let laid = layout_box(b, inner_width, shaper)?;
                rows.push(Row {
                    width: laid.width,
                    height: laid.height,
                    content: RowContent::Box {
                        laid,
                        scale: b.scale,
                    },
                    inline: Vec::new(),
                });
            }
        }
    }

    let content_width = rows.iter().map(|r| r.width).fold(0.0f32, f32::max);
    let mut items = Vec::new();
    let mut y = pad;
    for row in rows {
        let x = pad
            + match node.text_align {
                TextAlign::Start => 0.0,
                TextAlign::Center => (content_width - row.width) * 0.5,
            };
        let row_origin = Affine::translate((f64::from(x), f64::from(y)));

        match row.content {
            RowContent::Text(run) => items.push(DrawItem::Glyphs {
                family: run.family,
                bold: run.bold,
                size_px: run.size_px,
                color: run.color,
                glyphs: run.line.glyphs,
                transform: row_origin * Affine::translate((0.0, f64::from(run.baseline))),
            }),
            RowContent::Empty => {}
            RowContent::Box { laid, scale } => {
                let tf = row_origin * scale_about_center(scale, laid.width, laid.height);
                items.extend(laid.items.into_iter().map(|item| item.transformed(tf)));
            }
        }

        for block in row.inline {
            items.push(DrawItem::Rect {
                rect: Rect::new(
                    f64::from(block.x),
                    f64::from((row.height - block.height) * 0.5),
                    f64::from(block.x + block.width),
                    f64::from((row.height + block.height) * 0.5),
                ),
                color: block.color,
                opacity: block.opacity,
                transform: row_origin,
            });
        }
        y += row.height;
    }

    Ok(Laid {
        width: content_width + 2.0 * pad,
        height: y + pad,
        items,
    })
}

fn push_text_rows(
    rows: &mut Vec<Row>,
    node: &TextNode,
    max_width: f32,
    shaper: &mut dyn TextShaper,
) -> ReelResult<()> {
    let style = &node.style;
    if !style.size_px.is_finite() || style.size_px <= 0.0 {
        return Err(ReelError::validation("text size_px must be finite and > 0"));
    }
    let color = parse_color(&style.color, "text color")?;
    let fixed_height = style.line_height.map(|m| m * style.size_px);

    for hard_line in node.content.split('\n') {
        let hard_line = hard_line.strip_suffix('\r').unwrap_or(hard_line);
        let text = match style.white_space {
            WhiteSpace::Normal => collapse_whitespace(hard_line),
            WhiteSpace::PreWrap => hard_line.to_string(),
        };

        if text.is_empty() {
            if style.white_space == WhiteSpace::PreWrap {
                rows.push(Row {
                    width: 0.0,
                    height: fixed_height.unwrap_or(FALLBACK_LINE_HEIGHT * style.size_px),
                    content: RowContent::Empty,
                    inline: Vec::new(),
                });
            }
            continue;
        }

        for line in shaper.shape(&text, style, max_width)? {
            let font_height = line.ascent + line.descent;
            let height = fixed_height.unwrap_or(font_height + line.leading);
            let baseline = (height - font_height) * 0.5 + line.ascent;
            rows.push(Row {
                width: line.advance,
                height,
                content: RowContent::Text(TextRun {
                    line,
                    baseline,
                    family: style.family,
                    bold: style.bold,
                    size_px: style.size_px,
                    color,
                }),
                inline: Vec::new(),
            });
        }
    }
    Ok(())
}

fn push_inline_block(rows: &mut Vec<Row>, node: &BlockNode) -> ReelResult<()> {
    let color = parse_color(&node.color, "block color")?;
    let width = node.width_px.max(0.0);
    let height = node.height_px.max(0.0);
    let margin = node.margin_left_px.max(0.0);

    let continues_line = rows
        .last()
        .is_some_and(|r| !matches!(r.content, RowContent::Box { .. }));
    if !continues_line {
        rows.push(Row {
            width: 0.0,
            height,
            content: RowContent::Empty,
            inline: Vec::new(),
        });
    }
    let Some(row) = rows.last_mut() else {
        return Err(ReelError::render("inline block has no row to attach to"));
    };

    row.inline.push(InlineBlock {
        x: row.width + margin,
        width,
        height,
        color,
        opacity: node.opacity.clamp(0.0, 1.0),
    });
    row.width += margin + width;
    row.height = row.height.max(height);
    Ok(())
}

fn scale_about_center(scale: f64, width: f32, height: f32) -> Affine {
    let center = (f64::from(width) * 0.5, f64::from(height) * 0.5);
    Affine::translate(center) * Affine::scale(scale.max(0.0)) * Affine::translate((-center.0, -center.1))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_color(s: &str, what: &str) -> ReelResult<CssColor> {
    CssColor::parse(s).map_err(|e| ReelError::render(format!("{what}: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
