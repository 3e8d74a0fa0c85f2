use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{ReelError, ReelResult};
use crate::render::fonts::{FaceData, FontBook, FontOptions};
use crate::render::layout::{ShapedGlyph, ShapedLine, TextShaper};
use crate::view::{FontFamily, TextStyle};

/// Parley-backed [`TextShaper`]. Colors are applied at draw time, so layouts carry no brush.
///
/// Faces come from a [`FontBook`].
pub(crate) struct ParleyShaper {
    fonts: FontBook,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_names: HashMap<(FontFamily, bool), String>,
}

impl ParleyShaper {
    pub(crate) fn new(opts: FontOptions) -> Self {
        Self {
            fonts: FontBook::new(opts),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_names: HashMap::new(),
        }
    }

    /// Face used to shape `family`; the rasterizer must draw glyphs from the same bytes.
    pub(crate) fn face(&mut self, family: FontFamily, bold: bool) -> ReelResult<Arc<FaceData>> {
        self.fonts.resolve(family, bold)
    }

    fn family_name(&mut self, family: FontFamily, bold: bool) -> ReelResult<String> {
        if let Some(name) = self.family_names.get(&(family, bold)) {
            return Ok(name.clone());
        }

        let face = self.fonts.resolve(family, bold)?;
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ReelError::font("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::font("registered font family has no name"))?
            .to_string();

        self.family_names.insert((family, bold), name.clone());
        Ok(name)
    }
}

impl TextShaper for ParleyShaper {
    fn shape(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: f32,
    ) -> ReelResult<Vec<ShapedLine>> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(ReelError::validation("text size_px must be finite and > 0"));
        }
        let family_name = self.family_name(style.family, style.bold)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(if style.bold {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        }));

        let mut layout: parley::Layout<()> = builder.build(text);
        let width = max_width.max(1.0);
        layout.break_all_lines(Some(width));
        layout.align(
            Some(width),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let mut out = Vec::new();
        for line in layout.lines() {
            let m = line.metrics();
            let mut glyphs = Vec::new();
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let baseline = run.baseline();
                glyphs.extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
            }
            out.push(ShapedLine {
                advance: m.advance,
                ascent: m.ascent,
                descent: m.descent,
                leading: m.leading,
                glyphs,
            });
        }
        Ok(out)
    }
}
