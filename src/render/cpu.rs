use std::collections::HashMap;

use kurbo::Affine;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::{FrameRGBA, Renderer};
use crate::render::fonts::FontOptions;
use crate::render::layout::{DrawItem, FrameLayout, layout_frame};
use crate::render::text::ParleyShaper;
use crate::view::{FontFamily, VisualDescription};

/// Options for the CPU renderer.
#[derive(Clone, Debug, Default)]
pub struct CpuRendererOptions {
    /// Font discovery settings.
    pub fonts: FontOptions,
}

/// CPU raster renderer powered by `vello_cpu`, with Parley text shaping.
///
/// Fonts are only looked up when a frame actually contains text.
pub struct CpuRenderer {
    opts: CpuRendererOptions,
    shaper: ParleyShaper,
    ctx: Option<vello_cpu::RenderContext>,
    fonts: HashMap<(FontFamily, bool), vello_cpu::peniko::FontData>,
}

impl CpuRenderer {
    /// Create a renderer; no fonts are loaded until needed.
    pub fn new(opts: CpuRendererOptions) -> Self {
        Self {
            shaper: ParleyShaper::new(opts.fonts.clone()),
            opts,
            ctx: None,
            fonts: HashMap::new(),
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> ReelResult<R>,
    ) -> ReelResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn ensure_fonts(&mut self, layout: &FrameLayout) -> ReelResult<()> {
        for item in &layout.items {
            let DrawItem::Glyphs { family, bold, .. } = item else {
                continue;
            };
            if self.fonts.contains_key(&(*family, *bold)) {
                continue;
            }
            let face = self.shaper.face(*family, *bold)?;
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
                face.index,
            );
            self.fonts.insert((*family, *bold), font);
        }
        Ok(())
    }

    fn draw(&self, ctx: &mut vello_cpu::RenderContext, layout: &FrameLayout, canvas: Canvas) -> ReelResult<()> {
        let bg = layout.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));

        for item in &layout.items {
            match item {
                DrawItem::Rect {
                    rect,
                    color,
                    opacity,
                    transform,
                } => {
                    if *opacity <= 0.0 {
                        continue;
                    }
                    ctx.set_transform(affine_to_cpu(*transform));
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        color.r, color.g, color.b, color.a,
                    ));
                    if *opacity < 1.0 {
                        ctx.push_opacity_layer(*opacity);
                    }
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
                    if *opacity < 1.0 {
                        ctx.pop_layer();
                    }
                }
                DrawItem::Glyphs {
                    family,
                    bold,
                    size_px,
                    color,
                    glyphs,
                    transform,
                } => {
                    let font = self.fonts.get(&(*family, *bold)).ok_or_else(|| {
                        ReelError::render(format!("font for {family:?} was not prepared"))
                    })?;
                    ctx.set_transform(affine_to_cpu(*transform));
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        color.r, color.g, color.b, color.a,
                    ));
                    ctx.glyph_run(font)
                        .font_size(*size_px)
                        .fill_glyphs(glyphs.iter().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        }));
                }
            }
        }
        Ok(())
    }
}

impl Renderer for CpuRenderer {
    #[tracing::instrument(level = "trace", skip_all, fields(width = canvas.width, height = canvas.height))]
    fn render(&mut self, desc: &VisualDescription, canvas: Canvas) -> ReelResult<FrameRGBA> {
        let width = u16::try_from(canvas.width)
            .map_err(|_| ReelError::render("canvas width exceeds u16::MAX"))?;
        let height = u16::try_from(canvas.height)
            .map_err(|_| ReelError::render("canvas height exceeds u16::MAX"))?;

        let layout = layout_frame(desc, canvas, &mut self.shaper)?;
        self.ensure_fonts(&layout)?;

        self.with_ctx_mut(width, height, |this, ctx| {
            this.draw(ctx, &layout, canvas)?;
            ctx.flush();

            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }

    fn worker_options(&self) -> Option<CpuRendererOptions> {
        Some(self.opts.clone())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
