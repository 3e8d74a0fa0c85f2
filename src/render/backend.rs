use crate::foundation::core::Canvas;
use crate::foundation::error::ReelResult;
use crate::render::cpu::CpuRendererOptions;
use crate::view::VisualDescription;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** by default. The `premultiplied` flag is included to make
/// this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Turns a [`VisualDescription`] into pixels.
///
/// Most users do not call [`Renderer::render`] directly; prefer [`crate::render_frame`] and
/// [`crate::render_range`], which handle evaluation and frame ordering.
pub trait Renderer {
    /// Rasterize `desc` onto a canvas of the given size.
    fn render(&mut self, desc: &VisualDescription, canvas: Canvas) -> ReelResult<FrameRGBA>;

    /// Return settings required to construct equivalent worker renderers.
    ///
    /// This is used by parallel rendering paths; renderers returning `None` always render
    /// sequentially.
    fn worker_options(&self) -> Option<CpuRendererOptions> {
        None
    }
}
