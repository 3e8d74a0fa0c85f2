//! textreel renders short animated text clips frame by frame.
//!
//! Two view components are evaluated as pure functions of a frame index:
//!
//! - [`TitleAnimator`]: centered title text scaled in with a damped spring
//! - [`TerminalTyper`]: text typed out at a fixed rate behind a blinking cursor
//!
//! A [`CompositionRegistry`] binds components to canvases and parameters. Targets are evaluated
//! into a [`VisualDescription`], rasterized by a [`Renderer`] such as [`CpuRenderer`], and
//! streamed into a [`FrameSink`] (PNG sequence, `ffmpeg` MP4, or memory).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod components;
pub(crate) mod composition;
pub(crate) mod encode;
pub(crate) mod render;
/// Serializable per-frame visual tree.
pub mod view;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::spring::{DampedSpring, SpringConfig, SpringFunction, spring_step};
pub use crate::components::terminal::{
    CHARS_PER_FRAME, CURSOR_HALF_PERIOD_FRAMES, TERMINAL_BG, TERMINAL_FG, TerminalState,
    TerminalTyper, chars_shown, cursor_visible,
};
pub use crate::components::title::{
    TITLE_DAMPING, TITLE_FONT_SIZE_PX, TitleAnimator, TitleState, split_lines,
};
pub use crate::components::{Component, ComponentKind, FrameContext};
pub use crate::composition::params::{AnimationParams, ParamsOverride, merge_params};
pub use crate::composition::registry::{
    COMPOSITION_FPS, CompositionRegistry, LANDSCAPE, PORTRAIT, RenderTarget,
};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, frame_file_name, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::{FrameRGBA, Renderer};
pub use crate::render::cpu::{CpuRenderer, CpuRendererOptions};
pub use crate::render::fonts::FontOptions;
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, render_frame, render_frames, render_frames_with_stats,
    render_range,
};
pub use crate::view::VisualDescription;
pub use crate::view::color::CssColor;
