//! Per-frame view components.
//!
//! A component is a pure function of `(AnimationParams, FrameContext)` to a
//! [`VisualDescription`]. Components hold no cross-frame state, so frames can be evaluated in any
//! order and on any thread.

pub(crate) mod terminal;
pub(crate) mod title;

use crate::composition::params::AnimationParams;
use crate::foundation::core::{Fps, FrameIndex};
use crate::view::VisualDescription;

/// Timeline position handed to a component for one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameContext {
    /// Frame being evaluated.
    pub frame: FrameIndex,
    /// Timeline frame rate.
    pub fps: Fps,
}

impl FrameContext {
    /// Context for `frame` at `fps`.
    pub fn new(frame: u64, fps: Fps) -> Self {
        Self {
            frame: FrameIndex(frame),
            fps,
        }
    }
}

/// A view component evaluated once per frame.
pub trait Component: Send + Sync {
    /// Describe the frame at `ctx` for `params`.
    fn render(&self, params: &AnimationParams, ctx: FrameContext) -> VisualDescription;
}

/// Components a render target can bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ComponentKind {
    /// Spring-scaled centered title card.
    TitleAnimator,
    /// Terminal with typed-out text and a blinking cursor.
    TerminalTyper,
}

impl ComponentKind {
    /// Stable display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::TitleAnimator => "TitleAnimator",
            Self::TerminalTyper => "TerminalTyper",
        }
    }

    /// Evaluate the component with its default configuration.
    #[tracing::instrument(level = "trace", skip(params), fields(component = self.name()))]
    pub fn render(self, params: &AnimationParams, ctx: FrameContext) -> VisualDescription {
        match self {
            Self::TitleAnimator => title::TitleAnimator::new().render(params, ctx),
            Self::TerminalTyper => terminal::TerminalTyper.render(params, ctx),
        }
    }
}
