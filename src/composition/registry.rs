use crate::components::{ComponentKind, FrameContext};
use crate::composition::params::{AnimationParams, ParamsOverride};
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::view::VisualDescription;

/// Frame rate shared by every declared target.
pub const COMPOSITION_FPS: Fps = Fps::whole(30);
/// 16:9 landscape canvas.
pub const LANDSCAPE: Canvas = Canvas {
    width: 1920,
    height: 1080,
};
/// 9:16 portrait canvas.
pub const PORTRAIT: Canvas = Canvas {
    width: 1080,
    height: 1920,
};

/// A named, renderable output: a component bound to a canvas, a frame rate, and parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderTarget {
    /// Stable identifier used to select the target.
    pub id: String,
    /// Component evaluated for each frame.
    pub component: ComponentKind,
    /// Output size in pixels.
    pub canvas: Canvas,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Length in frames.
    pub duration_in_frames: u64,
    /// Parameters handed to the component.
    pub params: AnimationParams,
}

impl RenderTarget {
    /// Bind `component` to `canvas` at the shared frame rate; the duration comes from `params`.
    pub fn new(
        id: impl Into<String>,
        component: ComponentKind,
        canvas: Canvas,
        params: AnimationParams,
    ) -> Self {
        Self {
            id: id.into(),
            component,
            canvas,
            fps: COMPOSITION_FPS,
            duration_in_frames: params.duration_in_frames,
            params,
        }
    }

    /// Frames `[0, duration)`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange::from_duration(self.duration_in_frames)
    }

    /// Evaluation context for `frame`.
    pub fn context(&self, frame: FrameIndex) -> FrameContext {
        FrameContext {
            frame,
            fps: self.fps,
        }
    }

    /// Evaluate the bound component at `frame`. Frames past the duration keep evaluating.
    pub fn evaluate(&self, frame: FrameIndex) -> VisualDescription {
        self.component.render(&self.params, self.context(frame))
    }
}

/// Declared render targets sharing one merged parameter record.
#[derive(Clone, Debug)]
pub struct CompositionRegistry {
    defaults: AnimationParams,
    params: AnimationParams,
    targets: Vec<RenderTarget>,
}

impl CompositionRegistry {
    /// Merge `overrides` onto `defaults` and declare `HelloWorld` (1920x1080) and
    /// `HelloWorldVertical` (1080x1920), both bound to the title animator.
    pub fn new(defaults: AnimationParams, overrides: &ParamsOverride) -> Self {
        let params = overrides.merge_onto(&defaults);
        let targets = vec![
            RenderTarget::new(
                "HelloWorld",
                ComponentKind::TitleAnimator,
                LANDSCAPE,
                params.clone(),
            ),
            RenderTarget::new(
                "HelloWorldVertical",
                ComponentKind::TitleAnimator,
                PORTRAIT,
                params.clone(),
            ),
        ];
        tracing::debug!(
            duration = params.duration_in_frames,
            targets = targets.len(),
            "declared compositions"
        );
        Self {
            defaults,
            params,
            targets,
        }
    }

    /// Additionally declare `Terminal` and `TerminalVertical`, bound to the terminal typer.
    pub fn with_terminal_targets(mut self) -> Self {
        for (id, canvas) in [("Terminal", LANDSCAPE), ("TerminalVertical", PORTRAIT)] {
            if self.targets.iter().any(|t| t.id == id) {
                continue;
            }
            self.targets.push(RenderTarget::new(
                id,
                ComponentKind::TerminalTyper,
                canvas,
                self.params.clone(),
            ));
        }
        self
    }

    /// Declare an extra target. Ids must be unique.
    pub fn register(&mut self, target: RenderTarget) -> ReelResult<()> {
        if self.targets.iter().any(|t| t.id == target.id) {
            return Err(ReelError::validation(format!(
                "composition '{}' is already declared",
                target.id
            )));
        }
        self.targets.push(target);
        Ok(())
    }

    /// Look up a target by id.
    pub fn get(&self, id: &str) -> ReelResult<&RenderTarget> {
        self.targets.iter().find(|t| t.id == id).ok_or_else(|| {
            let known: Vec<&str> = self.targets.iter().map(|t| t.id.as_str()).collect();
            ReelError::validation(format!(
                "unknown composition '{id}' (declared: {})",
                known.join(", ")
            ))
        })
    }

    /// Declared targets in declaration order.
    pub fn targets(&self) -> &[RenderTarget] {
        &self.targets
    }

    /// The built-in default record this registry was created with.
    pub fn defaults(&self) -> &AnimationParams {
        &self.defaults
    }

    /// The merged parameters bound to the declared targets.
    pub fn params(&self) -> &AnimationParams {
        &self.params
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/registry.rs"]
mod tests;
