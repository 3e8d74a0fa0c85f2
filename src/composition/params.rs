use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};
use crate::view::color::CssColor;

/// Parameters bound to a render target.
///
/// Field names serialize in camelCase so props files written for other tooling load unchanged.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationParams {
    /// Text to animate; `\n` separates lines.
    pub text: String,
    /// Title text color (CSS color string).
    pub title_color: String,
    /// Background color (CSS color string).
    pub bg_color: String,
    /// Clip length in frames.
    pub duration_in_frames: u64,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            text: "Welcome to\nBusiness Automation".to_string(),
            title_color: "#333333".to_string(),
            bg_color: "#ffffff".to_string(),
            duration_in_frames: 150,
        }
    }
}

impl AnimationParams {
    /// Check that the record can be rendered: colors parse and the duration is non-zero.
    pub fn validate(&self) -> ReelResult<()> {
        if self.duration_in_frames == 0 {
            return Err(ReelError::validation("durationInFrames must be > 0"));
        }
        CssColor::parse(&self.title_color)
            .map_err(|e| ReelError::validation(format!("titleColor: {e}")))?;
        CssColor::parse(&self.bg_color)
            .map_err(|e| ReelError::validation(format!("bgColor: {e}")))?;
        Ok(())
    }

    /// Duration that leaves time to type out `text`: `max(150, 2 * chars + 60)`.
    pub fn auto_duration_for(text: &str) -> u64 {
        let chars = text.chars().count() as u64;
        chars.saturating_mul(2).saturating_add(60).max(150)
    }
}

/// Partial [`AnimationParams`] supplied from outside (props JSON, CLI flags).
///
/// Unset fields fall back to the defaults; unknown JSON fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamsOverride {
    /// Replacement text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Replacement title color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    /// Replacement background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// Replacement duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_frames: Option<u64>,
}

impl ParamsOverride {
    /// Parse an override record from a JSON object string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("parse props JSON: {e}")))
    }

    /// Parse an override record from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open props JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ReelError::serde(format!("parse props JSON '{}': {e}", path.display()))
        })
    }

    /// Layer `over` on top of `self`; fields set in `over` win.
    pub fn layered(self, over: ParamsOverride) -> Self {
        Self {
            text: over.text.or(self.text),
            title_color: over.title_color.or(self.title_color),
            bg_color: over.bg_color.or(self.bg_color),
            duration_in_frames: over.duration_in_frames.or(self.duration_in_frames),
        }
    }

    /// Shallow merge onto `defaults`, field by field.
    pub fn merge_onto(&self, defaults: &AnimationParams) -> AnimationParams {
        AnimationParams {
            text: self.text.clone().unwrap_or_else(|| defaults.text.clone()),
            title_color: self
                .title_color
                .clone()
                .unwrap_or_else(|| defaults.title_color.clone()),
            bg_color: self
                .bg_color
                .clone()
                .unwrap_or_else(|| defaults.bg_color.clone()),
            duration_in_frames: self
                .duration_in_frames
                .unwrap_or(defaults.duration_in_frames),
        }
    }
}

/// `merge(defaults, over)[k] = over[k]` when set, else `defaults[k]`.
pub fn merge_params(defaults: &AnimationParams, over: &ParamsOverride) -> AnimationParams {
    over.merge_onto(defaults)
}

#[cfg(test)]
#[path = "../../tests/unit/composition/params.rs"]
mod tests;
