/// Convenience result type used across textreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the render edges.
///
/// Per-frame evaluation never fails; these errors come from parameter parsing, font discovery,
/// rasterization, and encoding.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided parameters or render configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// No usable font face could be resolved.
    #[error("font error: {0}")]
    Font(String),

    /// Errors while rasterizing a visual description.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing frames to an output sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing parameter records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
