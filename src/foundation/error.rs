/// Convenience result type used across the crate.
pub type HanoiResult<T> = Result<T, HanoiError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum HanoiError {
    /// Configuration values the engine cannot represent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font discovery, loading or shaping failures.
    #[error("font error: {0}")]
    Font(String),

    /// Rasterization failures (surface allocation, buffer mismatches).
    #[error("render error: {0}")]
    Render(String),

    /// Image encoding failures.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HanoiError {
    /// Build a [`HanoiError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HanoiError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`HanoiError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HanoiError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
