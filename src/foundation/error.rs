/// Convenience result type used across spotgrid.
pub type SpotgridResult<T> = Result<T, SpotgridError>;

/// Top-level error taxonomy used by compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpotgridError {
    /// Invalid user-provided configuration data.
    #[error("config error: {0}")]
    Config(String),

    /// Font resources could not be loaded or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Text shaping or measurement failed for one element.
    #[error("layout error: {0}")]
    Layout(String),

    /// Raster surface could not be created or read back.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding a rendered image.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpotgridError {
    /// Build a [`SpotgridError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SpotgridError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`SpotgridError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`SpotgridError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SpotgridError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
