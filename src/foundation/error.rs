/// Result type used across the crate.
pub type SheetResult<T> = Result<T, SheetError>;

/// Error taxonomy returned by the public API.
#[derive(thiserror::Error, Debug)]
pub enum SheetError {
    /// A required asset is missing, unreadable or has an unusable key.
    #[error("asset error: {0}")]
    Asset(String),

    /// A font file could not be loaded or a role has no usable face.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid render configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The remote asset source failed or returned something that is not an image.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Rasterization of a text band failed.
    #[error("render error: {0}")]
    Render(String),

    /// Player record that parses but cannot be drawn.
    #[error("profile error: {0}")]
    Profile(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SheetError {
    /// Build a [`SheetError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SheetError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`SheetError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SheetError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`SheetError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SheetError::Profile`] value.
    pub fn profile(msg: impl Into<String>) -> Self {
        Self::Profile(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
