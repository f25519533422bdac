/// Convenience result type used across quotecard.
pub type QuoteCardResult<T> = Result<T, QuoteCardError>;

/// Top-level error taxonomy used by the rendering core.
///
/// Asset problems are normally recovered through fallback chains and never reach callers; the
/// variant exists for the lower-level loaders that report *why* a fallback was taken.
#[derive(thiserror::Error, Debug)]
pub enum QuoteCardError {
    /// Invalid caller-provided data (canvas size, missing output target, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A background or font could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Encoding or writing the final image failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuoteCardError {
    /// Build a [`QuoteCardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuoteCardError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`QuoteCardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`QuoteCardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
