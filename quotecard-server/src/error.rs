use thiserror::Error;

/// Startup and wiring failures. Request-time failures use [`crate::http::error::ApiError`].
#[derive(Debug, Error)]
pub enum ServerError {
    /// Settings could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] crate::config::LoadError),

    /// Listener or filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),

    /// The rendering core rejected its configuration.
    #[error("renderer setup failed: {0}")]
    Renderer(#[from] quotecard::QuoteCardError),

    /// The upstream HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    HttpClient(String),
}

impl ServerError {
    /// Build a [`ServerError::Telemetry`] value.
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    /// Build a [`ServerError::HttpClient`] value.
    pub fn http_client(message: impl Into<String>) -> Self {
        Self::HttpClient(message.into())
    }
}
