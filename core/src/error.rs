//! Error types for the HTTP client facade.
//!
//! # Design
//! One enum covers the whole pipeline. Transport failures (`Status`,
//! `Timeout`, `Transport`, `InvalidRequest`) are produced by a `Transport`
//! implementation and travel through `HttpClient::request` untouched.
//! `Interceptor` is what an interceptor returns when it refuses to produce a
//! value. The two serde variants cover the typed edges of `request`, where
//! the caller's body is erased to JSON and the payload decoded back.
//!
//! Variants carry owned strings rather than source errors so the type stays
//! `Clone + PartialEq`; callers and tests can compare a propagated error with
//! the one the transport produced.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = HttpError> = std::result::Result<T, E>;

/// Errors returned by `HttpClient` and by `Transport` implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The server answered with a status the transport classifies as failure.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The exchange did not finish within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Network or transport-internal fault.
    #[error("transport error: {0}")]
    Transport(String),

    /// The descriptor could not be turned into a wire request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An interceptor failed instead of returning a value.
    #[error("interceptor error: {0}")]
    Interceptor(String),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response payload could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl HttpError {
    /// Shorthand for interceptors that need to abort the chain.
    pub fn interceptor(message: impl Into<String>) -> Self {
        Self::Interceptor(message.into())
    }

    /// Shorthand for transports reporting a network fault.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// The HTTP status code, if this is a status failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures raised by the transport rather than by the pipeline.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Timeout | Self::Transport(_) | Self::InvalidRequest(_)
        )
    }
}
