//! Error types for the catalogflow crate.
//!
//! [`ErrorKind`] is the closed taxonomy every fetch failure is folded into.
//! Failures raised by a transport are opaque [`anyhow::Error`] values until
//! [`classify`] maps them onto exactly one variant. [`CatalogflowError`]
//! covers setup failures (configuration, client construction) that never
//! travel inside a result.

use serde_json::Value;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// The underlying failure attached to an [`ErrorKind`].
///
/// Shared behind an `Arc` so error values stay cheap to clone while keeping
/// the original error and its source chain available for inspection.
#[derive(Clone)]
pub struct Cause(Arc<anyhow::Error>);

impl Cause {
    /// Wraps any error as a cause.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self(Arc::new(error.into()))
    }

    /// Creates a cause from a plain message.
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(anyhow::Error::msg(message)))
    }

    /// Returns the wrapped error.
    #[must_use]
    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }

    /// Finds an error of type `E` anywhere in the cause's source chain.
    #[must_use]
    pub fn find<E>(&self) -> Option<&E>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.0
            .downcast_ref::<E>()
            .or_else(|| self.0.chain().find_map(|cause| cause.downcast_ref::<E>()))
    }
}

impl From<anyhow::Error> for Cause {
    fn from(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }
}

impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.to_string() == other.0.to_string()
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cause").field(&self.0.to_string()).finish()
    }
}

/// Closed set of failure kinds a fetch can end in.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// The remote endpoint answered with a structured failure.
    #[error("API error ({code}): {}", body_text(.body))]
    ApiError {
        /// Decoded error payload.
        body: Value,
        /// Status code reported by the endpoint.
        code: i32,
        /// Underlying failure.
        cause: Cause,
    },

    /// Transport-level I/O failure that is not a timeout.
    #[error("Network error: {cause}")]
    NetworkError {
        /// Underlying I/O failure.
        cause: Cause,
    },

    /// A local predicate or domain rule rejected the value.
    #[error("Validation error ({code}): {}", body_text(.body))]
    ValidationError {
        /// Rejection message or payload.
        body: Value,
        /// Status code, `-1` for local predicate failures.
        code: i32,
        /// Underlying failure, if any.
        cause: Option<Cause>,
    },

    /// The caller lacks permission or credentials.
    #[error("Authorization error ({code}): {message}")]
    AuthorizationError {
        /// Human readable reason.
        message: String,
        /// Status code reported by the endpoint.
        code: i32,
        /// Underlying failure.
        cause: Cause,
    },

    /// The operation exceeded its deadline.
    #[error("Timeout: {cause}")]
    TimeoutError {
        /// Underlying timeout signal.
        cause: Cause,
    },

    /// Any failure not matching the other kinds.
    #[error("Unknown error: {cause}")]
    UnknownError {
        /// Underlying failure.
        cause: Cause,
    },
}

fn body_text(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl ErrorKind {
    /// Creates an API error.
    #[must_use]
    pub fn api(body: impl Into<Value>, code: i32, cause: Cause) -> Self {
        Self::ApiError {
            body: body.into(),
            code,
            cause,
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(cause: Cause) -> Self {
        Self::NetworkError { cause }
    }

    /// Creates a validation error without an underlying cause.
    #[must_use]
    pub fn validation(body: impl Into<Value>, code: i32) -> Self {
        Self::ValidationError {
            body: body.into(),
            code,
            cause: None,
        }
    }

    /// Creates a validation error caused by another failure.
    #[must_use]
    pub fn validation_caused_by(body: impl Into<Value>, code: i32, cause: Cause) -> Self {
        Self::ValidationError {
            body: body.into(),
            code,
            cause: Some(cause),
        }
    }

    /// Creates an authorization error.
    #[must_use]
    pub fn authorization(message: impl Into<String>, code: i32, cause: Cause) -> Self {
        Self::AuthorizationError {
            message: message.into(),
            code,
            cause,
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(cause: Cause) -> Self {
        Self::TimeoutError { cause }
    }

    /// Creates an unknown error.
    #[must_use]
    pub fn unknown(cause: Cause) -> Self {
        Self::UnknownError { cause }
    }

    /// Returns the variant name.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ApiError { .. } => "ApiError",
            Self::NetworkError { .. } => "NetworkError",
            Self::ValidationError { .. } => "ValidationError",
            Self::AuthorizationError { .. } => "AuthorizationError",
            Self::TimeoutError { .. } => "TimeoutError",
            Self::UnknownError { .. } => "UnknownError",
        }
    }

    /// Returns the status code for the kinds that carry one.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::ApiError { code, .. }
            | Self::ValidationError { code, .. }
            | Self::AuthorizationError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the underlying cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Self::ApiError { cause, .. }
            | Self::NetworkError { cause }
            | Self::AuthorizationError { cause, .. }
            | Self::TimeoutError { cause }
            | Self::UnknownError { cause } => Some(cause),
            Self::ValidationError { cause, .. } => cause.as_ref(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(self.kind_name()));

        match self {
            Self::ApiError { body, code, .. } | Self::ValidationError { body, code, .. } => {
                map.insert("body".to_string(), body.clone());
                map.insert("code".to_string(), serde_json::json!(code));
            }
            Self::AuthorizationError { message, code, .. } => {
                map.insert("reason".to_string(), serde_json::json!(message));
                map.insert("code".to_string(), serde_json::json!(code));
            }
            Self::NetworkError { .. } | Self::TimeoutError { .. } | Self::UnknownError { .. } => {}
        }

        if let Some(cause) = self.cause() {
            map.insert("cause".to_string(), serde_json::json!(cause.to_string()));
        }
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Maps a failure raised by a transport onto the taxonomy.
///
/// The whole source chain is searched for a timeout signal before it is
/// searched for a generic I/O signal, so an I/O error that wraps a timeout
/// still classifies as [`ErrorKind::TimeoutError`]. Everything else is
/// [`ErrorKind::UnknownError`].
pub fn classify(failure: anyhow::Error) -> ErrorKind {
    let kind = if failure.chain().any(is_timeout_signal) {
        ErrorKind::timeout(Cause::from(failure))
    } else if failure.chain().any(is_io_signal) {
        ErrorKind::network(Cause::from(failure))
    } else {
        ErrorKind::unknown(Cause::from(failure))
    };

    debug!(error_kind = kind.kind_name(), error = %kind, "classified fetch failure");
    kind
}

fn is_timeout_signal(cause: &(dyn StdError + 'static)) -> bool {
    if let Some(io) = cause.downcast_ref::<std::io::Error>() {
        return io.kind() == std::io::ErrorKind::TimedOut;
    }
    cause.is::<tokio::time::error::Elapsed>() || is_http_timeout(cause)
}

fn is_io_signal(cause: &(dyn StdError + 'static)) -> bool {
    cause.is::<std::io::Error>() || is_http_io(cause)
}

#[cfg(feature = "http")]
fn is_http_timeout(cause: &(dyn StdError + 'static)) -> bool {
    cause
        .downcast_ref::<reqwest::Error>()
        .is_some_and(reqwest::Error::is_timeout)
}

#[cfg(not(feature = "http"))]
fn is_http_timeout(_cause: &(dyn StdError + 'static)) -> bool {
    false
}

#[cfg(feature = "http")]
fn is_http_io(cause: &(dyn StdError + 'static)) -> bool {
    cause
        .downcast_ref::<reqwest::Error>()
        .is_some_and(|err| err.is_connect() || err.is_request() || err.is_body())
}

#[cfg(not(feature = "http"))]
fn is_http_io(_cause: &(dyn StdError + 'static)) -> bool {
    false
}

/// Errors raised while setting up the crate's collaborators.
#[derive(Debug, Error)]
pub enum CatalogflowError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
