//! Error type definitions.
//!
//! This module defines the request-level error returned by handlers and the
//! start-up errors raised while configuring the process.

use std::time::Duration;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Configuration values rejected by [`crate::Config::validate`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A zero-length window would admit nothing and never roll over.
    #[error("Rate-limit window must be longer than zero seconds")]
    ZeroRateWindow,

    /// Pagination needs at least one item per page.
    #[error("Default page size must be at least 1")]
    ZeroPageSize,

    /// `host:port` did not parse as a socket address.
    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),
}

/// Errors a request can end in.
///
/// Every variant maps to a fixed status code and a stable JSON body; nothing
/// about the server internals is ever written to the response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Create body without `title`/`author`, or update body with other keys.
    #[error("Invalid book data")]
    InvalidBookData,

    /// `page` or `limit` was not a non-negative integer.
    #[error("Invalid pagination parameters")]
    InvalidPagination,

    /// Delete of an unknown id.
    #[error("Book with ID:{0} not Found")]
    BookNotFound(u64),

    /// Update of an unknown id. Answered with an empty body.
    #[error("Book with ID:{0} not Found")]
    UpdateTargetMissing(u64),

    /// Unknown path, or an id segment that is not an integer.
    #[error("Not Found")]
    NotFound,

    /// Verb not served on a known path.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Client exhausted its quota for the current window.
    #[error("Too Many Requests")]
    TooManyRequests {
        /// Time until the client's window rolls over.
        retry_after: Duration,
    },
}

/// Outcome of a finished request, used for the shutdown summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum RequestOutcome {
    /// 2xx response
    Success,
    /// 400 response
    BadRequest,
    /// 404 response
    NotFound,
    /// 405 response
    MethodNotAllowed,
    /// 429 response
    RateLimited,
    /// Anything else
    Other,
}

impl RequestOutcome {
    /// Buckets an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => RequestOutcome::Success,
            400 => RequestOutcome::BadRequest,
            404 => RequestOutcome::NotFound,
            405 => RequestOutcome::MethodNotAllowed,
            429 => RequestOutcome::RateLimited,
            _ => RequestOutcome::Other,
        }
    }

    /// Label used in the shutdown summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Success => "Success",
            RequestOutcome::BadRequest => "Bad Request (400)",
            RequestOutcome::NotFound => "Not Found (404)",
            RequestOutcome::MethodNotAllowed => "Method Not Allowed (405)",
            RequestOutcome::RateLimited => "Too Many Requests (429)",
            RequestOutcome::Other => "Other",
        }
    }
}

impl std::fmt::Display for RequestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_messages() {
        assert_eq!(ApiError::InvalidBookData.to_string(), "Invalid book data");
        assert_eq!(
            ApiError::BookNotFound(99999).to_string(),
            "Book with ID:99999 not Found"
        );
        assert_eq!(ApiError::MethodNotAllowed.to_string(), "Method Not Allowed");
        assert_eq!(
            ApiError::TooManyRequests {
                retry_after: Duration::from_secs(1)
            }
            .to_string(),
            "Too Many Requests"
        );
    }

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(RequestOutcome::from_status(200), RequestOutcome::Success);
        assert_eq!(RequestOutcome::from_status(201), RequestOutcome::Success);
        assert_eq!(RequestOutcome::from_status(400), RequestOutcome::BadRequest);
        assert_eq!(RequestOutcome::from_status(404), RequestOutcome::NotFound);
        assert_eq!(
            RequestOutcome::from_status(405),
            RequestOutcome::MethodNotAllowed
        );
        assert_eq!(
            RequestOutcome::from_status(429),
            RequestOutcome::RateLimited
        );
        assert_eq!(RequestOutcome::from_status(500), RequestOutcome::Other);
    }
}
