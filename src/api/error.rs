//! Error kinds for a single HTTP exchange with the Hyperliquid API.

use reqwest::StatusCode;
use thiserror::Error;

use crate::format::truncate;

/// Maximum number of characters of a failed response body kept in errors.
pub const ERROR_BODY_PREVIEW: usize = 100;

/// Why a request did not produce the value the caller asked for.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, TLS error and the like.
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body was not JSON, or not the JSON shape we expected.
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Classify a transport error raised by reqwest.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::Network {
                url: url.to_string(),
                source: err,
            }
        }
    }

    pub fn status(status: StatusCode, body: &str) -> Self {
        ApiError::Status {
            status,
            body: truncate(body, ERROR_BODY_PREVIEW),
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }

    /// Short label used when printing probe results.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "network",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Status { .. } => "status",
            ApiError::Decode { .. } => "decode",
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
