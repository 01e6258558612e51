//! Error types for the API client.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::ResponseHead;

/// Structured failure reported by the Yandex.Disk API.
///
/// Every response with a status of 400 or above is turned into one of these.
/// When the error body is missing or is not JSON, both fields stay empty and the
/// error is considered unclassified.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    /// Human readable explanation, e.g. `resource already exists`.
    #[serde(default)]
    pub description: String,
    /// Machine readable code, e.g. `PlatformResourceAlreadyExists`.
    #[serde(rename = "error", default)]
    pub code: String,
}

impl ApiError {
    /// Returns true when the service gave neither a code nor a description.
    pub fn is_unclassified(&self) -> bool {
        self.code.is_empty() && self.description.is_empty()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unclassified() {
            return write!(f, "Yandex.Disk API error.");
        }
        write!(
            f,
            "Yandex.Disk API error. Code: {}. Description: {}.",
            self.code, self.description
        )
    }
}

impl std::error::Error for ApiError {}

/// Errors that can occur when building or sending API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The configured base URL is not an absolute URL that paths can be joined onto.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// The access token cannot be sent as an HTTP header value.
    #[error("Access token contains characters not allowed in an HTTP header")]
    InvalidToken,
    /// The relative resource path cannot be turned into a URL.
    #[error("Invalid request path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
    /// Joining the relative path onto the base URL failed.
    #[error("Failed to build request URL: {0}")]
    Url(#[from] url::ParseError),
    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    /// The default HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The execution context was cancelled before the call completed.
    #[error("Request cancelled")]
    Cancelled,
    /// The execution context deadline passed before the call completed.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
    /// Network level failure reported by the HTTP client.
    #[error(transparent)]
    Transport(reqwest::Error),
    /// The API answered with a status of 400 or above.
    #[error("{source}")]
    Api {
        source: ApiError,
        response: ResponseHead,
    },
    /// Reading the response body failed.
    #[error("Failed to read response body: {source}")]
    Body {
        source: reqwest::Error,
        response: ResponseHead,
    },
    /// The successful response body is not valid JSON for the requested type.
    #[error("Failed to decode response body: {source}")]
    Decode {
        source: serde_json::Error,
        response: ResponseHead,
    },
    /// Copying the response body into a raw sink failed.
    #[error("Failed to write response body: {source}")]
    Sink {
        source: std::io::Error,
        response: ResponseHead,
    },
}

impl Error {
    /// Returns the structured API error if the service rejected the request.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns the response head when the failure happened after a response arrived.
    pub fn response(&self) -> Option<&ResponseHead> {
        match self {
            Error::Api { response, .. }
            | Error::Body { response, .. }
            | Error::Decode { response, .. }
            | Error::Sink { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns true for failures caused by the execution context.
    pub fn is_context(&self) -> bool {
        matches!(self, Error::Cancelled | Error::DeadlineExceeded)
    }
}
