use std::panic::Location;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SseError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from {url}: status {status} {location}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        location: ErrorLocation,
    },

    #[error("Invalid response from {url}: content type '{content_type}' {location}")]
    UnexpectedContentType {
        url: String,
        content_type: String,
        location: ErrorLocation,
    },

    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("SSE streaming not supported: {reason} {location}")]
    StreamingUnsupported {
        reason: String,
        location: ErrorLocation,
    },

    #[error("SSE line exceeds {limit} bytes {location}")]
    LineTooLong {
        limit: usize,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl SseError {
    #[track_caller]
    pub fn connection_closed<S: Into<String>>(reason: S) -> Self {
        SseError::ConnectionClosed {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn streaming_unsupported<S: Into<String>>(reason: S) -> Self {
        SseError::StreamingUnsupported {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl SseError {
    #[track_caller]
    pub fn line_too_long(limit: usize) -> Self {
        SseError::LineTooLong {
            limit,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for SseError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        SseError::Http {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }
}

impl From<std::io::Error> for SseError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        SseError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for SseError {
    fn into_response(self) -> Response {
        let status = match self {
            SseError::UnexpectedStatus { .. } | SseError::UnexpectedContentType { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SseError>;
