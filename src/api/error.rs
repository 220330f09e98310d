/// Error types for the API module
use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur while talking to the DigitalOcean API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be built
    #[error("Client error: {0}")]
    Client(String),

    /// Network-related errors (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("{method} {url}: {status} (request \"{request_id}\") {message}")]
    Http {
        method: String,
        url: String,
        status: u16,
        /// Request id echoed by the API, empty when it sent none
        request_id: String,
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Pagination links could not be interpreted
    #[error(transparent)]
    Pagination(#[from] LinksError),
}

/// Errors raised while reading pagination links
#[derive(Debug, Error)]
pub enum LinksError {
    #[error("invalid page link {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("page link {0:?} has no page parameter")]
    MissingPage(String),

    #[error("page link {url:?} has a non-numeric page {value:?}: {source}")]
    InvalidPage {
        url: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("page {0} has no following page number")]
    PageOverflow(u64),
}
