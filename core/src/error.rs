//! Error types for the Pipedrive client.
//!
//! # Design
//! Failures that happen before or instead of an HTTP exchange (validation,
//! configuration, serialization, transport) are returned as `Err` from the
//! operation itself. Anything the remote side reports arrives inside the
//! `ApiResponse` envelope and only becomes an `Error` when the caller asks
//! the envelope for its payload (`Api`, `NoData`, `UnexpectedDataType`).

/// Errors returned by `Pipedrive` operations and `ApiResponse` accessors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required field is missing or a local rule is violated. Raised before
    /// any request is sent.
    #[error("{0}")]
    Validation(String),

    /// The client configuration (token, base URL) is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP exchange could not be completed (DNS, connect, TLS, I/O).
    #[error("HTTP transport failed: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The remote side reported an error status. Carries its message verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A successful status arrived without a `data` payload.
    #[error("no data returned")]
    NoData,

    /// The `data` payload is neither a record nor a list of records.
    #[error("unexpected data type")]
    UnexpectedDataType,
}

impl Error {
    pub(crate) fn required(field: &str) -> Self {
        Error::Validation(format!("field '{field}' is required"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
