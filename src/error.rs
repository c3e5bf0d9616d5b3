//! Error types for RESP parsing.

use thiserror::Error;

/// Errors signalling malformed wire data.
///
/// Every variant is fatal to the connection that produced the bytes:
/// once the stream is malformed its framing can no longer be trusted,
/// so the caller must close and reconnect rather than resynchronize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Unexpected end of input while parsing a single complete message
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Invalid type marker encountered
    #[error("Invalid type marker: {0:?}")]
    InvalidTypeMarker(char),

    /// Invalid integer value
    #[error("Invalid integer: {0}")]
    InvalidInteger(String),

    /// Invalid bulk string length
    #[error("Invalid bulk string length: {0}")]
    InvalidBulkLength(i64),

    /// Invalid array length
    #[error("Invalid array length: {0}")]
    InvalidArrayLength(i64),

    /// Invalid format for the current type
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8Error(String),
}

impl From<std::str::Utf8Error> for ProtocolError {
    fn from(e: std::str::Utf8Error) -> Self {
        ProtocolError::Utf8Error(e.to_string())
    }
}

impl From<std::num::ParseIntError> for ProtocolError {
    fn from(e: std::num::ParseIntError) -> Self {
        ProtocolError::InvalidInteger(e.to_string())
    }
}
