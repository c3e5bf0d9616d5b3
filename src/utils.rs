//! Utility functions and constants for the RESP2 wire format.

use memchr::memmem;

use crate::error::ProtocolError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// RESP2 type markers
pub const SIMPLE_STRING: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Look for a complete line in the buffer without consuming anything.
///
/// Returns the line contents (CRLF excluded) and the total number of
/// bytes the line occupies (CRLF included), or `None` if no terminator
/// has arrived yet.
#[inline]
pub fn peek_line(buf: &[u8]) -> Option<(&[u8], usize)> {
    memmem::find(buf, CRLF).map(|pos| (&buf[..pos], pos + 2))
}

/// Parse a signed 64-bit integer from a byte slice.
#[inline]
pub fn parse_integer(buf: &[u8]) -> Result<i64, ProtocolError> {
    let s = std::str::from_utf8(buf)?;
    s.parse::<i64>()
        .map_err(|e| ProtocolError::InvalidInteger(e.to_string()))
}
