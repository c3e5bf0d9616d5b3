//! RESP2 reply types and value representation.

use bytes::Bytes;

/// A complete RESP2 reply value.
///
/// The null bulk string (`$-1\r\n`), empty bulk string (`$0\r\n\r\n`),
/// null array (`*-1\r\n`) and empty array (`*0\r\n`) are four distinct
/// values on the wire and stay distinct here; command layers that want
/// a single "nil" notion must map them explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// Simple string: `+OK\r\n`
    SimpleString(Bytes),

    /// Error reply: `-ERR message\r\n`
    ///
    /// A successfully parsed value, not a codec failure; whether it
    /// surfaces as an error is the command layer's decision.
    Error(Bytes),

    /// Integer: `:1000\r\n`
    Integer(i64),

    /// Bulk string: `$6\r\nfoobar\r\n`
    BulkString(Bytes),

    /// Null bulk string: `$-1\r\n`
    NullBulkString,

    /// Array: `*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n`
    Array(Vec<RespValue>),

    /// Null array: `*-1\r\n`
    NullArray,
}

impl RespValue {
    /// Check if the value is an error reply
    pub fn is_error(&self) -> bool {
        matches!(self, RespValue::Error(_))
    }

    /// Check if the value is a null bulk string or a null array
    pub fn is_null(&self) -> bool {
        matches!(self, RespValue::NullBulkString | RespValue::NullArray)
    }

    /// Try to view the value as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RespValue::SimpleString(s) | RespValue::BulkString(s) => std::str::from_utf8(s).ok(),
            _ => None,
        }
    }

    /// Try to view the value as bytes
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            RespValue::SimpleString(b) | RespValue::BulkString(b) => Some(b),
            _ => None,
        }
    }

    /// Try to convert to integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RespValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to view the value as an array of elements
    pub fn as_array(&self) -> Option<&[RespValue]> {
        match self {
            RespValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Convert to String with lossy UTF-8 conversion
    pub fn to_string_lossy(&self) -> Option<String> {
        match self {
            RespValue::SimpleString(s) | RespValue::BulkString(s) => {
                Some(String::from_utf8_lossy(s).into_owned())
            }
            _ => None,
        }
    }

    /// Try to consume and convert to `Vec<RespValue>`
    pub fn into_vec(self) -> Option<Vec<RespValue>> {
        match self {
            RespValue::Array(a) => Some(a),
            _ => None,
        }
    }

    // Convenience constructors

    /// Create a simple string value
    pub fn simple_string(s: impl Into<Bytes>) -> Self {
        RespValue::SimpleString(s.into())
    }

    /// Create a bulk string value
    pub fn bulk_string(s: impl Into<Bytes>) -> Self {
        RespValue::BulkString(s.into())
    }

    /// Create an error value
    pub fn error(e: impl Into<Bytes>) -> Self {
        RespValue::Error(e.into())
    }

    /// Create an integer value
    pub fn integer(i: i64) -> Self {
        RespValue::Integer(i)
    }

    /// Create an array value from an iterator
    pub fn array(items: impl IntoIterator<Item = RespValue>) -> Self {
        RespValue::Array(items.into_iter().collect())
    }
}

// Convenient From implementations
impl From<&str> for RespValue {
    fn from(s: &str) -> Self {
        RespValue::BulkString(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for RespValue {
    fn from(s: String) -> Self {
        RespValue::BulkString(Bytes::from(s))
    }
}

impl From<&[u8]> for RespValue {
    fn from(b: &[u8]) -> Self {
        RespValue::BulkString(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for RespValue {
    fn from(v: Vec<u8>) -> Self {
        RespValue::BulkString(Bytes::from(v))
    }
}

impl From<Bytes> for RespValue {
    fn from(b: Bytes) -> Self {
        RespValue::BulkString(b)
    }
}

impl From<i64> for RespValue {
    fn from(i: i64) -> Self {
        RespValue::Integer(i)
    }
}

impl From<i32> for RespValue {
    fn from(i: i32) -> Self {
        RespValue::Integer(i as i64)
    }
}

impl<T: Into<RespValue>> From<Vec<T>> for RespValue {
    fn from(v: Vec<T>) -> Self {
        RespValue::Array(v.into_iter().map(|x| x.into()).collect())
    }
}
