//! RESP2 encoding: reply values back to their wire form, and client
//! commands into the array-of-bulk-strings request format.

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;

use crate::types::RespValue;
use crate::utils::*;

/// Trait for encoding RESP values.
///
/// Encoding is deterministic and side-effect free: the same value
/// produces identical bytes on every call. Every RESP2 value has a wire
/// form, so no error path exists.
pub trait RespEncode {
    fn encode_to(&self, buf: &mut BytesMut);

    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.encode_to(&mut buf);
        buf.freeze()
    }
}

impl RespEncode for RespValue {
    fn encode_to(&self, buf: &mut BytesMut) {
        match self {
            RespValue::SimpleString(s) => encode_line(buf, SIMPLE_STRING, s),
            RespValue::Error(e) => encode_line(buf, ERROR, e),
            RespValue::Integer(i) => encode_integer(buf, *i),
            RespValue::BulkString(s) => encode_bulk(buf, s),
            RespValue::NullBulkString => buf.put_slice(b"$-1\r\n"),
            RespValue::Array(arr) => encode_array(buf, arr),
            RespValue::NullArray => buf.put_slice(b"*-1\r\n"),
        }
    }
}

#[inline]
fn encode_line(buf: &mut BytesMut, marker: u8, payload: &[u8]) {
    buf.put_u8(marker);
    buf.put_slice(payload);
    buf.put_slice(CRLF);
}

#[inline]
fn encode_integer(buf: &mut BytesMut, i: i64) {
    buf.put_u8(INTEGER);
    buf.put_slice(i.to_string().as_bytes());
    buf.put_slice(CRLF);
}

#[inline]
fn encode_length(buf: &mut BytesMut, marker: u8, length: usize) {
    buf.put_u8(marker);
    buf.put_slice(length.to_string().as_bytes());
    buf.put_slice(CRLF);
}

#[inline]
fn encode_bulk(buf: &mut BytesMut, payload: &[u8]) {
    encode_length(buf, BULK_STRING, payload.len());
    buf.put_slice(payload);
    buf.put_slice(CRLF);
}

fn encode_array(buf: &mut BytesMut, arr: &[RespValue]) {
    encode_length(buf, ARRAY, arr.len());
    for value in arr {
        value.encode_to(buf);
    }
}

/// A command argument rendered to its exact wire bytes.
///
/// Arguments are binary safe and never escaped: the bulk string length
/// is the byte count after conversion. Text converts as UTF-8; integers
/// and floats render in canonical decimal form. Types with no wire
/// representation simply have no `From` impl, so a bad argument is a
/// compile error rather than a runtime failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg(Bytes);

impl Arg {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg(Bytes::from(s))
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Arg(Bytes::copy_from_slice(b))
    }
}

impl<const N: usize> From<&[u8; N]> for Arg {
    fn from(b: &[u8; N]) -> Self {
        Arg(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Arg {
    fn from(v: Vec<u8>) -> Self {
        Arg(Bytes::from(v))
    }
}

impl From<Bytes> for Arg {
    fn from(b: Bytes) -> Self {
        Arg(b)
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<i32> for Arg {
    fn from(i: i32) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<u64> for Arg {
    fn from(i: u64) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<usize> for Arg {
    fn from(i: usize) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Arg(Bytes::from(f.to_string()))
    }
}

/// Encode a command into a request buffer.
///
/// The request is a RESP array of bulk strings: `*<1+argc>\r\n`, then
/// the command name and each argument as `$<len>\r\n<bytes>\r\n`.
pub fn encode_command_to<I, A>(buf: &mut BytesMut, command: &str, args: I)
where
    I: IntoIterator<Item = A>,
    I::IntoIter: ExactSizeIterator,
    A: Into<Arg>,
{
    let args = args.into_iter();
    encode_length(buf, ARRAY, args.len() + 1);
    encode_bulk(buf, command.as_bytes());
    for arg in args {
        encode_bulk(buf, arg.into().as_bytes());
    }
}

/// Encode a command into a freshly allocated byte sequence.
///
/// ```rust
/// use respwire::{Arg, encode_command};
///
/// let request = encode_command("SET", [Arg::from("key"), Arg::from(42i64)]);
/// assert_eq!(&request[..], b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$2\r\n42\r\n");
/// ```
pub fn encode_command<I, A>(command: &str, args: I) -> Bytes
where
    I: IntoIterator<Item = A>,
    I::IntoIter: ExactSizeIterator,
    A: Into<Arg>,
{
    let mut buf = BytesMut::new();
    encode_command_to(&mut buf, command, args);
    buf.freeze()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_encode_simple_string() {
        let val = RespValue::SimpleString(Bytes::from_static(b"OK"));
        assert_eq!(val.encode(), b"+OK\r\n".as_slice());
    }

    #[test]
    fn test_encode_error() {
        let val = RespValue::Error(Bytes::from_static(b"ERR"));
        assert_eq!(val.encode(), b"-ERR\r\n".as_slice());
    }

    #[rstest]
    #[case(100, b":100\r\n")]
    #[case(-100, b":-100\r\n")]
    #[case(0, b":0\r\n")]
    fn test_encode_integer(#[case] input: i64, #[case] expected: &[u8]) {
        let val = RespValue::Integer(input);
        assert_eq!(val.encode(), expected);
    }

    #[test]
    fn test_encode_bulk_string() {
        let val = RespValue::BulkString(Bytes::from_static(b"hello"));
        assert_eq!(val.encode(), b"$5\r\nhello\r\n".as_slice());
    }

    #[test]
    fn test_encode_bulk_string_empty() {
        let val = RespValue::BulkString(Bytes::new());
        assert_eq!(val.encode(), b"$0\r\n\r\n".as_slice());
    }

    #[test]
    fn test_encode_null_bulk_string() {
        assert_eq!(RespValue::NullBulkString.encode(), b"$-1\r\n".as_slice());
    }

    #[test]
    fn test_encode_array() {
        let val = RespValue::Array(vec![
            RespValue::SimpleString(Bytes::from_static(b"hello")),
            RespValue::Integer(42),
        ]);
        assert_eq!(val.encode(), b"*2\r\n+hello\r\n:42\r\n".as_slice());
    }

    #[test]
    fn test_encode_array_empty() {
        let val = RespValue::Array(vec![]);
        assert_eq!(val.encode(), b"*0\r\n".as_slice());
    }

    #[test]
    fn test_encode_null_array() {
        assert_eq!(RespValue::NullArray.encode(), b"*-1\r\n".as_slice());
    }

    #[rstest]
    #[case(Arg::from("string"), b"string")]
    #[case(Arg::from(b"bytes".as_slice()), b"bytes")]
    #[case(Arg::from(100_000i64), b"100000")]
    #[case(Arg::from(10.0f64 / 3.0), b"3.3333333333333335")]
    #[case(Arg::from(2.5f64), b"2.5")]
    fn test_arg_rendering(#[case] arg: Arg, #[case] expected: &[u8]) {
        assert_eq!(arg.as_bytes(), expected);
    }

    #[test]
    fn test_encode_command_no_args() {
        let encoded = encode_command("PING", std::iter::empty::<Arg>());
        assert_eq!(&encoded[..], b"*1\r\n$4\r\nPING\r\n");
    }

    #[test]
    fn test_encode_command_binary_arg() {
        let encoded = encode_command("SET", [Arg::from("k"), Arg::from(b"\x00\xff\r\n".as_slice())]);
        assert_eq!(
            &encoded[..],
            b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$4\r\n\x00\xff\r\n\r\n"
        );
    }

    #[test]
    fn test_encode_command_deterministic() {
        let a = encode_command("GET", ["key"]);
        let b = encode_command("GET", ["key"]);
        assert_eq!(a, b);
    }
}
