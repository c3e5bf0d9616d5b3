//! Incremental RESP2 reply parser.
//!
//! The parser is a pure buffer-to-value transform: it performs no I/O,
//! never blocks, and keeps whatever partial state a fragmented read
//! leaves behind until the next feed completes it.

use bytes::Buf;
use bytes::BytesMut;

use crate::error::ProtocolError;
use crate::types::RespValue;
use crate::utils::*;

/// Result of a parsing attempt.
///
/// Exhaustive: a value is either complete, or more bytes are needed, or
/// the stream is malformed. No partial value is ever surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespParseResult {
    /// A complete RESP value was parsed.
    Complete(RespValue),
    /// The buffer does not contain enough data to parse a complete value.
    Incomplete,
    /// The wire data is malformed; the connection must be discarded.
    Error(ProtocolError),
}

/// A stateful RESP2 parser that supports streaming and pipelining.
///
/// One parser instance belongs to exactly one connection. Bytes read
/// from the socket are appended with [`feed`](RespParser::feed) and
/// complete values drained with [`try_next`](RespParser::try_next);
/// replies come out in arrival order, so a pipelining caller matches
/// them to its requests FIFO.
///
/// After a [`ProtocolError`] the framing of the stream can no longer be
/// trusted: every later call returns the same error and the connection
/// should be closed, not resynchronized.
pub struct RespParser {
    buf: BytesMut,
    frames: Vec<Frame>,
    failed: Option<ProtocolError>,
}

#[derive(Debug)]
enum Frame {
    Root,
    Array {
        expected: usize,
        elements: Vec<RespValue>,
    },
}

// Helper enum for parse_step
enum ParsedItem {
    Value(RespValue),
    FramePushed,
}

impl Default for RespParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RespParser {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
            frames: Vec::new(),
            failed: None,
        }
    }

    /// Append a chunk of bytes read from the connection.
    ///
    /// The chunk is copied into the parser's own buffer; the caller's
    /// I/O buffer is free for reuse as soon as this returns.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Number of unconsumed bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Try to extract the next complete value from the buffered bytes.
    ///
    /// Repeated calls drain every fully buffered value before reporting
    /// `Incomplete` again, which is what makes pipelined reads work.
    pub fn try_next(&mut self) -> RespParseResult {
        let mut buf = std::mem::take(&mut self.buf);
        let result = self.parse(&mut buf);
        self.buf = buf;
        result
    }

    /// Parse a RESP value from a caller-owned buffer.
    ///
    /// Consumes the parsed bytes from `buf` on success and leaves
    /// unconsumed bytes (including any incomplete tail) in place.
    /// Partial-parse state carries over to the next call on the same
    /// parser, so the buffer may be refilled between calls.
    pub fn parse(&mut self, buf: &mut BytesMut) -> RespParseResult {
        if let Some(err) = &self.failed {
            return RespParseResult::Error(err.clone());
        }

        if self.frames.is_empty() {
            self.frames.push(Frame::Root);
        }

        loop {
            match self.parse_step(buf) {
                Ok(Some(ParsedItem::FramePushed)) => {
                    continue;
                }
                Ok(Some(ParsedItem::Value(val))) => {
                    // We got a value, inject it into the current frame
                    match self.handle_parsed_value(val) {
                        Some(final_value) => return RespParseResult::Complete(final_value),
                        None => continue,
                    }
                }
                Ok(None) => return RespParseResult::Incomplete,
                Err(e) => {
                    self.failed = Some(e.clone());
                    return RespParseResult::Error(e);
                }
            }
        }
    }

    // Injects a finished value into the top frame, unwinding enclosing
    // arrays as they fill up. Returns `Some(RespValue)` once the root
    // value is complete, `None` while arrays still expect elements.
    fn handle_parsed_value(&mut self, mut value: RespValue) -> Option<RespValue> {
        loop {
            match self.frames.last_mut() {
                // Pop the root frame so the parser is reset for the
                // next pipelined value; `parse` re-seeds it.
                None | Some(Frame::Root) => {
                    self.frames.pop();
                    return Some(value);
                }
                Some(Frame::Array { expected, elements }) => {
                    elements.push(value);
                    *expected -= 1;
                    if *expected > 0 {
                        return None;
                    }
                    value = RespValue::Array(std::mem::take(elements));
                    self.frames.pop();
                }
            }
        }
    }

    /// Tries to parse the next token.
    /// A primitive yields `Ok(Some(ParsedItem::Value(v)))`; an array
    /// header pushes a frame and yields `Ok(Some(ParsedItem::FramePushed))`;
    /// insufficient data yields `Ok(None)` with the buffer untouched.
    fn parse_step(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ProtocolError> {
        if buf.is_empty() {
            return Ok(None);
        }

        // Peek type marker
        match buf[0] {
            SIMPLE_STRING => self.parse_simple_string(buf),
            ERROR => self.parse_error(buf),
            INTEGER => self.parse_integer(buf),
            BULK_STRING => self.parse_bulk_string(buf),
            ARRAY => self.start_array(buf),
            other => Err(ProtocolError::InvalidTypeMarker(other as char)),
        }
    }

    fn parse_simple_string(
        &mut self,
        buf: &mut BytesMut,
    ) -> Result<Option<ParsedItem>, ProtocolError> {
        // buf[0] is '+'
        if let Some((line, total_len)) = peek_line(&buf[1..]) {
            let line_len = line.len();
            let frame = buf.split_to(1 + total_len).freeze();
            let value = frame.slice(1..1 + line_len);
            Ok(Some(ParsedItem::Value(RespValue::SimpleString(value))))
        } else {
            Ok(None)
        }
    }

    fn parse_error(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ProtocolError> {
        if let Some((line, total_len)) = peek_line(&buf[1..]) {
            let line_len = line.len();
            let frame = buf.split_to(1 + total_len).freeze();
            let value = frame.slice(1..1 + line_len);
            Ok(Some(ParsedItem::Value(RespValue::Error(value))))
        } else {
            Ok(None)
        }
    }

    fn parse_integer(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ProtocolError> {
        if let Some((line, total_len)) = peek_line(&buf[1..]) {
            let num = parse_integer(line)?;
            buf.advance(1 + total_len);
            Ok(Some(ParsedItem::Value(RespValue::Integer(num))))
        } else {
            Ok(None)
        }
    }

    fn parse_bulk_string(
        &mut self,
        buf: &mut BytesMut,
    ) -> Result<Option<ParsedItem>, ProtocolError> {
        // $6\r\nfoobar\r\n
        if let Some((line, len_consumed)) = peek_line(&buf[1..]) {
            let length = parse_integer(line)?;

            if length == -1 {
                buf.advance(1 + len_consumed);
                return Ok(Some(ParsedItem::Value(RespValue::NullBulkString)));
            }
            if length < -1 {
                return Err(ProtocolError::InvalidBulkLength(length));
            }

            let length = length as usize;
            let total_needed = 1 + len_consumed + length + 2; // +2 for CRLF

            if buf.len() < total_needed {
                // Keep the header in place; it is re-read once the body
                // has fully arrived, so no byte is consumed twice.
                return Ok(None);
            }

            buf.advance(1 + len_consumed);
            let data = buf.split_to(length).freeze();
            if &buf[0..2] != CRLF {
                return Err(ProtocolError::InvalidFormat(
                    "Missing CRLF after bulk string".to_string(),
                ));
            }
            buf.advance(2);

            Ok(Some(ParsedItem::Value(RespValue::BulkString(data))))
        } else {
            Ok(None)
        }
    }

    fn start_array(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ProtocolError> {
        if let Some((line, total_len)) = peek_line(&buf[1..]) {
            let count = parse_integer(line)?;

            if count == -1 {
                buf.advance(1 + total_len);
                return Ok(Some(ParsedItem::Value(RespValue::NullArray)));
            }
            if count < -1 {
                return Err(ProtocolError::InvalidArrayLength(count));
            }

            buf.advance(1 + total_len);

            let count = count as usize;
            if count == 0 {
                return Ok(Some(ParsedItem::Value(RespValue::Array(Vec::new()))));
            }

            self.frames.push(Frame::Array {
                expected: count,
                elements: Vec::with_capacity(count),
            });
            Ok(Some(ParsedItem::FramePushed))
        } else {
            Ok(None)
        }
    }
}

/// Convenience function for one-off parsing of a caller-owned buffer.
///
/// Creates a temporary parser and tries to parse one value; a buffer
/// holding only part of a message maps to [`ProtocolError::UnexpectedEof`].
/// Use [`RespParser`] directly when streaming.
pub fn parse(buf: &mut BytesMut) -> Result<RespValue, ProtocolError> {
    let mut parser = RespParser::new();
    match parser.parse(buf) {
        RespParseResult::Complete(val) => Ok(val),
        RespParseResult::Incomplete => Err(ProtocolError::UnexpectedEof),
        RespParseResult::Error(e) => Err(e),
    }
}
