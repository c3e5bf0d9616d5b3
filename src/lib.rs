//! # respwire - RESP2 Protocol Codec
//!
//! An incremental parser and command encoder for RESP2 (the Redis
//! Serialization Protocol), built for client read loops.
//!
//! ## Features
//!
//! - **Streaming parsing**: feed arbitrary byte chunks as they arrive
//!   from a socket; partial values are buffered across feeds
//! - **Pipelining**: repeated polling drains every complete buffered
//!   reply in FIFO order
//! - **Zero-copy payloads**: bulk string bodies are `Bytes` slices split
//!   off the parser's buffer
//! - **Closed value model**: the five RESP2 reply types as one enum,
//!   with null and empty bulk strings/arrays kept distinct
//!
//! ## Example
//!
//! ```rust
//! use respwire::{RespParseResult, RespParser, RespValue, encode_command};
//!
//! // Build a request
//! let request = encode_command("GET", ["mykey"]);
//! assert_eq!(&request[..], b"*2\r\n$3\r\nGET\r\n$5\r\nmykey\r\n");
//!
//! // Parse the reply, however the socket fragments it
//! let mut parser = RespParser::new();
//! parser.feed(b"$5\r\nhel");
//! assert_eq!(parser.try_next(), RespParseResult::Incomplete);
//! parser.feed(b"lo\r\n");
//! assert_eq!(
//!     parser.try_next(),
//!     RespParseResult::Complete(RespValue::bulk_string("hello")),
//! );
//! ```

mod encoder;
mod error;
mod parser;
mod types;
mod utils;

pub use encoder::Arg;
pub use encoder::RespEncode;
pub use encoder::encode_command;
pub use encoder::encode_command_to;
pub use error::ProtocolError;
pub use parser::RespParseResult;
pub use parser::RespParser;
pub use parser::parse;
pub use types::RespValue;
