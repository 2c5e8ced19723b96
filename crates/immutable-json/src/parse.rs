//! Parser adapters: raw JSON text → [`Value`].

use std::io::Read;

use serde_json::error::Category;
use thiserror::Error;
use tracing::debug;

use crate::Value;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("EOF while parsing a value at line {line} column {column}")]
    Eof { line: usize, column: usize },
    #[error("I/O error while reading JSON: {0}")]
    Io(String),
    #[error("input is not valid UTF-8: {0}")]
    Utf8(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => ParseError::Io(err.to_string()),
            Category::Eof => ParseError::Eof {
                line: err.line(),
                column: err.column(),
            },
            Category::Syntax | Category::Data => ParseError::Syntax {
                message: err.to_string(),
                line: err.line(),
                column: err.column(),
            },
        }
    }
}

/// Turns JSON text into a [`Value`].
///
/// Only [`parse_str`](JsonParser::parse_str) must be provided; the byte, reader
/// and convenience entry points are derived from it.
pub trait JsonParser {
    fn parse_str(&self, input: &str) -> Result<Value, ParseError>;

    fn parse_slice(&self, input: &[u8]) -> Result<Value, ParseError> {
        let text = std::str::from_utf8(input).map_err(|e| ParseError::Utf8(e.to_string()))?;
        self.parse_str(text)
    }

    fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Value, ParseError>
    where
        Self: Sized,
    {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| ParseError::Io(e.to_string()))?;
        self.parse_slice(&buf)
    }

    fn parse_opt(&self, input: &str) -> Option<Value> {
        self.parse_str(input).ok()
    }

    /// Parses or panics with the parse error message.
    fn parse_unsafe(&self, input: &str) -> Value {
        self.parse_str(input).unwrap_or_else(|err| panic!("{err}"))
    }
}

/// The default adapter, backed by `serde_json`.
///
/// Object key order is preserved and numbers keep their literal text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonParser;

impl JsonParser for SerdeJsonParser {
    fn parse_str(&self, input: &str) -> Result<Value, ParseError> {
        match serde_json::from_str::<serde_json::Value>(input) {
            Ok(value) => Ok(Value::from(value)),
            Err(err) => {
                debug!(error = %err, len = input.len(), "failed to parse JSON input");
                Err(ParseError::from(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let v = SerdeJsonParser.parse_str(r#"{"b":1,"a":2,"c":{"z":0,"y":1}}"#).unwrap();
        assert_eq!(v.nospaces(), r#"{"b":1,"a":2,"c":{"z":0,"y":1}}"#);
    }

    #[test]
    fn test_parse_preserves_number_text() {
        let text = r#"[1.50,12345678901234567890123456789,1e-7]"#;
        assert_eq!(SerdeJsonParser.parse_str(text).unwrap().nospaces(), text);
    }

    #[test]
    fn test_syntax_error() {
        let err = SerdeJsonParser.parse_str(r#"{"a" 1}"#).unwrap_err();
        match err {
            ParseError::Syntax { line, column, .. } => {
                assert_eq!(line, 1);
                assert!(column > 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_eof_error() {
        let err = SerdeJsonParser.parse_str(r#"[1, 2"#).unwrap_err();
        assert!(matches!(err, ParseError::Eof { .. }));
        assert!(err.to_string().contains("EOF"));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = SerdeJsonParser.parse_slice(&[b'"', 0xff, b'"']).unwrap_err();
        assert!(matches!(err, ParseError::Utf8(_)));
    }

    #[test]
    fn test_reader_and_opt() {
        let v = SerdeJsonParser.parse_reader("[true]".as_bytes()).unwrap();
        assert_eq!(v, Value::array([true]));
        assert_eq!(SerdeJsonParser.parse_opt("nope"), None);
    }

    #[test]
    #[should_panic(expected = "line 1")]
    fn test_parse_unsafe_panics() {
        SerdeJsonParser.parse_unsafe("{");
    }
}
