//! Decode failures.
//!
//! Every failure renders to a single human-readable message. The variants keep
//! enough structure for the field-wrapping logic to inspect a failure without
//! parsing its text back.

use std::fmt;

use immutable_json::ValueKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A required field was absent. `context` is the compact text of the
    /// object that was searched.
    #[error("'{field}' not found in {context}")]
    NotFound { field: String, context: String },

    /// A field was present (or its lookup failed in a nested decoder) and
    /// decoding it failed.
    #[error("'{field}' failed with message: '{cause}'")]
    FieldFailed {
        field: String,
        cause: Box<DecodeError>,
    },

    /// Every failure of an aggregate-all fold, in input order.
    #[error("One or more results failed: {}", join_messages(.0))]
    Aggregate(Vec<DecodeError>),

    #[error("{found} is not a {expected}")]
    TypeMismatch {
        found: ValueKind,
        expected: ValueKind,
    },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("{0}")]
    Message(String),
}

impl DecodeError {
    pub fn msg(message: impl fmt::Display) -> Self {
        DecodeError::Message(message.to_string())
    }

    pub fn not_found(field: impl Into<String>, context: impl fmt::Display) -> Self {
        DecodeError::NotFound {
            field: field.into(),
            context: context.to_string(),
        }
    }

    pub fn type_mismatch(found: ValueKind, expected: ValueKind) -> Self {
        DecodeError::TypeMismatch { found, expected }
    }

    /// Wraps `self` as the failure of field `field`.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        DecodeError::FieldFailed {
            field: field.into(),
            cause: Box::new(self),
        }
    }

    /// The rendered message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether this failure's message reads "'`field`' not found".
    ///
    /// The whole rendered message is searched, the `context` of a
    /// [`DecodeError::NotFound`] included, so any nested failure or quoted
    /// object text mentioning a missing `field` also counts. Field wrapping
    /// relies on this to avoid prefixing a not-found failure twice.
    pub fn is_not_found_for(&self, field: &str) -> bool {
        self.to_string().contains(&format!("'{field}' not found"))
    }
}

fn join_messages(errors: &[DecodeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DecodeError::not_found("age", "{}").to_string(),
            "'age' not found in {}"
        );
        assert_eq!(
            DecodeError::type_mismatch(ValueKind::String, ValueKind::Number).to_string(),
            "JString is not a JNumber"
        );
        assert_eq!(
            DecodeError::type_mismatch(ValueKind::String, ValueKind::Number)
                .in_field("age")
                .to_string(),
            "'age' failed with message: 'JString is not a JNumber'"
        );
        assert_eq!(
            DecodeError::Aggregate(vec![DecodeError::msg("a"), DecodeError::msg("b")]).to_string(),
            "One or more results failed: a\nb"
        );
        assert_eq!(
            DecodeError::OutOfRange {
                value: "300".into(),
                target: "u8"
            }
            .to_string(),
            "300 is out of range for u8"
        );
    }

    #[test]
    fn test_not_found_detection() {
        let direct = DecodeError::not_found("name", "{}");
        assert!(direct.is_not_found_for("name"));
        assert!(!direct.is_not_found_for("age"));

        let nested = DecodeError::not_found("name", "{}").in_field("owner");
        assert!(nested.is_not_found_for("name"));
        assert!(!nested.is_not_found_for("owner"));

        let text = DecodeError::msg("'id' not found in {\"x\":1}");
        assert!(text.is_not_found_for("id"));

        let mismatch = DecodeError::type_mismatch(ValueKind::Null, ValueKind::String);
        assert!(!mismatch.is_not_found_for("id"));
    }

    #[test]
    fn test_not_found_detection_reads_the_context() {
        let err = DecodeError::not_found("a", r#"{"k":"'b' not found"}"#);
        assert!(err.is_not_found_for("a"));
        assert!(err.is_not_found_for("b"));
        assert!(!err.is_not_found_for("k"));

        let aggregate = DecodeError::Aggregate(vec![
            DecodeError::msg("x"),
            DecodeError::not_found("c", "{}").in_field("d"),
        ]);
        assert!(aggregate.is_not_found_for("c"));
        assert!(!aggregate.is_not_found_for("d"));
    }
}
