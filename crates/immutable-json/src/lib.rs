//! Immutable JSON document model.
//!
//! [`Value`] is a closed tree of null, boolean, number, string, array and
//! object nodes. Nothing in this crate mutates a value in place: operations
//! such as [`JsonObject::put`] return a new tree.
//!
//! Numbers are held as [`JsonNumber`], which keeps the literal text so large or
//! high-precision values are never rounded through `f64`. Objects keep their
//! insertion order.
//!
//! Text enters the model through a [`JsonParser`] and leaves it through
//! [`Value::write`].
//!
//! # Example
//!
//! ```
//! use immutable_json::{JsonParser, SerdeJsonParser, Value};
//!
//! let doc = SerdeJsonParser.parse_str(r#"{"name":"Ada","born":1815}"#).unwrap();
//! assert_eq!(doc.get("name").and_then(Value::as_str), Some("Ada"));
//! assert_eq!(doc.get("born").and_then(Value::as_i32), Some(1815));
//!
//! let updated = doc.as_object_or_empty().put("field", "maths");
//! assert_eq!(
//!     Value::from(updated).nospaces(),
//!     r#"{"name":"Ada","born":1815,"field":"maths"}"#
//! );
//! // The original document is unchanged.
//! assert!(doc.get("field").is_none());
//! ```

mod array;
mod convert;
mod number;
mod object;
pub mod parse;
mod value;
pub mod write;

pub use array::JsonArray;
pub use number::{JsonNumber, NumberFormatError};
pub use object::JsonObject;
pub use parse::{JsonParser, ParseError, SerdeJsonParser};
pub use value::{Value, ValueKind};
pub use write::WriteOptions;
