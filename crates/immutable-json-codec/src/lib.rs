//! Composable decoders, encoders and codecs for [`immutable_json::Value`].
//!
//! A [`Decoder<A>`] turns a tree into a [`DecodeResult<A>`], an [`Encoder<A>`]
//! turns an `A` back into a tree, and a [`Codec<A>`] pairs the two. All of them
//! are immutable after construction, cheap to clone and safe to share across
//! threads.
//!
//! Failures never panic inside the combinators. They travel through
//! [`DecodeResult`] until the caller folds the result or escalates it with
//! [`DecodeResultExt::unsafe_get`].
//!
//! - [`decoders`], [`encoders`] and [`codecs`] hold the elementary and
//!   container building blocks.
//! - [`object`] assembles records from up to 27 named fields.
//! - [`ParseAndDecode`] goes straight from text to a typed value.
//!
//! ```
//! use immutable_json::SerdeJsonParser;
//! use immutable_json_codec::{decoders, object, ParseAndDecode};
//!
//! let pair = object::decode(
//!     (decoders::string().field("name"), decoders::i32().field("age")),
//!     |(name, age)| (name, age),
//! );
//!
//! let err = SerdeJsonParser.decode_str(r#"{"name":"Ada","age":"old"}"#, &pair).unwrap_err();
//! assert_eq!(err.to_string(), "'age' failed with message: 'JString is not a JNumber'");
//! ```

mod codec;
pub mod codecs;
mod decoder;
pub mod decoders;
mod encoder;
pub mod encoders;
mod error;
pub mod field;
pub mod object;
mod parse;
pub mod result;
#[cfg(feature = "url")]
mod uri;

pub use codec::{Codec, Iso};
pub use decoder::{CodecValue, DecodeJson, Decoder};
pub use encoder::{EncodeJson, Encoder};
pub use error::DecodeError;
pub use field::{decode_field, decode_named, FieldDecoder, NamedCodec, NamedField, NamedFieldEncoder};
pub use parse::{encode_to_string, ParseAndDecode};
pub use result::{fail, ok, sequence, sequence_first, DecodeResult, DecodeResultExt};
#[cfg(feature = "url")]
pub use uri::UriReference;
