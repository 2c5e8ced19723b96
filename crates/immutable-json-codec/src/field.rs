//! Decoders and codecs bound to an object field name.

use immutable_json::{JsonObject, Value};
use tracing::trace;

use crate::{Codec, CodecValue, DecodeError, DecodeJson, DecodeResult, Decoder};

/// A value read from one named member of an object.
pub trait NamedField {
    type Output: CodecValue;

    fn name(&self) -> &str;

    fn decode_from(&self, object: &JsonObject) -> DecodeResult<Self::Output>;
}

/// A named field that can also be written back.
pub trait NamedFieldEncoder: NamedField {
    fn encode_value(&self, value: &Self::Output) -> Value;
}

/// Decodes member `name` of `object` with `decoder`.
///
/// A missing member fails with `'<name>' not found in <object>`. When the
/// decoder carries a default value, any failure at this field is replaced by
/// that default. Remaining failures are prefixed with the field name unless
/// they already report this name as not found.
pub fn decode_named<A, D>(object: &JsonObject, name: &str, decoder: &D) -> DecodeResult<A>
where
    D: DecodeJson<A> + ?Sized,
{
    let result = match object.get(name) {
        Some(value) => decoder.from_json(value),
        None => Err(DecodeError::not_found(name, object)),
    };
    let err = match result {
        Ok(a) => return Ok(a),
        Err(err) => err,
    };
    if let Some(default) = decoder.default_value() {
        trace!(field = name, error = %err, "falling back to default value");
        return Ok(default);
    }
    if err.is_not_found_for(name) {
        Err(err)
    } else {
        Err(err.in_field(name))
    }
}

pub fn decode_field<F: NamedField + ?Sized>(object: &JsonObject, field: &F) -> DecodeResult<F::Output> {
    field.decode_from(object)
}

#[derive(Debug, Clone)]
pub struct FieldDecoder<A> {
    name: String,
    decoder: Decoder<A>,
}

impl<A: CodecValue> FieldDecoder<A> {
    pub fn new(name: impl Into<String>, decoder: Decoder<A>) -> Self {
        Self {
            name: name.into(),
            decoder,
        }
    }

    pub fn decoder(&self) -> &Decoder<A> {
        &self.decoder
    }

    pub fn with_default_value(self, default: A) -> Self {
        Self {
            name: self.name,
            decoder: self.decoder.with_default_value(default),
        }
    }
}

impl<A: CodecValue> NamedField for FieldDecoder<A> {
    type Output = A;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode_from(&self, object: &JsonObject) -> DecodeResult<A> {
        decode_named(object, &self.name, &self.decoder)
    }
}

#[derive(Debug, Clone)]
pub struct NamedCodec<A> {
    name: String,
    codec: Codec<A>,
}

impl<A: CodecValue> NamedCodec<A> {
    pub fn new(name: impl Into<String>, codec: Codec<A>) -> Self {
        Self {
            name: name.into(),
            codec,
        }
    }

    pub fn codec(&self) -> &Codec<A> {
        &self.codec
    }

    pub fn with_default_value(self, default: A) -> Self {
        Self {
            name: self.name,
            codec: self.codec.with_default_value(default),
        }
    }

    /// The decoding half, for decode-only constructors.
    pub fn to_field_decoder(&self) -> FieldDecoder<A> {
        FieldDecoder::new(self.name.clone(), self.codec.decoder().clone())
    }
}

impl<A: CodecValue> NamedField for NamedCodec<A> {
    type Output = A;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode_from(&self, object: &JsonObject) -> DecodeResult<A> {
        decode_named(object, &self.name, &self.codec)
    }
}

impl<A: CodecValue> NamedFieldEncoder for NamedCodec<A> {
    fn encode_value(&self, value: &A) -> Value {
        self.codec.to_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codecs, decoders};

    fn obj(entries: Vec<(&str, Value)>) -> JsonObject {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_missing_field() {
        let age = decoders::i32().field("age");
        assert_eq!(
            decode_field(&JsonObject::new(), &age).unwrap_err().to_string(),
            "'age' not found in {}"
        );
    }

    #[test]
    fn test_wrong_kind_is_wrapped() {
        let age = decoders::i32().field("age");
        let o = obj(vec![("age", Value::from("x"))]);
        assert_eq!(
            decode_field(&o, &age).unwrap_err().to_string(),
            "'age' failed with message: 'JString is not a JNumber'"
        );
    }

    #[test]
    fn test_default_wins_over_any_failure() {
        let age = decoders::i32().field("age").with_default_value(18);
        assert_eq!(decode_field(&JsonObject::new(), &age), Ok(18));
        assert_eq!(decode_field(&obj(vec![("age", Value::Null)]), &age), Ok(18));
        assert_eq!(decode_field(&obj(vec![("age", Value::from(40))]), &age), Ok(40));
    }

    #[test]
    fn test_not_found_context_is_the_searched_object() {
        let id = decoders::string().field("id");
        let o = obj(vec![("name", Value::from("x"))]);
        assert_eq!(
            decode_field(&o, &id).unwrap_err().to_string(),
            r#"'id' not found in {"name":"x"}"#
        );
    }

    #[test]
    fn test_named_codec() {
        let flag = codecs::bool().field("on");
        assert_eq!(flag.name(), "on");
        assert_eq!(flag.encode_value(&true), Value::Bool(true));
        assert_eq!(decode_field(&obj(vec![("on", Value::from(false))]), &flag), Ok(false));

        let as_decoder = flag.with_default_value(true).to_field_decoder();
        assert_eq!(decode_field(&JsonObject::new(), &as_decoder), Ok(true));
    }
}
