//! Record constructors over tuples of named fields.
//!
//! A tuple of up to 27 [`NamedField`]s decodes into the tuple of their values.
//! Every field is looked up in the same object, independently of the others,
//! and the per-field results are then folded left to right: [`decode`] reports
//! the first failing field in declaration order, [`decode_all_errors`] reports
//! every failing field.
//!
//! ```
//! use immutable_json::Value;
//! use immutable_json_codec::{codecs, object, Codec};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let person: Codec<Person> = object::codec(
//!     (codecs::string().field("name"), codecs::i32().field("age")),
//!     |(name, age)| Person { name, age },
//!     |p| (p.name.clone(), p.age),
//! );
//!
//! let json = Value::object([("name", Value::from("Ada")), ("age", Value::from(36))]);
//! let ada = person.from_json(&json).unwrap();
//! assert_eq!(ada.age, 36);
//! assert_eq!(person.to_json(&ada).nospaces(), r#"{"name":"Ada","age":36}"#);
//! ```

use std::sync::Arc;

use immutable_json::{JsonObject, Value};

use crate::field::{NamedField, NamedFieldEncoder};
use crate::{decoders, Codec, CodecValue, DecodeError, DecodeResult, Decoder, Encoder};

pub trait FieldTuple {
    type Output;

    /// Decodes every field, then keeps the first failure.
    fn decode_fields(&self, object: &JsonObject) -> DecodeResult<Self::Output>;

    /// Decodes every field, then reports all failures together.
    fn decode_fields_all_errors(&self, object: &JsonObject) -> DecodeResult<Self::Output>;
}

pub trait EncodeFieldTuple: FieldTuple {
    /// Writes the fields in declaration order.
    fn encode_fields(&self, values: &Self::Output) -> JsonObject;
}

macro_rules! field_tuple {
    ($($T:ident $idx:tt),+) => {
        impl<$($T: NamedField),+> FieldTuple for ($($T,)+) {
            type Output = ($(<$T as NamedField>::Output,)+);

            fn decode_fields(&self, object: &JsonObject) -> DecodeResult<Self::Output> {
                let results = ($(self.$idx.decode_from(object),)+);
                Ok(($(results.$idx?,)+))
            }

            fn decode_fields_all_errors(&self, object: &JsonObject) -> DecodeResult<Self::Output> {
                let results = ($(self.$idx.decode_from(object),)+);
                let mut errors = Vec::new();
                $(
                    if let Err(err) = &results.$idx {
                        errors.push(err.clone());
                    }
                )+
                if !errors.is_empty() {
                    return Err(DecodeError::Aggregate(errors));
                }
                Ok(($(results.$idx?,)+))
            }
        }

        impl<$($T: NamedFieldEncoder),+> EncodeFieldTuple for ($($T,)+) {
            fn encode_fields(&self, values: &Self::Output) -> JsonObject {
                [$((self.$idx.name().to_owned(), self.$idx.encode_value(&values.$idx)),)+]
                    .into_iter()
                    .collect()
            }
        }
    };
}

field_tuple!(T0 0);
field_tuple!(T0 0, T1 1);
field_tuple!(T0 0, T1 1, T2 2);
field_tuple!(T0 0, T1 1, T2 2, T3 3);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18, T19 19);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18, T19 19, T20 20);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18, T19 19, T20 20, T21 21);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18, T19 19, T20 20, T21 21, T22 22);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18, T19 19, T20 20, T21 21, T22 22, T23 23);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18, T19 19, T20 20, T21 21, T22 22, T23 23, T24 24);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18, T19 19, T20 20, T21 21, T22 22, T23 23, T24 24, T25 25);
field_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11, T12 12, T13 13, T14 14, T15 15, T16 16, T17 17, T18 18, T19 19, T20 20, T21 21, T22 22, T23 23, T24 24, T25 25, T26 26);

/// Builds a record decoder from a tuple of fields and an assembly function.
pub fn decode<T, TT>(
    fields: T,
    assemble: impl Fn(T::Output) -> TT + Send + Sync + 'static,
) -> Decoder<TT>
where
    T: FieldTuple + Send + Sync + 'static,
    TT: CodecValue,
{
    decoders::object(move |object| fields.decode_fields(object).map(&assemble))
}

/// Like [`decode`], but a failure lists every failing field.
pub fn decode_all_errors<T, TT>(
    fields: T,
    assemble: impl Fn(T::Output) -> TT + Send + Sync + 'static,
) -> Decoder<TT>
where
    T: FieldTuple + Send + Sync + 'static,
    TT: CodecValue,
{
    decoders::object(move |object| fields.decode_fields_all_errors(object).map(&assemble))
}

/// Builds a record encoder from a tuple of fields and a function splitting the
/// record into field values.
pub fn encode<T, TT>(
    fields: T,
    split: impl Fn(&TT) -> T::Output + Send + Sync + 'static,
) -> Encoder<TT>
where
    T: EncodeFieldTuple + Send + Sync + 'static,
    TT: 'static,
{
    Encoder::new(move |record| Value::Object(fields.encode_fields(&split(record))))
}

pub fn codec<T, TT>(
    fields: T,
    assemble: impl Fn(T::Output) -> TT + Send + Sync + 'static,
    split: impl Fn(&TT) -> T::Output + Send + Sync + 'static,
) -> Codec<TT>
where
    T: EncodeFieldTuple + Send + Sync + 'static,
    TT: CodecValue,
{
    let fields = Arc::new(fields);
    let decoding = Arc::clone(&fields);
    Codec::lift(
        decoders::object(move |object| decoding.decode_fields(object).map(&assemble)),
        Encoder::new(move |record| Value::Object(fields.encode_fields(&split(record)))),
    )
}
