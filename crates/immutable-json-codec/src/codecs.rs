//! Ready-made codecs pairing [`crate::decoders`] with [`crate::encoders`].

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;

use immutable_json::{JsonNumber, Value};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{decoders, encoders, Codec, CodecValue};

macro_rules! elementary {
    ($($(#[$meta:meta])* $name:ident => $ty:ty),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name() -> Codec<$ty> {
                Codec::lift(decoders::$name(), encoders::$name())
            }
        )*
    };
}

elementary! {
    identity => Value,
    string => String,
    bool => bool,
    number => JsonNumber,
    decimal => Decimal,
    i32 => i32,
    i64 => i64,
    u64 => u64,
    /// Non-finite values encode as `null`, which does not decode back.
    f64 => f64,
    #[cfg(feature = "uuid")]
    uuid => ::uuid::Uuid,
    #[cfg(feature = "url")]
    url => ::url::Url,
    /// Absolute URLs and relative references.
    #[cfg(feature = "url")]
    uri => crate::UriReference,
    #[cfg(feature = "time")]
    iso_date_time_utc => ::time::OffsetDateTime,
    /// Only timestamps written in UTC decode.
    #[cfg(feature = "time")]
    iso_instant_utc => ::time::OffsetDateTime,
    #[cfg(feature = "time")]
    iso_date => ::time::Date,
}

/// A timestamp read and written with a caller-chosen format.
#[cfg(feature = "time")]
pub fn date_time_with<F>(format: F) -> Codec<::time::OffsetDateTime>
where
    F: ::time::parsing::Parsable + ::time::formatting::Formattable + Clone + Send + Sync + 'static,
{
    Codec::lift(
        decoders::date_time_with(format.clone()),
        encoders::date_time_with(format),
    )
}

pub fn option<A: CodecValue>(codec: Codec<A>) -> Codec<Option<A>> {
    codec.option()
}

pub fn list<A: CodecValue>(codec: Codec<A>) -> Codec<Vec<A>> {
    codec.list()
}

pub fn set<A: CodecValue + Eq + Hash>(codec: Codec<A>) -> Codec<HashSet<A>> {
    codec.set()
}

pub fn sorted_set<A: CodecValue + Ord>(codec: Codec<A>) -> Codec<BTreeSet<A>> {
    let (decoder, encoder) = codec.into_parts();
    Codec::lift(decoders::sorted_set(decoder), encoders::sorted_set(encoder))
}

pub fn deque<A: CodecValue>(codec: Codec<A>) -> Codec<VecDeque<A>> {
    let (decoder, encoder) = codec.into_parts();
    Codec::lift(decoders::deque(decoder), encoders::deque(encoder))
}

pub fn string_map<A: CodecValue>(codec: Codec<A>) -> Codec<IndexMap<String, A>> {
    let (decoder, encoder) = codec.into_parts();
    Codec::lift(decoders::string_map(decoder), encoders::string_map(encoder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_numbers_survive() {
        let n: JsonNumber = "123456789012345678901234567890.000001".parse().unwrap();
        let c = number();
        assert_eq!(c.from_json(&c.to_json(&n)), Ok(n));
    }

    #[test]
    fn test_string_map_round_trip() {
        let c = string_map(list(bool()));
        let value = Value::object([
            ("a", Value::array([true])),
            ("b", Value::array(Vec::<bool>::new())),
        ]);
        let decoded = c.from_json(&value).unwrap();
        assert_eq!(decoded["a"], vec![true]);
        assert_eq!(c.to_json(&decoded), value);
    }

    #[test]
    fn test_deque_and_sorted_set() {
        let q = deque(i64());
        let decoded = q.from_json(&Value::array([3, 1])).unwrap();
        assert_eq!(decoded.front(), Some(&3));
        assert_eq!(q.to_json(&decoded).nospaces(), "[3,1]");

        let s = sorted_set(string());
        assert_eq!(
            s.to_json(&s.from_json(&Value::array(["z", "a"])).unwrap()).nospaces(),
            r#"["a","z"]"#
        );
    }

    #[cfg(feature = "url")]
    #[test]
    fn test_uri_round_trip() {
        let c = uri();
        for text in ["https://example.com/a", "a/b", "#frag"] {
            let v = Value::from(text);
            assert_eq!(c.to_json(&c.from_json(&v).unwrap()), v);
        }
    }

    #[cfg(feature = "time")]
    #[test]
    fn test_instant_round_trip() {
        use ::time::macros::datetime;
        let c = iso_instant_utc();
        let dt = datetime!(2022-11-12 13:14:15 UTC);
        assert_eq!(c.to_json(&dt), Value::from("2022-11-12T13:14:15Z"));
        assert_eq!(c.from_json(&c.to_json(&dt)), Ok(dt));
    }

    #[cfg(feature = "time")]
    #[test]
    fn test_date_time_with_custom_format() {
        use ::time::macros::{datetime, format_description};
        let c = date_time_with(format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second] [offset_hour sign:mandatory]:[offset_minute]"
        ));
        let dt = datetime!(2020-01-02 03:04 +01:00);
        let encoded = c.to_json(&dt);
        assert_eq!(encoded, Value::from("2020/01/02 03:04:00 +01:00"));
        assert_eq!(c.from_json(&encoded), Ok(dt));
    }
}
