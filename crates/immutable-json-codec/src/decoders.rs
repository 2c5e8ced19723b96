//! Elementary and structural decoders.
//!
//! Elementary decoders accept exactly one node kind and fail with
//! `<found> is not a <expected>` for any other. Numeric decoders additionally
//! fail when the number does not fit the target type.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;

use immutable_json::{JsonNumber, JsonObject, Value, ValueKind};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::result::sequence;
use crate::{CodecValue, DecodeError, DecodeResult, Decoder};

fn mismatch(value: &Value, expected: ValueKind) -> DecodeError {
    DecodeError::type_mismatch(value.kind(), expected)
}

fn narrowed<T>(
    value: &Value,
    target: &'static str,
    convert: impl FnOnce(&JsonNumber) -> Option<T>,
) -> DecodeResult<T> {
    let n = value
        .as_number()
        .ok_or_else(|| mismatch(value, ValueKind::Number))?;
    convert(n).ok_or_else(|| DecodeError::OutOfRange {
        value: n.to_string(),
        target,
    })
}

// ── Elementary ────────────────────────────────────────────────────────────

/// Returns the node itself.
pub fn identity() -> Decoder<Value> {
    Decoder::new(|value| Ok(value.clone()))
}

pub fn string() -> Decoder<String> {
    Decoder::new(|value| {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch(value, ValueKind::String))
    })
}

pub fn bool() -> Decoder<bool> {
    Decoder::new(|value| value.as_bool().ok_or_else(|| mismatch(value, ValueKind::Bool)))
}

/// The number exactly as written.
pub fn number() -> Decoder<JsonNumber> {
    Decoder::new(|value| {
        value
            .as_number()
            .cloned()
            .ok_or_else(|| mismatch(value, ValueKind::Number))
    })
}

pub fn decimal() -> Decoder<Decimal> {
    Decoder::new(|value| narrowed(value, "Decimal", JsonNumber::as_decimal))
}

/// Fractional parts are truncated toward zero.
pub fn i64() -> Decoder<i64> {
    Decoder::new(|value| narrowed(value, "i64", JsonNumber::as_i64))
}

/// Fractional parts are truncated toward zero.
pub fn i32() -> Decoder<i32> {
    Decoder::new(|value| narrowed(value, "i32", JsonNumber::as_i32))
}

/// Fractional parts are truncated toward zero.
pub fn u64() -> Decoder<u64> {
    Decoder::new(|value| narrowed(value, "u64", JsonNumber::as_u64))
}

pub fn f64() -> Decoder<f64> {
    Decoder::new(|value| narrowed(value, "f64", JsonNumber::as_f64))
}

#[cfg(feature = "uuid")]
pub fn uuid() -> Decoder<::uuid::Uuid> {
    string().try_map(|s| ::uuid::Uuid::parse_str(&s))
}

#[cfg(feature = "url")]
pub fn url() -> Decoder<::url::Url> {
    string().try_map(|s| ::url::Url::parse(&s))
}

/// An absolute URL or a relative reference.
#[cfg(feature = "url")]
pub fn uri() -> Decoder<crate::UriReference> {
    string().try_map(|s| crate::UriReference::parse(&s))
}

/// An RFC 3339 timestamp with any offset, normalised to UTC.
#[cfg(feature = "time")]
pub fn iso_date_time_utc() -> Decoder<::time::OffsetDateTime> {
    use ::time::format_description::well_known::Rfc3339;
    string().flat_map(|s| {
        let dt = ::time::OffsetDateTime::parse(&s, &Rfc3339).map_err(DecodeError::msg)?;
        dt.checked_to_offset(::time::UtcOffset::UTC)
            .ok_or_else(|| DecodeError::msg(format!("{s} is out of range in UTC")))
    })
}

/// An RFC 3339 timestamp written in UTC (`Z` or a zero offset).
#[cfg(feature = "time")]
pub fn iso_instant_utc() -> Decoder<::time::OffsetDateTime> {
    use ::time::format_description::well_known::Rfc3339;
    string().flat_map(|s| {
        let dt = ::time::OffsetDateTime::parse(&s, &Rfc3339).map_err(DecodeError::msg)?;
        if dt.offset().is_utc() {
            Ok(dt)
        } else {
            Err(DecodeError::msg(format!("{s} is not a UTC instant")))
        }
    })
}

/// A timestamp in a caller-chosen format. The format must carry an offset.
#[cfg(feature = "time")]
pub fn date_time_with<F>(format: F) -> Decoder<::time::OffsetDateTime>
where
    F: ::time::parsing::Parsable + Send + Sync + 'static,
{
    string().try_map(move |s| ::time::OffsetDateTime::parse(&s, &format))
}

/// A calendar date such as `2024-02-29`.
#[cfg(feature = "time")]
pub fn iso_date() -> Decoder<::time::Date> {
    use ::time::format_description::well_known::Iso8601;
    string().try_map(|s| ::time::Date::parse(&s, &Iso8601::DATE))
}

// ── Structural ────────────────────────────────────────────────────────────

/// `null` decodes to `None`, and so does any value the inner decoder rejects.
/// Missing fields default to `None`.
pub fn option<A: CodecValue>(decoder: Decoder<A>) -> Decoder<Option<A>> {
    Decoder::new(move |value| {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(decoder.from_json(value).ok())
        }
    })
    .with_default_value(None)
}

/// Decodes every element, reporting all element failures together.
/// Non-array input reads as an empty array; missing fields default to empty.
pub fn list<A: CodecValue>(decoder: Decoder<A>) -> Decoder<Vec<A>> {
    Decoder::new(move |value| {
        sequence(
            value
                .as_array_or_empty()
                .iter()
                .map(|item| decoder.from_json(item)),
        )
    })
    .with_default_value(Vec::new())
}

pub fn set<A: CodecValue + Eq + Hash>(decoder: Decoder<A>) -> Decoder<HashSet<A>> {
    list(decoder)
        .map(|items| items.into_iter().collect::<HashSet<_>>())
        .with_default_value(HashSet::new())
}

pub fn sorted_set<A: CodecValue + Ord>(decoder: Decoder<A>) -> Decoder<BTreeSet<A>> {
    list(decoder)
        .map(|items| items.into_iter().collect::<BTreeSet<_>>())
        .with_default_value(BTreeSet::new())
}

pub fn deque<A: CodecValue>(decoder: Decoder<A>) -> Decoder<VecDeque<A>> {
    list(decoder)
        .map(VecDeque::from)
        .with_default_value(VecDeque::new())
}

/// Decodes every member value of an object, keyed by member name. Failures are
/// attributed to their key and reported together.
pub fn string_map<A: CodecValue>(decoder: Decoder<A>) -> Decoder<IndexMap<String, A>> {
    Decoder::new(move |value| {
        let object = value.as_object_or_empty();
        let entries = object.iter().map(|(key, item)| {
            decoder
                .from_json(item)
                .map(|a| (key.clone(), a))
                .map_err(|err| err.in_field(key.as_str()))
        });
        sequence(entries).map(|pairs| pairs.into_iter().collect::<IndexMap<_, _>>())
    })
    .with_default_value(IndexMap::new())
}

/// Lifts a function over objects; non-object input reads as an empty object.
pub fn object<A: CodecValue>(
    f: impl Fn(&JsonObject) -> DecodeResult<A> + Send + Sync + 'static,
) -> Decoder<A> {
    Decoder::new(move |value| f(&*value.as_object_or_empty()))
}
