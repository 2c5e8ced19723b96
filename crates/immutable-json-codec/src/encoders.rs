//! Elementary and structural encoders, mirroring [`crate::decoders`].

use std::collections::{BTreeSet, HashSet, VecDeque};

use immutable_json::{JsonNumber, JsonObject, Value};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::Encoder;

pub fn identity() -> Encoder<Value> {
    Encoder::new(Value::clone)
}

pub fn string() -> Encoder<String> {
    Encoder::new(|s: &String| Value::from(s.as_str()))
}

pub fn bool() -> Encoder<bool> {
    Encoder::new(|b: &bool| Value::Bool(*b))
}

pub fn number() -> Encoder<JsonNumber> {
    Encoder::new(|n: &JsonNumber| Value::number(n.clone()))
}

pub fn decimal() -> Encoder<Decimal> {
    Encoder::new(|d: &Decimal| Value::from(*d))
}

pub fn i64() -> Encoder<i64> {
    Encoder::new(|n: &i64| Value::from(*n))
}

pub fn i32() -> Encoder<i32> {
    Encoder::new(|n: &i32| Value::from(*n))
}

pub fn u64() -> Encoder<u64> {
    Encoder::new(|n: &u64| Value::from(*n))
}

/// NaN and the infinities have no JSON form and encode as `null`.
pub fn f64() -> Encoder<f64> {
    Encoder::new(|n: &f64| Value::from(*n))
}

#[cfg(feature = "uuid")]
pub fn uuid() -> Encoder<::uuid::Uuid> {
    Encoder::new(|id: &::uuid::Uuid| Value::from(id.to_string()))
}

#[cfg(feature = "url")]
pub fn url() -> Encoder<::url::Url> {
    Encoder::new(|u: &::url::Url| Value::from(u.as_str()))
}

#[cfg(feature = "url")]
pub fn uri() -> Encoder<crate::UriReference> {
    Encoder::new(|u: &crate::UriReference| Value::from(u.as_str()))
}

/// RFC 3339 in UTC. A timestamp whose UTC form leaves the supported range
/// keeps its own offset, and one RFC 3339 cannot express falls back to the
/// `time` crate's display form.
#[cfg(feature = "time")]
pub fn iso_date_time_utc() -> Encoder<::time::OffsetDateTime> {
    use ::time::format_description::well_known::Rfc3339;
    Encoder::new(|dt: &::time::OffsetDateTime| {
        let utc = dt.checked_to_offset(::time::UtcOffset::UTC).unwrap_or(*dt);
        Value::from(utc.format(&Rfc3339).unwrap_or_else(|_| utc.to_string()))
    })
}

/// Same text as [`iso_date_time_utc`]; pairs with the strict instant decoder.
#[cfg(feature = "time")]
pub fn iso_instant_utc() -> Encoder<::time::OffsetDateTime> {
    iso_date_time_utc()
}

#[cfg(feature = "time")]
pub fn date_time_with<F>(format: F) -> Encoder<::time::OffsetDateTime>
where
    F: ::time::formatting::Formattable + Send + Sync + 'static,
{
    Encoder::new(move |dt: &::time::OffsetDateTime| {
        Value::from(dt.format(&format).unwrap_or_else(|_| dt.to_string()))
    })
}

#[cfg(feature = "time")]
pub fn iso_date() -> Encoder<::time::Date> {
    Encoder::new(|date: &::time::Date| Value::from(date.to_string()))
}

pub fn option<A: 'static>(encoder: Encoder<A>) -> Encoder<Option<A>> {
    encoder.option()
}

pub fn list<A: 'static>(encoder: Encoder<A>) -> Encoder<Vec<A>> {
    encoder.list()
}

/// Elements are written in the set's iteration order, which is unspecified.
pub fn set<A: 'static>(encoder: Encoder<A>) -> Encoder<HashSet<A>> {
    encoder.iterable()
}

pub fn sorted_set<A: 'static>(encoder: Encoder<A>) -> Encoder<BTreeSet<A>> {
    encoder.iterable()
}

pub fn deque<A: 'static>(encoder: Encoder<A>) -> Encoder<VecDeque<A>> {
    encoder.iterable()
}

pub fn string_map<A: 'static>(encoder: Encoder<A>) -> Encoder<IndexMap<String, A>> {
    Encoder::new(move |map: &IndexMap<String, A>| {
        Value::Object(
            map.iter()
                .map(|(key, a)| (key.clone(), encoder.to_json(a)))
                .collect::<JsonObject>(),
        )
    })
}
