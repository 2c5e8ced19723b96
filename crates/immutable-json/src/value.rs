//! The immutable JSON tree.

use std::borrow::Cow;
use std::fmt;

use rust_decimal::Decimal;

use crate::{JsonArray, JsonNumber, JsonObject, WriteOptions};

/// The kind of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "JNull",
            ValueKind::Bool => "JBoolean",
            ValueKind::Number => "JNumber",
            ValueKind::String => "JString",
            ValueKind::Array => "JArray",
            ValueKind::Object => "JObject",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON value.
///
/// Values are never changed in place: every operation that "modifies" a tree
/// returns a new one and leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Array(JsonArray),
    Object(JsonObject),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn number(n: impl Into<JsonNumber>) -> Self {
        Value::Number(n.into())
    }

    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    // ── Predicates ────────────────────────────────────────────────────────

    /// True only for an explicit `null`; a missing field is not a value at all.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        self.as_number().and_then(JsonNumber::as_decimal)
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_number().and_then(JsonNumber::as_i32)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(JsonNumber::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(JsonNumber::as_f64)
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Borrows the array, or yields an empty one for any other kind.
    pub fn as_array_or_empty(&self) -> Cow<'_, JsonArray> {
        match self {
            Value::Array(a) => Cow::Borrowed(a),
            _ => Cow::Owned(JsonArray::new()),
        }
    }

    /// Borrows the object, or yields an empty one for any other kind.
    pub fn as_object_or_empty(&self) -> Cow<'_, JsonObject> {
        match self {
            Value::Object(o) => Cow::Borrowed(o),
            _ => Cow::Owned(JsonObject::new()),
        }
    }

    /// Looks up a field when this value is an object.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(name))
    }

    // ── Writing ───────────────────────────────────────────────────────────

    pub fn write(&self, options: &WriteOptions) -> String {
        crate::write::write_value(self, options)
    }

    /// Compact form without any whitespace.
    pub fn nospaces(&self) -> String {
        self.write(&WriteOptions::NO_SPACES)
    }

    pub fn spaces2(&self) -> String {
        self.write(&WriteOptions::SPACES2)
    }

    pub fn spaces4(&self) -> String {
        self.write(&WriteOptions::SPACES4)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nospaces())
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        JsonNumber::try_from(n).map_or(Value::Null, Value::Number)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d.into())
    }
}

impl From<JsonNumber> for Value {
    fn from(n: JsonNumber) -> Self {
        Value::Number(n)
    }
}

impl From<JsonArray> for Value {
    fn from(a: JsonArray) -> Self {
        Value::Array(a)
    }
}

impl From<JsonObject> for Value {
    fn from(o: JsonObject) -> Self {
        Value::Object(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(JsonArray::from(items))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
