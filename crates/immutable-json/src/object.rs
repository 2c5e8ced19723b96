use std::fmt;

use indexmap::IndexMap;

use crate::{JsonNumber, Value, WriteOptions};

/// A JSON object: unique string keys in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonObject {
    fields: IndexMap<String, Value>,
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get_as_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_as_number(&self, name: &str) -> Option<&JsonNumber> {
        self.get(name).and_then(Value::as_number)
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.fields.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.fields.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Returns a copy with `name` bound to `value`. Replacing an existing key
    /// keeps its position.
    pub fn put(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(name.into(), value.into());
        Self { fields }
    }

    /// Returns a copy without `name`, preserving the order of the rest.
    pub fn remove(&self, name: &str) -> Self {
        let mut fields = self.fields.clone();
        fields.shift_remove(name);
        Self { fields }
    }

    /// Fields of `other` are added after ours; on a shared key `other` wins.
    pub fn merge(&self, other: &JsonObject) -> Self {
        let mut fields = self.fields.clone();
        for (k, v) in &other.fields {
            fields.insert(k.clone(), v.clone());
        }
        Self { fields }
    }

    pub fn filter_keys(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.fields
            .iter()
            .filter(|(k, _)| keep(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, Value)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::write::write_object(self, &WriteOptions::NO_SPACES))
    }
}
