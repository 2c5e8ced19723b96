use std::fmt;

use crate::{Value, WriteOptions};

/// An ordered sequence of JSON values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonArray {
    items: Vec<Value>,
}

impl JsonArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// The string elements, skipping anything that is not a string.
    pub fn strings(&self) -> Vec<&str> {
        self.items.iter().filter_map(Value::as_str).collect()
    }

    pub fn append(&self, value: impl Into<Value>) -> Self {
        let mut items = self.items.clone();
        items.push(value.into());
        Self { items }
    }

    pub fn prepend(&self, value: impl Into<Value>) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.push(value.into());
        items.extend(self.items.iter().cloned());
        Self { items }
    }

    pub fn concat(&self, other: &JsonArray) -> Self {
        self.items.iter().chain(other.items.iter()).cloned().collect()
    }

    /// Inserts before `index`; an index past the end appends.
    pub fn insert(&self, index: usize, value: impl Into<Value>) -> Self {
        let mut items = self.items.clone();
        items.insert(index.min(items.len()), value.into());
        Self { items }
    }

    /// Removes the element at `index`; out-of-range indices return a copy.
    pub fn remove(&self, index: usize) -> Self {
        let mut items = self.items.clone();
        if index < items.len() {
            items.remove(index);
        }
        Self { items }
    }

    pub fn map(&self, f: impl FnMut(&Value) -> Value) -> Self {
        self.items.iter().map(f).collect()
    }

    pub fn map_to_vec<A>(&self, f: impl FnMut(&Value) -> A) -> Vec<A> {
        self.items.iter().map(f).collect()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl From<Vec<Value>> for JsonArray {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl FromIterator<Value> for JsonArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for JsonArray {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::write::write_array(self, &WriteOptions::NO_SPACES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_leave_original_untouched() {
        let base: JsonArray = vec![Value::from(1), Value::from(2)].into();
        let appended = base.append(3);
        let prepended = base.prepend(0);
        let removed = base.remove(0);

        assert_eq!(base.len(), 2);
        assert_eq!(appended.to_string(), "[1,2,3]");
        assert_eq!(prepended.to_string(), "[0,1,2]");
        assert_eq!(removed.to_string(), "[2]");
    }

    #[test]
    fn test_insert_and_concat() {
        let base: JsonArray = vec![Value::from("a"), Value::from("c")].into();
        assert_eq!(base.insert(1, "b").strings(), vec!["a", "b", "c"]);
        assert_eq!(base.insert(99, "z").last(), Some(&Value::from("z")));
        assert_eq!(base.concat(&base).len(), 4);
        assert_eq!(base.remove(5), base);
    }

    #[test]
    fn test_strings_skips_other_kinds() {
        let arr: JsonArray = vec![Value::from("x"), Value::from(1), Value::Null, Value::from("y")].into();
        assert_eq!(arr.strings(), vec!["x", "y"]);
    }
}
