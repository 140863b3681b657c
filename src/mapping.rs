//! Ordered map type for YAML mappings.
//!
//! [`Mapping`] wraps an [`IndexMap`] keyed by [`Value`], so any node (not only
//! strings) can be a key and entries are emitted in insertion order unless a
//! key sort is requested in the dump options.
//!
//! ## Examples
//!
//! ```rust
//! use yaml_dump::{Mapping, Value};
//!
//! let mut map = Mapping::new();
//! map.insert("name".into(), Value::from("Alice"));
//! map.insert("age".into(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get_str("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// An insertion-ordered map of YAML keys to YAML values.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::{Mapping, Value};
///
/// let mut map = Mapping::new();
/// map.insert("first".into(), Value::from(1));
/// map.insert("second".into(), Value::from(2));
///
/// let keys: Vec<_> = map.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping(IndexMap<Value, Value>);

impl Mapping {
    /// Creates an empty `Mapping`.
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    /// Creates an empty `Mapping` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_dump::{Mapping, Value};
    ///
    /// let mut map = Mapping::new();
    /// assert!(map.insert("key".into(), Value::from(42)).is_none());
    /// assert!(map.insert("key".into(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a string key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.0.get(&Value::from(key))
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Value, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Value, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.0.iter()
    }
}

// Equality ignores entry order, so the hash must too.
impl Hash for Mapping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined = 0u64;
        for (key, value) in &self.0 {
            let mut entry = DefaultHasher::new();
            key.hash(&mut entry);
            value.hash(&mut entry);
            combined ^= entry.finish();
        }
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

impl IntoIterator for Mapping {
    type Item = (Value, Value);
    type IntoIter = indexmap::map::IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Value, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        Mapping(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_and_replace() {
        let mut map = Mapping::new();
        map.insert("b".into(), Value::from(1));
        map.insert("a".into(), Value::from(2));
        map.insert("b".into(), Value::from(3));

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        assert_eq!(
            entries,
            vec![
                ("b".to_string(), "3".to_string()),
                ("a".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_non_string_keys() {
        let mut map = Mapping::new();
        map.insert(Value::from(1), Value::from("one"));
        map.insert(Value::Null, Value::from("nothing"));
        assert_eq!(map.get(&Value::from(1)).and_then(Value::as_str), Some("one"));
        assert_eq!(map.get(&Value::Null).and_then(Value::as_str), Some("nothing"));
        assert!(map.get_str("1").is_none());
    }

    #[test]
    fn test_nested_mapping_as_key() {
        let inner: Mapping = vec![(Value::from("x"), Value::from(1))].into_iter().collect();
        let mut outer = Mapping::new();
        outer.insert(Value::Mapping(inner.clone()), Value::Bool(true));
        assert_eq!(outer.get(&Value::Mapping(inner)), Some(&Value::Bool(true)));
    }
}
