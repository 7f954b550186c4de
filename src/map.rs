//! Ordered backing store for collections.
//!
//! This module provides [`OrderedMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for collection entries. Insertion order is
//! the iteration order of every collection, so the wrapper only exposes
//! order-preserving operations (`shift_remove` rather than `swap_remove`,
//! positional insertion for `prepend`).
//!
//! ## Why IndexMap?
//!
//! `IndexMap` gives the three things an ordered associative collection
//! needs from its store:
//!
//! - **Insertion order**: iteration follows the order entries were added
//! - **Keyed upsert**: re-assigning an existing key keeps its position
//! - **Positional access**: index-based reads and stable in-place sorting
//!
//! ## Examples
//!
//! ```rust
//! use kollect::{Key, OrderedMap, Value};
//!
//! let mut map = OrderedMap::new();
//! map.insert(Key::from("name"), Value::from("Alice"));
//! map.insert(Key::from("age"), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&Key::from("name")).and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::{Key, Value};
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// An ordered map of [`Key`]s to [`Value`]s.
///
/// This is a thin wrapper around [`IndexMap`] that keeps entries in
/// insertion order. Re-inserting an existing key overwrites the value and
/// keeps the key's original position (ordered-map semantics, not append
/// semantics).
///
/// # Examples
///
/// ```rust
/// use kollect::{Key, OrderedMap, Value};
///
/// let mut map = OrderedMap::new();
/// map.insert(Key::from("first"), Value::from(1));
/// map.insert(Key::from("second"), Value::from(2));
/// map.insert(Key::from("first"), Value::from(10));
///
/// // Upsert kept "first" at position 0
/// let keys: Vec<_> = map.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderedMap(IndexMap<Key, Value>);

/// Equality is order-sensitive: two maps holding the same pairs in a
/// different order are not equal, since entry order is part of the
/// observable state.
impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl OrderedMap {
    /// Creates an empty `OrderedMap`.
    #[must_use]
    pub fn new() -> Self {
        OrderedMap(IndexMap::new())
    }

    /// Creates an empty `OrderedMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned
    /// and the key keeps its original position.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Inserts a key-value pair at the given position, shifting later
    /// entries. An existing equivalent key is moved to that position and
    /// its old value returned.
    pub fn insert_at(&mut self, index: usize, key: Key, value: Value) -> Option<Value> {
        self.0.shift_insert(index, key, value)
    }

    /// Removes a key from the map, preserving the order of the remaining
    /// entries, and returns its value if it was present.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Removes the entry at the given position, preserving the order of
    /// the remaining entries.
    pub fn remove_at(&mut self, index: usize) -> Option<(Key, Value)> {
        self.0.shift_remove_index(index)
    }

    /// Removes and returns the last entry.
    pub fn pop(&mut self) -> Option<(Key, Value)> {
        self.0.pop()
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns the entry at the given position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
        self.0.get_index(index)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.0.contains_key(key)
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

    /// Removes all entries, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Reverses the order of entries in place.
    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    /// Sorts entries in place with the provided comparator. The sort is
    /// stable: entries that compare equal keep their relative order.
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&Key, &Value, &Key, &Value) -> Ordering,
    {
        self.0.sort_by(cmp);
    }

    /// Returns an iterator over the keys of the map, in order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.0.values()
    }

    /// Returns a mutable iterator over the values of the map, in order.
    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, Key, Value> {
        self.0.values_mut()
    }

    /// Returns an iterator over the key-value pairs of the map, in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.0.iter()
    }
}

impl IntoIterator for OrderedMap {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Key, Value)> for OrderedMap {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        OrderedMap(IndexMap::from_iter(iter))
    }
}

impl Extend<(Key, Value)> for OrderedMap {
    fn extend<T: IntoIterator<Item = (Key, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl Serialize for OrderedMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(&k.to_string(), v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderedMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor;

        impl<'de> Visitor<'de> for OrderedMapVisitor {
            type Value = OrderedMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an ordered map")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<Key, Value>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderedMap {
        let mut map = OrderedMap::new();
        map.insert(Key::from("a"), Value::from(1));
        map.insert(Key::from("b"), Value::from(2));
        map.insert(Key::from("c"), Value::from(3));
        map
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut map = sample();
        map.insert(Key::from("a"), Value::from(10));
        assert_eq!(map.get_index(0), Some((&Key::from("a"), &Value::from(10))));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map = sample();
        assert_eq!(map.remove(&Key::from("b")), Some(Value::from(2)));
        let keys: Vec<_> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_insert_at_front() {
        let mut map = sample();
        map.insert_at(0, Key::from("z"), Value::from(0));
        assert_eq!(map.get_index(0), Some((&Key::from("z"), &Value::from(0))));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_eq_is_order_sensitive() {
        let mut a = OrderedMap::new();
        a.insert(Key::from("x"), Value::from(1));
        a.insert(Key::from("y"), Value::from(2));

        let mut b = OrderedMap::new();
        b.insert(Key::from("y"), Value::from(2));
        b.insert(Key::from("x"), Value::from(1));

        assert_ne!(a, b);
        a.reverse();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sort_by_is_stable() {
        let mut map = OrderedMap::new();
        map.insert(Key::from("x"), Value::from(1));
        map.insert(Key::from("y"), Value::from(1));
        map.insert(Key::from("w"), Value::from(0));
        map.sort_by(|_, a, _, b| a.cmp_natural(b));
        let keys: Vec<_> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["w", "x", "y"]);
    }
}
