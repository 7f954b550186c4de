//! The ordered collection container.
//!
//! [`Collection`] wraps an [`OrderedMap`] and exposes the operation
//! algebra: construction and coercion from arbitrary sources, keyed and
//! key-path access, in-place mutators, and the inspection surface. The
//! set-algebra, ordering/partitioning, and functional-transformation
//! operations live in sibling modules as further `impl` blocks on the same
//! type.
//!
//! Two API families, one type:
//!
//! - **Value-style operations** take `&self` and return a new
//!   `Collection`; the receiver is never touched.
//! - **Mutators** (`push`, `pop`, `put`, `forget`, `shift`, `clear`,
//!   `prepend`, `transform`, `splice`) take `&mut self` and, where they
//!   return the collection, return `&mut Self` for chaining.
//!
//! ## Examples
//!
//! ```rust
//! use kollect::{kollect, Collection, Value};
//!
//! let users = Collection::make(kollect!({
//!     "alice": {"age": 30},
//!     "bob": {"age": 25}
//! }));
//!
//! assert_eq!(users.count(), 2);
//! assert_eq!(users.get("alice.age"), Some(&Value::from(30)));
//! ```

use crate::{path, strutil, Key, OrderedMap, Result, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered key-value container with value-style operation semantics.
///
/// Keys are unique; iteration order is insertion order. Assigning an
/// existing key overwrites the value and keeps the key's original
/// position. Sources without keys of their own (arrays, ranges, split
/// strings) receive sequential integer keys starting at `0`.
///
/// Not thread-safe: callers sharing one instance across threads must
/// synchronize externally, and mutating a collection while iterating over
/// it is the caller's responsibility to avoid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    items: OrderedMap,
}

/// Normalizes an arbitrary source value into the backing store. Total:
/// every variant has a conversion, nothing fails.
fn coerce(source: Value) -> OrderedMap {
    match source {
        Value::Map(map) => map,
        Value::Array(arr) => arr
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::Int(i as i64), v))
            .collect(),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(decoded) => std::iter::once((Key::Int(0), decoded)).collect(),
            Err(_) => strutil::to_list(&s)
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::Int(i as i64), v))
                .collect(),
        },
        scalar @ (Value::Bool(_) | Value::Number(_)) => {
            std::iter::once((Key::Int(0), scalar)).collect()
        }
        Value::Null => OrderedMap::new(),
    }
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Collection {
            items: OrderedMap::new(),
        }
    }

    /// Creates a collection from any coercible source.
    ///
    /// Coercion is total and never fails. Dispatch over the source shape:
    ///
    /// 1. an ordered map is used as the backing store directly;
    /// 2. an array maps to sequential integer keys `0..n-1`;
    /// 3. a string is JSON-decoded (success wraps the decoded document as
    ///    a single entry; failure splits the text into components);
    /// 4. a bool or number wraps as a single entry at key `0`;
    /// 5. null yields an empty collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let from_array = Collection::make(vec![10, 20]);
    /// assert_eq!(from_array.get(0), Some(&Value::from(10)));
    ///
    /// let from_text = Collection::make("a, b");
    /// assert_eq!(from_text.count(), 2);
    ///
    /// assert!(Collection::make(Value::Null).is_empty());
    /// ```
    #[must_use]
    pub fn make(source: impl Into<Value>) -> Self {
        Collection {
            items: coerce(source.into()),
        }
    }

    /// Creates a collection of the integers `from..=to`, descending when
    /// `from > to`, with sequential keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let up = Collection::range(1, 3);
    /// assert_eq!(up.values_vec(), vec![Value::from(1), Value::from(2), Value::from(3)]);
    ///
    /// let down = Collection::range(2, 0);
    /// assert_eq!(down.values_vec(), vec![Value::from(2), Value::from(1), Value::from(0)]);
    /// ```
    #[must_use]
    pub fn range(from: i64, to: i64) -> Self {
        let values: Vec<Value> = if from <= to {
            (from..=to).map(Value::from).collect()
        } else {
            (to..=from).rev().map(Value::from).collect()
        };
        values.into_iter().collect()
    }

    /// The next fresh integer key for appends: one past the largest
    /// existing integer key, never below zero.
    pub(crate) fn next_int_key(&self) -> i64 {
        self.items
            .keys()
            .filter_map(Key::as_int)
            .max()
            .map_or(0, |max| max.saturating_add(1).max(0))
    }

    // --- Inspection ---------------------------------------------------

    /// Returns the number of entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Alias for [`count`](Self::count), matching container convention.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the collection holds exactly one entry.
    #[must_use]
    pub fn contains_one_item(&self) -> bool {
        self.items.len() == 1
    }

    /// Borrows the backing ordered map.
    #[must_use]
    pub fn all(&self) -> &OrderedMap {
        &self.items
    }

    /// Consumes the collection and returns the backing ordered map.
    #[must_use]
    pub fn into_map(self) -> OrderedMap {
        self.items
    }

    /// Returns a new collection of this collection's values, re-keyed
    /// sequentially from zero.
    #[must_use]
    pub fn values(&self) -> Collection {
        self.items.values().cloned().collect()
    }

    /// Returns this collection's values as a plain vector.
    #[must_use]
    pub fn values_vec(&self) -> Vec<Value> {
        self.items.values().cloned().collect()
    }

    /// Returns a new collection of this collection's keys as values,
    /// re-keyed sequentially from zero.
    #[must_use]
    pub fn keys(&self) -> Collection {
        self.items
            .keys()
            .map(|k| match k {
                Key::Int(i) => Value::from(*i),
                Key::Str(s) => Value::from(s.as_str()),
            })
            .collect()
    }

    /// Returns an iterator over the entries, in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.items.iter()
    }

    /// Serializes the collection to a JSON string. Integer keys render as
    /// their decimal text, since JSON object keys are strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    // --- Access -------------------------------------------------------

    /// Returns a reference to the value at the key, or `None`.
    ///
    /// String keys containing `.` that are not present literally are
    /// resolved as key paths into nested values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{kollect, Collection, Value};
    ///
    /// let c = Collection::make(kollect!({"a": {"b": 1}}));
    /// assert_eq!(c.get("a.b"), Some(&Value::from(1)));
    /// assert_eq!(c.get("missing"), None);
    /// ```
    #[must_use]
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&Value> {
        let key = key.into();
        if let Some(value) = self.items.get(&key) {
            return Some(value);
        }
        match &key {
            Key::Str(s) if s.contains('.') => path::get(&self.items, s),
            _ => None,
        }
    }

    /// Returns the value at the key (cloned), or the supplied default.
    #[must_use]
    pub fn get_or<K: Into<Key>>(&self, key: K, default: impl Into<Value>) -> Value {
        self.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Removes and returns the value at the key, or `None`. Honors key
    /// paths like [`get`](Self::get).
    pub fn pull<K: Into<Key>>(&mut self, key: K) -> Option<Value> {
        let key = key.into();
        if let Some(value) = self.items.remove(&key) {
            return Some(value);
        }
        match &key {
            Key::Str(s) if s.contains('.') => path::pull(&mut self.items, s),
            _ => None,
        }
    }

    /// Removes and returns the value at the key, or the supplied default.
    pub fn pull_or<K: Into<Key>>(&mut self, key: K, default: impl Into<Value>) -> Value {
        self.pull(key).unwrap_or_else(|| default.into())
    }

    /// Returns the value at the key if present; otherwise inserts the
    /// supplied value there and returns it. Honors key paths.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let mut c = Collection::new();
    /// assert_eq!(c.get_or_put("a", 1), Value::from(1));
    /// assert_eq!(c.get_or_put("a", 99), Value::from(1));
    /// ```
    pub fn get_or_put<K: Into<Key>>(&mut self, key: K, value: impl Into<Value>) -> Value {
        let key = key.into();
        if let Some(existing) = self.get(key.clone()) {
            return existing.clone();
        }
        let value = value.into();
        match &key {
            Key::Str(s) if s.contains('.') => path::set(&mut self.items, s, value.clone()),
            _ => {
                self.items.insert(key, value.clone());
            }
        }
        value
    }

    /// Returns `true` if the key exists. Honors key paths.
    #[must_use]
    pub fn has<K: Into<Key>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` only if every given key exists.
    #[must_use]
    pub fn has_all<K, I>(&self, keys: I) -> bool
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().all(|key| self.has(key))
    }

    /// Returns `true` if any given key exists. An empty collection
    /// short-circuits to `false` without evaluating the keys.
    #[must_use]
    pub fn has_any<K, I>(&self, keys: I) -> bool
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        if self.is_empty() {
            return false;
        }
        keys.into_iter().any(|key| self.has(key))
    }

    // --- Mutation -----------------------------------------------------

    /// Upserts a value at the key. An existing key keeps its position; a
    /// new key is appended.
    pub fn put<K: Into<Key>>(&mut self, key: K, value: impl Into<Value>) -> &mut Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Removes the given keys. Missing keys are a no-op, not an error.
    /// Dotted string keys remove nested entries.
    pub fn forget<K, I>(&mut self, keys: I) -> &mut Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            let key = key.into();
            if self.items.remove(&key).is_none() {
                if let Key::Str(s) = &key {
                    if s.contains('.') {
                        path::pull(&mut self.items, s);
                    }
                }
            }
        }
        self
    }

    /// Appends a value at the end with a fresh sequential integer key.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let key = Key::Int(self.next_int_key());
        self.items.insert(key, value.into());
        self
    }

    /// Appends each value in order, each with a fresh sequential key.
    pub fn push_all<V, I>(&mut self, values: I) -> &mut Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.push(value);
        }
        self
    }

    /// Inserts a value at position 0, shifting existing entries.
    ///
    /// With an explicit key the entry is placed at the front under that
    /// key. Without one, the value takes integer key `0` and existing
    /// integer keys are renumbered sequentially; string keys are
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let mut c = Collection::make(vec![2, 3]);
    /// c.prepend(1, None);
    /// assert_eq!(c.values_vec(), vec![Value::from(1), Value::from(2), Value::from(3)]);
    /// assert_eq!(c.get(0), Some(&Value::from(1)));
    /// ```
    pub fn prepend(&mut self, value: impl Into<Value>, key: Option<Key>) -> &mut Self {
        match key {
            Some(key) => {
                self.items.insert_at(0, key, value.into());
            }
            None => {
                let old = std::mem::take(&mut self.items);
                let mut next: i64 = 0;
                self.items.insert(Key::Int(next), value.into());
                next += 1;
                for (k, v) in old {
                    match k {
                        Key::Int(_) => {
                            self.items.insert(Key::Int(next), v);
                            next += 1;
                        }
                        Key::Str(_) => {
                            self.items.insert(k, v);
                        }
                    }
                }
            }
        }
        self
    }

    /// Removes and returns the last value, or `None` when empty.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop().map(|(_, value)| value)
    }

    /// Removes up to `n` values from the end and returns them as a new
    /// collection in removal order (last element first). Clamped to the
    /// available count; an empty source yields an empty collection.
    pub fn pop_n(&mut self, n: usize) -> Collection {
        let mut removed = Vec::new();
        for _ in 0..n {
            match self.items.pop() {
                Some((_, value)) => removed.push(value),
                None => break,
            }
        }
        removed.into_iter().collect()
    }

    /// Removes and returns the first value, or `None` when empty.
    pub fn shift(&mut self) -> Option<Value> {
        self.items.remove_at(0).map(|(_, value)| value)
    }

    /// Removes up to `n` values from the front and returns them as a new
    /// collection in removal order. Clamped like [`pop_n`](Self::pop_n).
    pub fn shift_n(&mut self, n: usize) -> Collection {
        let mut removed = Vec::new();
        for _ in 0..n {
            match self.items.remove_at(0) {
                Some((_, value)) => removed.push(value),
                None => break,
            }
        }
        removed.into_iter().collect()
    }

    /// Returns a copy of this collection with every element of the source
    /// appended under fresh sequential keys. The appended portion is
    /// always re-keyed, so collisions with existing keys cannot occur.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{kollect, Collection, Value};
    ///
    /// let c = Collection::make(kollect!({"a": 1}));
    /// let joined = c.concat(vec![2, 3]);
    /// assert_eq!(joined.values_vec(), vec![Value::from(1), Value::from(2), Value::from(3)]);
    /// ```
    #[must_use]
    pub fn concat(&self, source: impl Into<Value>) -> Collection {
        let mut result = self.clone();
        for value in coerce(source.into()).into_iter().map(|(_, v)| v) {
            result.push(value);
        }
        result
    }

    /// Empties the backing store in place. The instance stays usable.
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        Collection::make(value)
    }
}

impl From<OrderedMap> for Collection {
    fn from(map: OrderedMap) -> Self {
        Collection { items: map }
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Value::Map(collection.items)
    }
}

impl From<&Collection> for Value {
    fn from(collection: &Collection) -> Self {
        Value::Map(collection.items.clone())
    }
}

impl FromIterator<Value> for Collection {
    /// Collects values under sequential integer keys starting at zero.
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Collection {
            items: iter
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::Int(i as i64), v))
                .collect(),
        }
    }
}

impl FromIterator<(Key, Value)> for Collection {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Collection {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Collection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Collection::make(Value::deserialize(deserializer)?))
    }
}
