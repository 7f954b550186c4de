//! Set-algebra operations on collections.
//!
//! Every operation here coerces its argument the same way
//! [`Collection::make`] does, returns a new collection, and preserves
//! *this* collection's keys for the surviving entries. The non-`keys`/
//! `assoc` variants compare values, not keys.

use crate::{Collection, Error, Key, OrderedMap, Result, Value};
use std::cmp::Ordering;

/// Right-biased merge of `other` into `base`: string keys upsert in
/// place, integer keys append under fresh sequential keys. When
/// `recursive` is set and both sides hold a map at the same key, the maps
/// merge instead of the right side overwriting.
fn merge_maps(base: &OrderedMap, other: OrderedMap, recursive: bool) -> OrderedMap {
    let mut result = base.clone();
    let mut next_int = next_int_key(&result);
    for (key, value) in other {
        match key {
            Key::Int(_) => {
                result.insert(Key::Int(next_int), value);
                next_int += 1;
            }
            Key::Str(_) => {
                let merged = match (recursive, result.get(&key), value) {
                    (true, Some(Value::Map(left)), Value::Map(right)) => {
                        Value::Map(merge_maps(left, right, true))
                    }
                    (_, _, value) => value,
                };
                result.insert(key, merged);
            }
        }
    }
    result
}

/// Key-for-key replacement of `other` into `base`: every key upserts,
/// integer keys included; new keys append. Recursion matches
/// [`merge_maps`].
fn replace_maps(base: &OrderedMap, other: OrderedMap, recursive: bool) -> OrderedMap {
    let mut result = base.clone();
    for (key, value) in other {
        let replaced = match (recursive, result.get(&key), value) {
            (true, Some(Value::Map(left)), Value::Map(right)) => {
                Value::Map(replace_maps(left, right, true))
            }
            (_, _, value) => value,
        };
        result.insert(key, replaced);
    }
    result
}

fn next_int_key(map: &OrderedMap) -> i64 {
    map.keys()
        .filter_map(Key::as_int)
        .max()
        .map_or(0, |max| max.saturating_add(1).max(0))
}

impl Collection {
    /// Returns the entries whose value does not appear anywhere in the
    /// given items.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let c = Collection::make(vec![1, 2, 3]);
    /// let d = c.diff(vec![2, 4]);
    /// assert_eq!(d.values_vec(), vec![Value::from(1), Value::from(3)]);
    /// ```
    #[must_use]
    pub fn diff(&self, items: impl Into<Value>) -> Collection {
        let other = Collection::make(items);
        self.iter()
            .filter(|(_, v)| !other.iter().any(|(_, ov)| ov == *v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Like [`diff`](Self::diff), with equality decided by the
    /// comparator: values compare equal when `cmp` returns
    /// [`Ordering::Equal`].
    #[must_use]
    pub fn diff_using<F>(&self, items: impl Into<Value>, mut cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let other = Collection::make(items);
        self.iter()
            .filter(|&(_, v)| !other.iter().any(|(_, ov)| cmp(v, ov) == Ordering::Equal))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the entries whose key-and-value pair does not match an
    /// entry in the given items.
    #[must_use]
    pub fn diff_assoc(&self, items: impl Into<Value>) -> Collection {
        let other = Collection::make(items);
        self.iter()
            .filter(|&(k, v)| other.all().get(k) != Some(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the entries whose key is absent from the given items' keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{kollect, Collection, Value};
    ///
    /// let c = Collection::make(kollect!({"a": 1, "b": 2}));
    /// let d = c.diff_keys(kollect!({"a": 9}));
    /// assert_eq!(d.get("b"), Some(&Value::from(2)));
    /// assert_eq!(d.count(), 1);
    /// ```
    #[must_use]
    pub fn diff_keys(&self, items: impl Into<Value>) -> Collection {
        let other = Collection::make(items);
        self.iter()
            .filter(|&(k, _)| !other.all().contains_key(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Like [`diff_keys`](Self::diff_keys), with key equality decided by
    /// the comparator.
    #[must_use]
    pub fn diff_keys_using<F>(&self, items: impl Into<Value>, mut cmp: F) -> Collection
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let other = Collection::make(items);
        self.iter()
            .filter(|&(k, _)| !other.iter().any(|(ok, _)| cmp(k, ok) == Ordering::Equal))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the entries whose value equals some value in the given
    /// items.
    #[must_use]
    pub fn intersect(&self, items: impl Into<Value>) -> Collection {
        let other = Collection::make(items);
        self.iter()
            .filter(|(_, v)| other.iter().any(|(_, ov)| ov == *v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the entries whose key exists in the given items.
    #[must_use]
    pub fn intersect_by_keys(&self, items: impl Into<Value>) -> Collection {
        let other = Collection::make(items);
        self.iter()
            .filter(|&(k, _)| other.all().contains_key(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Right-biased key merge: string keys from the items overwrite this
    /// collection's values in place, and integer keys from the items are
    /// appended under fresh sequential keys rather than overwriting by
    /// position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{kollect, Collection, Value};
    ///
    /// let c = Collection::make(kollect!({"x": 1}));
    /// let merged = c.merge(kollect!({"x": 2, "y": 3}));
    /// assert_eq!(merged.get("x"), Some(&Value::from(2)));
    /// assert_eq!(merged.get("y"), Some(&Value::from(3)));
    /// ```
    #[must_use]
    pub fn merge(&self, items: impl Into<Value>) -> Collection {
        merge_maps(self.all(), Collection::make(items).into_map(), false).into()
    }

    /// Like [`merge`](Self::merge), but when both sides hold a nested map
    /// at the same key the maps merge recursively instead of the items'
    /// side overwriting.
    #[must_use]
    pub fn merge_recursive(&self, items: impl Into<Value>) -> Collection {
        merge_maps(self.all(), Collection::make(items).into_map(), true).into()
    }

    /// Key-for-key replacement: every key in the items (integer keys
    /// included) overwrites this collection's value at that key; keys new
    /// to this collection are appended.
    #[must_use]
    pub fn replace(&self, items: impl Into<Value>) -> Collection {
        replace_maps(self.all(), Collection::make(items).into_map(), false).into()
    }

    /// Like [`replace`](Self::replace), recursing when both sides hold a
    /// nested map at the same key.
    #[must_use]
    pub fn replace_recursive(&self, items: impl Into<Value>) -> Collection {
        replace_maps(self.all(), Collection::make(items).into_map(), true).into()
    }

    /// Left-biased union: keeps this collection's value when a key
    /// collides, adds keys only present in the items.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{kollect, Collection, Value};
    ///
    /// let c = Collection::make(kollect!({"a": 1}));
    /// let u = c.union(kollect!({"a": 9, "b": 2}));
    /// assert_eq!(u.get("a"), Some(&Value::from(1)));
    /// assert_eq!(u.get("b"), Some(&Value::from(2)));
    /// ```
    #[must_use]
    pub fn union(&self, items: impl Into<Value>) -> Collection {
        let mut result = self.clone();
        for (key, value) in Collection::make(items) {
            if !result.all().contains_key(&key) {
                result.put(key, value);
            }
        }
        result
    }

    /// Zips this collection's values, as keys, against the given values.
    ///
    /// Value-to-key conversion follows [`Key::from_value`]: strings stay
    /// strings, integral numbers become integer keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] when the two sides differ in
    /// length; there is no silent truncation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let keys = Collection::make(vec!["name", "age"]);
    /// let combined = keys.combine(Value::from(vec![
    ///     Value::from("Alice"),
    ///     Value::from(30),
    /// ])).unwrap();
    /// assert_eq!(combined.get("name"), Some(&Value::from("Alice")));
    /// assert_eq!(combined.get("age"), Some(&Value::from(30)));
    /// ```
    pub fn combine(&self, values: impl Into<Value>) -> Result<Collection> {
        let other = Collection::make(values);
        if self.count() != other.count() {
            return Err(Error::LengthMismatch {
                left: self.count(),
                right: other.count(),
            });
        }
        Ok(self
            .iter()
            .map(|(_, v)| Key::from_value(v))
            .zip(other.into_iter().map(|(_, v)| v))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kollect;

    #[test]
    fn test_diff_preserves_surviving_keys() {
        let c = Collection::make(kollect!({"a": 1, "b": 2, "c": 3}));
        let d = c.diff(vec![2]);
        let keys: Vec<String> = d.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_diff_using_custom_comparator() {
        // Case-insensitive comparison.
        let c = Collection::make(vec!["Apple", "Pear"]);
        let d = c.diff_using(vec!["apple"], |a, b| {
            let (a, b) = (a.to_string().to_lowercase(), b.to_string().to_lowercase());
            a.cmp(&b)
        });
        assert_eq!(d.values_vec(), vec![Value::from("Pear")]);
    }

    #[test]
    fn test_diff_assoc_matches_pairs() {
        let c = Collection::make(kollect!({"a": 1, "b": 2}));
        let d = c.diff_assoc(kollect!({"a": 1, "b": 99}));
        assert_eq!(d.count(), 1);
        assert_eq!(d.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn test_diff_keys_using() {
        let c = Collection::make(kollect!({"A": 1, "b": 2}));
        let d = c.diff_keys_using(kollect!({"a": 0}), |x, y| {
            x.to_string().to_lowercase().cmp(&y.to_string().to_lowercase())
        });
        assert_eq!(d.count(), 1);
        assert_eq!(d.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn test_intersect_variants() {
        let c = Collection::make(kollect!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(c.intersect(vec![1, 3]).count(), 2);
        assert_eq!(
            c.intersect_by_keys(kollect!({"b": 0, "z": 0})).get("b"),
            Some(&Value::from(2))
        );
    }

    #[test]
    fn test_merge_appends_integer_keys() {
        let c = Collection::make(vec!["a", "b"]);
        let merged = c.merge(vec!["c"]);
        assert_eq!(merged.count(), 3);
        assert_eq!(merged.get(2), Some(&Value::from("c")));
    }

    #[test]
    fn test_merge_recursive_descends_into_maps() {
        let c = Collection::make(kollect!({"cfg": {"a": 1, "b": 2}}));
        let merged = c.merge_recursive(kollect!({"cfg": {"b": 20, "c": 30}}));
        assert_eq!(merged.get("cfg.a"), Some(&Value::from(1)));
        assert_eq!(merged.get("cfg.b"), Some(&Value::from(20)));
        assert_eq!(merged.get("cfg.c"), Some(&Value::from(30)));
    }

    #[test]
    fn test_replace_overwrites_integer_keys() {
        let c = Collection::make(vec!["a", "b", "c"]);
        let replaced = c.replace(kollect!({"1": "B"}));
        assert_eq!(
            replaced.values_vec(),
            vec![Value::from("a"), Value::from("B"), Value::from("c")]
        );
    }

    #[test]
    fn test_replace_recursive() {
        let c = Collection::make(kollect!({"cfg": {"a": 1}, "flat": 0}));
        let replaced = c.replace_recursive(kollect!({"cfg": {"b": 2}, "flat": 9}));
        assert_eq!(replaced.get("cfg.a"), Some(&Value::from(1)));
        assert_eq!(replaced.get("cfg.b"), Some(&Value::from(2)));
        assert_eq!(replaced.get("flat"), Some(&Value::from(9)));
    }

    #[test]
    fn test_union_is_left_biased() {
        let c = Collection::make(kollect!({"a": 1}));
        let u = c.union(kollect!({"a": 2, "b": 3}));
        assert_eq!(u.get("a"), Some(&Value::from(1)));
        assert_eq!(u.count(), 2);
    }

    #[test]
    fn test_combine_length_mismatch_errors() {
        let keys = Collection::make(vec!["a", "b"]);
        let err = keys.combine(vec![1]).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_combine_integral_values_become_int_keys() {
        let keys = Collection::make(vec![10, 20]);
        let combined = keys.combine(vec!["x", "y"]).unwrap();
        assert_eq!(combined.get(10), Some(&Value::from("x")));
        assert_eq!(combined.get(20), Some(&Value::from("y")));
    }
}
