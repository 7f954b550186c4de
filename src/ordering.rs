//! Ordering, partitioning, and random sampling.
//!
//! Sorts are stable and associative: key associations travel with their
//! values. `shuffle` and `random` are the exceptions; a randomized
//! permutation has no natural key association, so their results are
//! re-keyed sequentially.

use crate::{Collection, Error, Key, Result, Value};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

/// Resolves an offset/length window against `len` elements: a negative
/// offset counts back from the end, a negative length stops that many
/// elements short of the end.
fn window(len: usize, offset: i64, length: Option<i64>) -> (usize, usize) {
    let len = len as i64;
    let start = if offset < 0 {
        (len + offset).max(0)
    } else {
        offset.min(len)
    };
    let end = match length {
        None => len,
        Some(l) if l >= 0 => (start + l).min(len),
        Some(l) => (len + l).max(start),
    };
    (start as usize, end.max(start) as usize)
}

impl Collection {
    /// Returns a copy sorted by value with the natural ordering
    /// ([`Value::cmp_natural`]). The sort is stable and preserves key
    /// associations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{kollect, Collection};
    ///
    /// let c = Collection::make(kollect!({"b": 3, "a": 1, "c": 2}));
    /// let keys: Vec<String> = c.sort().iter().map(|(k, _)| k.to_string()).collect();
    /// assert_eq!(keys, vec!["a", "c", "b"]);
    /// ```
    #[must_use]
    pub fn sort(&self) -> Collection {
        self.sort_by(Value::cmp_natural)
    }

    /// Returns a copy sorted by value with a custom comparator, stable,
    /// preserving key associations.
    #[must_use]
    pub fn sort_by<F>(&self, mut cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut items = self.all().clone();
        items.sort_by(|_, a, _, b| cmp(a, b));
        items.into()
    }

    /// Returns a copy sorted by value in descending natural order.
    #[must_use]
    pub fn sort_desc(&self) -> Collection {
        self.sort_by(|a, b| b.cmp_natural(a))
    }

    /// Returns a copy sorted by key (integer keys first, then string
    /// keys), preserving value associations.
    #[must_use]
    pub fn sort_keys(&self) -> Collection {
        self.sort_keys_by(Key::cmp)
    }

    /// Returns a copy sorted by key in descending order.
    #[must_use]
    pub fn sort_keys_desc(&self) -> Collection {
        self.sort_keys_by(|a, b| b.cmp(a))
    }

    /// Returns a copy sorted by key with a custom comparator.
    #[must_use]
    pub fn sort_keys_by<F>(&self, mut cmp: F) -> Collection
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let mut items = self.all().clone();
        items.sort_by(|ka, _, kb, _| cmp(ka, kb));
        items.into()
    }

    /// Returns a copy with the iteration order reversed, preserving key
    /// associations.
    #[must_use]
    pub fn reverse(&self) -> Collection {
        let mut items = self.all().clone();
        items.reverse();
        items.into()
    }

    /// Returns a randomized permutation of the values, re-keyed
    /// sequentially. Key associations do not travel: a randomized key
    /// association has no meaning, so the result is a re-keyed value
    /// permutation.
    #[must_use]
    pub fn shuffle(&self) -> Collection {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// Like [`shuffle`](Self::shuffle), but deterministic: the same seed
    /// always produces the same permutation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::Collection;
    ///
    /// let c = Collection::range(1, 50);
    /// assert_eq!(c.shuffle_seeded(7).values_vec(), c.shuffle_seeded(7).values_vec());
    /// ```
    #[must_use]
    pub fn shuffle_seeded(&self, seed: u64) -> Collection {
        self.shuffle_with(&mut StdRng::seed_from_u64(seed))
    }

    fn shuffle_with<R: Rng>(&self, rng: &mut R) -> Collection {
        let mut values = self.values_vec();
        values.shuffle(rng);
        values.into_iter().collect()
    }

    /// From the slice starting at `offset`, keeps every `step`-th value
    /// (0-indexed within the slice), re-keyed sequentially. A step of
    /// zero yields an empty collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let c = Collection::range(1, 5);
    /// assert_eq!(
    ///     c.nth(2, 0).values_vec(),
    ///     vec![Value::from(1), Value::from(3), Value::from(5)]
    /// );
    /// ```
    #[must_use]
    pub fn nth(&self, step: usize, offset: usize) -> Collection {
        if step == 0 {
            return Collection::new();
        }
        self.all()
            .values()
            .skip(offset)
            .step_by(step)
            .cloned()
            .collect()
    }

    /// Returns the offset/length window, preserving original keys. A
    /// negative offset counts from the end; a negative length stops that
    /// many elements short of the end.
    #[must_use]
    pub fn slice(&self, offset: i64, length: Option<i64>) -> Collection {
        let (start, end) = window(self.count(), offset, length);
        self.iter()
            .skip(start)
            .take(end - start)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Skips the first `n` entries; equivalent to `slice(n, None)`.
    #[must_use]
    pub fn skip(&self, n: usize) -> Collection {
        self.slice(n as i64, None)
    }

    /// Takes the first `limit` entries when `limit >= 0`, or the last
    /// `|limit|` entries when negative.
    #[must_use]
    pub fn take(&self, limit: i64) -> Collection {
        if limit >= 0 {
            self.slice(0, Some(limit))
        } else {
            self.slice(limit, None)
        }
    }

    /// Removes the offset/length window in place and returns the removed
    /// values as a new collection; the coerced replacement's values are
    /// inserted where the window was. Omitting `length` removes through
    /// the end.
    ///
    /// Integer keys are renumbered sequentially afterward (both in the
    /// remainder and in the returned window); string keys are preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let mut c = Collection::make(vec![1, 2, 3, 4]);
    /// let removed = c.splice(1, Some(2), Value::Null);
    /// assert_eq!(removed.values_vec(), vec![Value::from(2), Value::from(3)]);
    /// assert_eq!(c.values_vec(), vec![Value::from(1), Value::from(4)]);
    /// ```
    pub fn splice(
        &mut self,
        offset: i64,
        length: Option<i64>,
        replacement: impl Into<Value>,
    ) -> Collection {
        let total = self.count();
        let (start, end) = window(total, offset, length);
        let entries: Vec<(Key, Value)> = std::mem::take(self).into_iter().collect();
        let replacement_values: Vec<Value> = Collection::make(replacement)
            .into_iter()
            .map(|(_, v)| v)
            .collect();

        let mut next_int: i64 = 0;
        let mut rekey = |key: Key, value: Value, out: &mut Vec<(Key, Value)>| match key {
            Key::Int(_) => {
                out.push((Key::Int(next_int), value));
                next_int += 1;
            }
            Key::Str(_) => out.push((key, value)),
        };

        let mut kept = Vec::with_capacity(total - (end - start) + replacement_values.len());
        let mut removed = Vec::with_capacity(end - start);
        for (index, (key, value)) in entries.into_iter().enumerate() {
            if index == start {
                for value in replacement_values.iter().cloned() {
                    rekey(Key::Int(0), value, &mut kept);
                }
            }
            if index >= start && index < end {
                removed.push(value);
            } else {
                rekey(key, value, &mut kept);
            }
        }
        if start >= total {
            for value in replacement_values.iter().cloned() {
                rekey(Key::Int(0), value, &mut kept);
            }
        }

        *self = kept.into_iter().collect();
        removed.into_iter().collect()
    }

    /// Splits into consecutive chunks of at most `size` entries each,
    /// preserving original keys inside each chunk. The outer collection
    /// is keyed sequentially. A size of zero yields an empty collection.
    #[must_use]
    pub fn chunk(&self, size: usize) -> Collection {
        if size == 0 {
            return Collection::new();
        }
        let entries: Vec<(&Key, &Value)> = self.iter().collect();
        entries
            .chunks(size)
            .map(|chunk| {
                Value::Map(
                    chunk
                        .iter()
                        .map(|(k, v)| ((*k).clone(), (*v).clone()))
                        .collect(),
                )
            })
            .collect()
    }

    /// Splits into `groups` sub-collections with balanced sizes: the
    /// remainder is distributed one extra entry to each of the first
    /// `count % groups` groups. Size-zero groups are omitted from the
    /// result rather than emitted as empty placeholders.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::Collection;
    ///
    /// let c = Collection::range(1, 7);
    /// let groups = c.split(3);
    /// let sizes: Vec<usize> = groups
    ///     .iter()
    ///     .map(|(_, g)| g.as_map().unwrap().len())
    ///     .collect();
    /// assert_eq!(sizes, vec![3, 2, 2]);
    /// ```
    #[must_use]
    pub fn split(&self, groups: usize) -> Collection {
        if groups == 0 {
            return Collection::new();
        }
        let base = self.count() / groups;
        let remainder = self.count() % groups;
        let mut out = Vec::new();
        let mut cursor = 0usize;
        for group in 0..groups {
            let size = base + usize::from(group < remainder);
            if size == 0 {
                continue;
            }
            let chunk: crate::OrderedMap = self
                .iter()
                .skip(cursor)
                .take(size)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            out.push(Value::Map(chunk));
            cursor += size;
        }
        out.into_iter().collect()
    }

    /// Splits into `groups` chunks of `ceil(count / groups)` entries,
    /// front-loading full-size groups and leaving a possibly smaller
    /// final group. Distinct sizing policy from [`split`](Self::split).
    #[must_use]
    pub fn split_in(&self, groups: usize) -> Collection {
        if groups == 0 {
            return Collection::new();
        }
        self.chunk((self.count() + groups - 1) / groups)
    }

    /// Returns one random value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] on an empty collection; unlike
    /// `pop`/`shift` there is nothing sensible to clamp to.
    pub fn random(&self) -> Result<Value> {
        if self.is_empty() {
            return Err(Error::invalid_argument(
                "cannot pick a random value from an empty collection",
            ));
        }
        let index = rand::thread_rng().gen_range(0..self.count());
        Ok(self.all().get_index(index).map(|(_, v)| v.clone()).unwrap_or(Value::Null))
    }

    /// Returns `n` distinct random values (sampling without replacement)
    /// as a new collection with fresh keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `n` exceeds the element
    /// count: sampling without replacement cannot under-deliver silently.
    pub fn random_n(&self, n: usize) -> Result<Collection> {
        if n > self.count() {
            return Err(Error::invalid_argument(format!(
                "requested {} random values from a collection of {}",
                n,
                self.count()
            )));
        }
        let picks = rand::seq::index::sample(&mut rand::thread_rng(), self.count(), n);
        Ok(picks
            .iter()
            .filter_map(|i| self.all().get_index(i).map(|(_, v)| v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kollect;

    #[test]
    fn test_sort_is_stable_and_associative() {
        let c = Collection::make(kollect!({"x": 2, "y": 1, "z": 2}));
        let sorted = c.sort();
        let keys: Vec<String> = sorted.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["y", "x", "z"]);
        assert_eq!(sorted.get("x"), Some(&Value::from(2)));
    }

    #[test]
    fn test_sort_desc() {
        let c = Collection::make(vec![1, 3, 2]);
        assert_eq!(
            c.sort_desc().values_vec(),
            vec![Value::from(3), Value::from(2), Value::from(1)]
        );
    }

    #[test]
    fn test_sort_keys_ints_before_strings() {
        let c = Collection::make(kollect!({"b": 1, "2": 2, "a": 3, "1": 4}));
        let keys: Vec<String> = c.sort_keys().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["1", "2", "a", "b"]);
    }

    #[test]
    fn test_reverse_preserves_keys() {
        let c = Collection::make(kollect!({"a": 1, "b": 2}));
        let reversed = c.reverse();
        let keys: Vec<String> = reversed.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(reversed.get("a"), Some(&Value::from(1)));
    }

    #[test]
    fn test_shuffle_seeded_is_deterministic_and_rekeys() {
        let c = Collection::make(kollect!({"a": 1, "b": 2, "c": 3}));
        let first = c.shuffle_seeded(42);
        let second = c.shuffle_seeded(42);
        assert_eq!(first.values_vec(), second.values_vec());
        assert!(first.iter().all(|(k, _)| k.is_int()));
        let mut sorted = first.values_vec();
        sorted.sort_by(Value::cmp_natural);
        assert_eq!(sorted, vec![Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[test]
    fn test_nth_with_offset() {
        let c = Collection::range(1, 6);
        assert_eq!(
            c.nth(2, 1).values_vec(),
            vec![Value::from(2), Value::from(4), Value::from(6)]
        );
        assert!(c.nth(0, 0).is_empty());
    }

    #[test]
    fn test_slice_negative_offset_preserves_keys() {
        let c = Collection::range(0, 4);
        let tail = c.slice(-2, None);
        assert_eq!(tail.get(3), Some(&Value::from(3)));
        assert_eq!(tail.get(4), Some(&Value::from(4)));
        assert_eq!(tail.count(), 2);
    }

    #[test]
    fn test_slice_negative_length() {
        let c = Collection::range(0, 4);
        let middle = c.slice(1, Some(-1));
        assert_eq!(
            middle.values_vec(),
            vec![Value::from(1), Value::from(2), Value::from(3)]
        );
    }

    #[test]
    fn test_take_negative_takes_from_end() {
        let c = Collection::range(1, 5);
        assert_eq!(
            c.take(-2).values_vec(),
            vec![Value::from(4), Value::from(5)]
        );
        assert_eq!(c.take(2).values_vec(), vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_splice_with_replacement() {
        let mut c = Collection::make(vec!["a", "b", "c"]);
        let removed = c.splice(1, Some(1), Value::from(vec!["X", "Y"]));
        assert_eq!(removed.values_vec(), vec![Value::from("b")]);
        assert_eq!(
            c.values_vec(),
            vec![
                Value::from("a"),
                Value::from("X"),
                Value::from("Y"),
                Value::from("c")
            ]
        );
        let keys: Vec<Key> = c.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![Key::Int(0), Key::Int(1), Key::Int(2), Key::Int(3)]);
    }

    #[test]
    fn test_splice_offset_only_removes_through_end() {
        let mut c = Collection::range(1, 4);
        let removed = c.splice(2, None, Value::Null);
        assert_eq!(removed.values_vec(), vec![Value::from(3), Value::from(4)]);
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn test_splice_inserts_at_end_when_offset_past_len() {
        let mut c = Collection::make(vec![1, 2]);
        let removed = c.splice(5, None, Value::from(vec![3]));
        assert!(removed.is_empty());
        assert_eq!(
            c.values_vec(),
            vec![Value::from(1), Value::from(2), Value::from(3)]
        );
    }

    #[test]
    fn test_chunk_preserves_keys_within_chunks() {
        let c = Collection::make(kollect!({"a": 1, "b": 2, "c": 3}));
        let chunks = c.chunk(2);
        assert_eq!(chunks.count(), 2);
        let first = chunks.get(0).and_then(Value::as_map).unwrap().clone();
        assert_eq!(first.get(&Key::from("a")), Some(&Value::from(1)));
        assert_eq!(first.get(&Key::from("b")), Some(&Value::from(2)));
        assert!(c.chunk(0).is_empty());
    }

    #[test]
    fn test_split_omits_empty_groups() {
        let c = Collection::range(1, 2);
        let groups = c.split(4);
        assert_eq!(groups.count(), 2);
    }

    #[test]
    fn test_split_in_front_loads() {
        let c = Collection::range(1, 7);
        let groups = c.split_in(3);
        let sizes: Vec<usize> = groups
            .iter()
            .map(|(_, g)| g.as_map().unwrap().len())
            .collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn test_random_boundaries() {
        let empty = Collection::new();
        assert!(matches!(empty.random(), Err(Error::InvalidArgument(_))));

        let c = Collection::make(vec![1, 2, 3]);
        assert!(matches!(c.random_n(4), Err(Error::InvalidArgument(_))));
        let picked = c.random_n(3).unwrap();
        let mut values = picked.values_vec();
        values.sort_by(Value::cmp_natural);
        assert_eq!(values, vec![Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[test]
    fn test_random_single_value_comes_from_collection() {
        let c = Collection::make(vec![5]);
        assert_eq!(c.random().unwrap(), Value::from(5));
    }
}
