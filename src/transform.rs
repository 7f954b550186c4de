//! Functional transformations, projection, and joining.
//!
//! The mapping operations preserve this collection's keys unless they are
//! documented to re-key (`flatten`, `collapse`, `zip`, `pad` and the
//! dictionary-style groupers produce fresh or remapped keys). `transform`
//! is the single in-place variant; everything else returns a new
//! collection.

use crate::{path, Collection, Key, OrderedMap, Value};

impl Collection {
    /// Applies the function to every value, preserving keys and order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let c = Collection::make(vec![1, 2, 3]);
    /// let doubled = c.map(|_, v| Value::from(v.as_i64().unwrap_or(0) * 2));
    /// assert_eq!(doubled.values_vec(), vec![Value::from(2), Value::from(4), Value::from(6)]);
    /// ```
    #[must_use]
    pub fn map<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Key, &Value) -> Value,
    {
        self.iter().map(|(k, v)| (k.clone(), f(k, v))).collect()
    }

    /// Maps each entry to a new key-value pair. Later pairs overwrite
    /// earlier ones on key collision (last write wins); the output order
    /// follows the evaluation order of the source elements, so a
    /// collided key keeps the position of its first occurrence.
    #[must_use]
    pub fn map_with_keys<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Key, &Value) -> (Key, Value),
    {
        let mut out = OrderedMap::new();
        for (k, v) in self.iter() {
            let (key, value) = f(k, v);
            out.insert(key, value);
        }
        out.into()
    }

    /// Maps each entry to a key-value pair and groups values with the
    /// same resulting key into a list-valued bucket. Collisions append,
    /// never overwrite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Key, Value};
    ///
    /// let words = Collection::make(vec!["apple", "avocado", "beet"]);
    /// let by_initial = words.map_to_dictionary(|_, v| {
    ///     let initial = v.as_str().and_then(|s| s.get(..1)).unwrap_or("?");
    ///     (Key::from(initial), v.clone())
    /// });
    /// let a_bucket = by_initial.get("a").and_then(Value::as_array).unwrap();
    /// assert_eq!(a_bucket.len(), 2);
    /// ```
    #[must_use]
    pub fn map_to_dictionary<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Key, &Value) -> (Key, Value),
    {
        let mut out = OrderedMap::new();
        for (k, v) in self.iter() {
            let (key, value) = f(k, v);
            match out.get_mut(&key) {
                Some(Value::Array(bucket)) => bucket.push(value),
                _ => {
                    out.insert(key, Value::Array(vec![value]));
                }
            }
        }
        out.into()
    }

    /// Keeps the entries the predicate accepts, preserving keys and
    /// order.
    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.iter()
            .filter(|&(k, v)| predicate(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// The predicate-less filter: keeps the values that are truthy per
    /// [`Value::truthy`] (drops null, `false`, zero, empty strings, empty
    /// containers).
    #[must_use]
    pub fn compact(&self) -> Collection {
        self.filter(|_, v| v.truthy())
    }

    /// In-place variant of [`map`](Self::map): replaces this collection's
    /// contents with the mapped result.
    pub fn transform<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&Key, &Value) -> Value,
    {
        *self = self.map(f);
        self
    }

    /// Recursively flattens nested arrays and maps into a flat sequence
    /// of leaf values with sequential keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{kollect, Collection, Value};
    ///
    /// let c = Collection::make(kollect!([1, [2, 3], [4, [5]]]));
    /// assert_eq!(
    ///     c.flatten().values_vec(),
    ///     vec![Value::from(1), Value::from(2), Value::from(3), Value::from(4), Value::from(5)]
    /// );
    /// ```
    #[must_use]
    pub fn flatten(&self) -> Collection {
        self.flatten_depth(usize::MAX)
    }

    /// Flattens up to `depth` levels of nesting; deeper structure is kept
    /// intact as values.
    #[must_use]
    pub fn flatten_depth(&self, depth: usize) -> Collection {
        path::flatten(self.all(), depth).into_iter().collect()
    }

    /// Flattens exactly one level: concatenates the nested sequences
    /// (arrays and maps) among the values into a single re-keyed
    /// sequence. Values that are not sequences are skipped.
    #[must_use]
    pub fn collapse(&self) -> Collection {
        let mut out = Vec::new();
        for value in self.all().values() {
            match value {
                Value::Array(arr) => out.extend(arr.iter().cloned()),
                Value::Map(map) => out.extend(map.values().cloned()),
                _ => {}
            }
        }
        out.into_iter().collect()
    }

    /// Projects each element by extracting `value_path` (a dotted key
    /// path), optionally re-keying the result by `key_path`. Missing
    /// paths yield `Null`, never an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{kollect, Collection, Value};
    ///
    /// let users = Collection::make(kollect!([
    ///     {"id": 1, "name": "Alice"},
    ///     {"id": 2, "name": "Bob"}
    /// ]));
    /// let names = users.pluck("name", Some("id"));
    /// assert_eq!(names.get(2), Some(&Value::from("Bob")));
    /// ```
    #[must_use]
    pub fn pluck(&self, value_path: &str, key_path: Option<&str>) -> Collection {
        path::pluck(self.all().values(), value_path, key_path).into()
    }

    /// Pairs this collection's values positionally with each source's
    /// values into tuples. The result has this collection's length;
    /// positions a source does not reach are filled with `Null`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::{Collection, Value};
    ///
    /// let c = Collection::make(vec![1, 2]);
    /// let zipped = c.zip(vec![Value::from(vec!["a"])]);
    /// assert_eq!(
    ///     zipped.get(1),
    ///     Some(&Value::Array(vec![Value::from(2), Value::Null]))
    /// );
    /// ```
    #[must_use]
    pub fn zip<I, T>(&self, sources: I) -> Collection
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        let columns: Vec<Vec<Value>> = sources
            .into_iter()
            .map(|source| Collection::make(source).values_vec())
            .collect();
        self.all()
            .values()
            .enumerate()
            .map(|(i, value)| {
                let mut tuple = Vec::with_capacity(columns.len() + 1);
                tuple.push(value.clone());
                for column in &columns {
                    tuple.push(column.get(i).cloned().unwrap_or(Value::Null));
                }
                Value::Array(tuple)
            })
            .collect()
    }

    /// Pads the collection with `value` until it reaches `size` total
    /// elements, appending for positive `size` and prepending for
    /// negative. No-op when already at or beyond the target length.
    /// Existing entries keep their keys; the fill values take fresh
    /// sequential integer keys.
    #[must_use]
    pub fn pad(&self, size: i64, value: impl Into<Value>) -> Collection {
        let target = size.unsigned_abs() as usize;
        if target <= self.count() {
            return self.clone();
        }
        let fill = value.into();
        let next_int = self.next_int_key();
        let fills = (0..(target - self.count()))
            .map(|i| (Key::Int(next_int + i as i64), fill.clone()));
        let existing = self.iter().map(|(k, v)| (k.clone(), v.clone()));
        if size < 0 {
            fills.chain(existing).collect()
        } else {
            existing.chain(fills).collect()
        }
    }

    /// Joins the rendered values with the glue string.
    #[must_use]
    pub fn implode(&self, glue: &str) -> String {
        self.all()
            .values()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(glue)
    }

    /// Projects each element via the key path first, then joins the
    /// rendered results with the glue string. The keyed-structure form of
    /// [`implode`](Self::implode).
    #[must_use]
    pub fn implode_by(&self, value_path: &str, glue: &str) -> String {
        self.pluck(value_path, None).implode(glue)
    }

    /// Joins like [`implode`](Self::implode) but with a distinct
    /// separator before the last element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::Collection;
    ///
    /// let c = Collection::make(vec![1, 2, 3]);
    /// assert_eq!(c.join(", ", " and "), "1, 2 and 3");
    /// assert_eq!(Collection::make(vec![1]).join(", ", " and "), "1");
    /// assert_eq!(Collection::new().join(", ", " and "), "");
    /// ```
    #[must_use]
    pub fn join(&self, glue: &str, final_glue: &str) -> String {
        if final_glue.is_empty() {
            return self.implode(glue);
        }
        let count = self.count();
        if count == 0 {
            return String::new();
        }
        if count == 1 {
            return self.all().values().next().map(ToString::to_string).unwrap_or_default();
        }
        let head = self.slice(0, Some(count as i64 - 1)).implode(glue);
        let tail = self
            .all()
            .get_index(count - 1)
            .map(|(_, v)| v.to_string())
            .unwrap_or_default();
        format!("{}{}{}", head, final_glue, tail)
    }

    /// Returns the key of the first entry whose value equals the needle,
    /// or `None`. Strict comparison requires identical types; loose
    /// comparison lets integers and floats match by numeric value.
    #[must_use]
    pub fn search_value(&self, needle: &Value, strict: bool) -> Option<Key> {
        self.iter()
            .find(|(_, v)| {
                if strict {
                    *v == needle
                } else {
                    v.loose_eq(needle)
                }
            })
            .map(|(k, _)| k.clone())
    }

    /// Returns the key of the first entry the predicate accepts, in
    /// order, or `None`.
    #[must_use]
    pub fn search_by<F>(&self, mut predicate: F) -> Option<Key>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.iter()
            .find(|&(k, v)| predicate(k, v))
            .map(|(k, _)| k.clone())
    }
}
