//! Key-path utilities over nested ordered mappings.
//!
//! A key path is a dotted string (`"a.b.c"`) addressing nested keys:
//! segment `a` under the root, `b` under that, `c` under that. Map
//! segments resolve string keys first and fall back to integer keys when
//! the segment is integral text; array segments resolve as indexes.
//!
//! Lookups never raise: a missing segment yields `None`, and the caller
//! supplies any default. Writes create intermediate maps as needed.
//!
//! ## Examples
//!
//! ```rust
//! use kollect::{kollect, path, Value};
//!
//! let root = kollect!({"user": {"address": {"city": "Oslo"}}});
//! let map = root.as_map().unwrap();
//!
//! assert_eq!(path::get(map, "user.address.city"), Some(&Value::from("Oslo")));
//! assert_eq!(path::get(map, "user.phone"), None);
//! ```

use crate::{Key, OrderedMap, Value};

/// Resolves a single path segment against a value.
fn descend<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Map(map) => map
            .get(&Key::Str(segment.to_string()))
            .or_else(|| segment.parse::<i64>().ok().and_then(|i| map.get(&Key::Int(i)))),
        Value::Array(arr) => segment.parse::<usize>().ok().and_then(|i| arr.get(i)),
        _ => None,
    }
}

fn map_key_for(map: &OrderedMap, segment: &str) -> Key {
    let string_key = Key::Str(segment.to_string());
    if map.contains_key(&string_key) {
        return string_key;
    }
    match segment.parse::<i64>() {
        Ok(i) if map.contains_key(&Key::Int(i)) => Key::Int(i),
        _ => string_key,
    }
}

/// Returns a reference to the value at the dotted path, or `None` if any
/// segment is absent.
#[must_use]
pub fn get<'a>(map: &'a OrderedMap, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = map.get(&map_key_for(map, first))?;
    for segment in segments {
        current = descend(current, segment)?;
    }
    Some(current)
}

/// Returns a reference to the value at the dotted path inside an arbitrary
/// value, or `None` if any segment is absent.
#[must_use]
pub fn get_in<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = descend(current, segment)?;
    }
    Some(current)
}

/// Writes a value at the dotted path, creating intermediate maps for
/// missing segments and replacing non-map intermediates.
pub fn set(map: &mut OrderedMap, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    set_segments(map, &segments, value);
}

fn set_segments(map: &mut OrderedMap, segments: &[&str], value: Value) {
    let key = map_key_for(map, segments[0]);
    if segments.len() == 1 {
        map.insert(key, value);
        return;
    }
    if !matches!(map.get(&key), Some(Value::Map(_))) {
        map.insert(key.clone(), Value::Map(OrderedMap::new()));
    }
    if let Some(Value::Map(inner)) = map.get_mut(&key) {
        set_segments(inner, &segments[1..], value);
    }
}

/// Removes and returns the value at the dotted path, or `None` if any
/// segment is absent. Remaining entries keep their order.
pub fn pull(map: &mut OrderedMap, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.split('.').collect();
    pull_segments(map, &segments)
}

fn pull_segments(map: &mut OrderedMap, segments: &[&str]) -> Option<Value> {
    let key = map_key_for(map, segments[0]);
    if segments.len() == 1 {
        return map.remove(&key);
    }
    match map.get_mut(&key)? {
        Value::Map(inner) => pull_segments(inner, &segments[1..]),
        _ => None,
    }
}

/// Returns a copy of the map without the given top-level keys.
#[must_use]
pub fn except(map: &OrderedMap, keys: &[Key]) -> OrderedMap {
    map.iter()
        .filter(|&(k, _)| !keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Returns a copy of the map holding only the given top-level keys, in the
/// map's own order.
#[must_use]
pub fn only(map: &OrderedMap, keys: &[Key]) -> OrderedMap {
    map.iter()
        .filter(|&(k, _)| keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Flattens the map's values into a flat list, recursing into nested
/// arrays and maps up to `depth` levels. Original keys are discarded.
#[must_use]
pub fn flatten(map: &OrderedMap, depth: usize) -> Vec<Value> {
    let mut out = Vec::new();
    for value in map.values() {
        flatten_value(value, depth, &mut out);
    }
    out
}

fn flatten_value(value: &Value, depth: usize, out: &mut Vec<Value>) {
    match value {
        Value::Array(arr) if depth > 0 => {
            for element in arr {
                flatten_value(element, depth - 1, out);
            }
        }
        Value::Map(map) if depth > 0 => {
            for element in map.values() {
                flatten_value(element, depth - 1, out);
            }
        }
        other => out.push(other.clone()),
    }
}

/// Expands dotted top-level keys into nested maps: `{"a.b": 1}` becomes
/// `{"a": {"b": 1}}`. Non-dotted keys pass through unchanged.
#[must_use]
pub fn undot(map: &OrderedMap) -> OrderedMap {
    let mut out = OrderedMap::new();
    for (key, value) in map.iter() {
        match key.as_str() {
            Some(s) if s.contains('.') => set(&mut out, s, value.clone()),
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}

/// Projects each item by extracting `value_path`, optionally re-keying the
/// result by `key_path`. Missing paths yield `Null` values; missing key
/// paths skip re-keying for that item and fall back to a sequential key.
#[must_use]
pub fn pluck<'a, I>(items: I, value_path: &str, key_path: Option<&str>) -> OrderedMap
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut out = OrderedMap::new();
    let mut next_index: i64 = 0;
    for item in items {
        let plucked = get_in(item, value_path).cloned().unwrap_or(Value::Null);
        let key = key_path
            .and_then(|path| get_in(item, path))
            .map(Key::from_value);
        match key {
            Some(key) => {
                out.insert(key, plucked);
            }
            None => {
                out.insert(Key::Int(next_index), plucked);
                next_index += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kollect;

    fn nested() -> OrderedMap {
        match kollect!({
            "user": {"name": "Alice", "roles": ["admin", "dev"]},
            "count": 2
        }) {
            Value::Map(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_get_traverses_maps_and_arrays() {
        let map = nested();
        assert_eq!(get(&map, "user.name"), Some(&Value::from("Alice")));
        assert_eq!(get(&map, "user.roles.1"), Some(&Value::from("dev")));
        assert_eq!(get(&map, "count"), Some(&Value::from(2)));
        assert_eq!(get(&map, "user.missing"), None);
        assert_eq!(get(&map, "user.name.deeper"), None);
    }

    #[test]
    fn test_set_creates_intermediates() {
        let mut map = OrderedMap::new();
        set(&mut map, "a.b.c", Value::from(1));
        assert_eq!(get(&map, "a.b.c"), Some(&Value::from(1)));
        set(&mut map, "a.b.d", Value::from(2));
        assert_eq!(get(&map, "a.b.c"), Some(&Value::from(1)));
        assert_eq!(get(&map, "a.b.d"), Some(&Value::from(2)));
    }

    #[test]
    fn test_pull_removes_nested() {
        let mut map = nested();
        assert_eq!(pull(&mut map, "user.name"), Some(Value::from("Alice")));
        assert_eq!(get(&map, "user.name"), None);
        assert_eq!(pull(&mut map, "user.name"), None);
        assert_eq!(get(&map, "count"), Some(&Value::from(2)));
    }

    #[test]
    fn test_except_and_only() {
        let map = nested();
        let rest = except(&map, &[Key::from("user")]);
        assert_eq!(rest.len(), 1);
        assert!(rest.contains_key(&Key::from("count")));

        let picked = only(&map, &[Key::from("count"), Key::from("absent")]);
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn test_flatten_respects_depth() {
        let map = match kollect!({"a": [1, [2, [3]]], "b": 4}) {
            Value::Map(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(
            flatten(&map, usize::MAX),
            vec![
                Value::from(1),
                Value::from(2),
                Value::from(3),
                Value::from(4)
            ]
        );
        assert_eq!(
            flatten(&map, 1),
            vec![
                Value::from(1),
                Value::from(vec![Value::from(2), Value::from(vec![3])]),
                Value::from(4)
            ]
        );
    }

    #[test]
    fn test_undot_builds_nested_maps() {
        let mut map = OrderedMap::new();
        map.insert(Key::from("a.b"), Value::from(1));
        map.insert(Key::from("a.c"), Value::from(2));
        map.insert(Key::from("plain"), Value::from(3));
        let out = undot(&map);
        assert_eq!(get(&out, "a.b"), Some(&Value::from(1)));
        assert_eq!(get(&out, "a.c"), Some(&Value::from(2)));
        assert_eq!(out.get(&Key::from("plain")), Some(&Value::from(3)));
    }

    #[test]
    fn test_pluck_with_and_without_key() {
        let items = vec![
            kollect!({"id": 1, "name": "a"}),
            kollect!({"id": 2, "name": "b"}),
        ];
        let by_index = pluck(items.iter(), "name", None);
        assert_eq!(by_index.get(&Key::Int(0)), Some(&Value::from("a")));
        assert_eq!(by_index.get(&Key::Int(1)), Some(&Value::from("b")));

        let by_id = pluck(items.iter(), "name", Some("id"));
        assert_eq!(by_id.get(&Key::Int(2)), Some(&Value::from("b")));
    }
}
