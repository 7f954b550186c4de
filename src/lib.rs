//! # kollect
//!
//! An ordered associative collection with a fluent operation algebra.
//!
//! ## What is a collection?
//!
//! A [`Collection`] is an insertion-ordered map from keys (integers or
//! strings) to dynamically typed [`Value`]s, with around sixty operations
//! layered on top: set algebra (`diff`, `intersect`, `merge`, `union`),
//! key-path access (`get("user.address.city")`), ordering and
//! partitioning (`sort`, `chunk`, `split`, `splice`), functional
//! transforms (`map`, `filter`, `pluck`, `zip`), and joining/inspection
//! (`implode`, `join`, `search_value`, `to_json`).
//!
//! ## Key Features
//!
//! - **Order-Preserving**: entries keep insertion order through every
//!   operation; updates to an existing key keep its position
//! - **Total Coercion**: any [`Value`] coerces into a collection:
//!   sequences get integer keys, scalars wrap, JSON strings decode
//! - **Serde Compatible**: collections serialize and deserialize through
//!   serde, preserving entry order
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! kollect = "0.1"
//! ```
//!
//! ### Building and transforming
//!
//! ```rust
//! use kollect::{collect, Value};
//!
//! let c = collect(vec![1, 2, 3, 4, 5]);
//! let evens = c.filter(|_, v| v.as_i64().map_or(false, |n| n % 2 == 0));
//! assert_eq!(evens.values_vec(), vec![Value::from(2), Value::from(4)]);
//!
//! let sum: i64 = c.values_vec().iter().filter_map(Value::as_i64).sum();
//! assert_eq!(sum, 15);
//! ```
//!
//! ### Dynamic values with the kollect! macro
//!
//! ```rust
//! use kollect::{kollect, Collection, Value};
//!
//! let users = Collection::make(kollect!([
//!     {"name": "Alice", "city": "Oslo"},
//!     {"name": "Bob", "city": "Lima"}
//! ]));
//!
//! let names = users.pluck("name", None);
//! assert_eq!(names.implode(", "), "Alice, Bob");
//! ```
//!
//! ### Key paths
//!
//! ```rust
//! use kollect::{kollect, Collection, Value};
//!
//! let c = Collection::make(kollect!({"user": {"name": "Alice", "roles": ["admin"]}}));
//! assert_eq!(c.get("user.name"), Some(&Value::from("Alice")));
//! assert_eq!(c.get("user.roles.0"), Some(&Value::from("admin")));
//! assert_eq!(c.get("user.phone"), None);
//! ```
//!
//! ## Fallibility
//!
//! Almost every operation is total. The exceptions return [`Result`] or
//! [`Option`]: `combine` (length mismatch), `random`/`random_n` (empty or
//! oversized request), and the JSON entry points (malformed input).
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All indexing is bounds-checked
//! - No panics in the public API (except for logic errors that indicate bugs)

pub mod bc;
pub mod error;
pub mod key;
pub mod macros;
pub mod map;
pub mod path;
pub mod strutil;
pub mod value;

mod algebra;
mod collection;
mod ordering;
mod transform;

pub use collection::Collection;
pub use error::{Error, Result};
pub use key::Key;
pub use map::OrderedMap;
pub use value::{Number, Value};

/// Build a collection from anything convertible into a [`Value`].
///
/// Shorthand for [`Collection::make`].
///
/// # Examples
///
/// ```rust
/// use kollect::collect;
///
/// let c = collect(vec!["a", "b", "c"]);
/// assert_eq!(c.count(), 3);
/// ```
#[must_use]
pub fn collect(items: impl Into<Value>) -> Collection {
    Collection::make(items)
}

/// Parse a JSON document into a collection.
///
/// Objects become keyed entries (integral keys like `"5"` normalize to
/// integer keys), arrays become sequentially keyed entries, and scalars
/// wrap as a single entry at key `0`.
///
/// # Examples
///
/// ```rust
/// use kollect::{from_json, Value};
///
/// let c = from_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert_eq!(c.get("name"), Some(&Value::from("Alice")));
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_json(input: &str) -> Result<Collection> {
    let value: Value = serde_json::from_str(input)?;
    Ok(Collection::make(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_shorthand() {
        let c = collect(vec![1, 2, 3]);
        assert_eq!(c.count(), 3);
        assert_eq!(c.get(0), Some(&Value::from(1)));
    }

    #[test]
    fn test_from_json_object() {
        let c = from_json(r#"{"b": 2, "a": 1, "5": "five"}"#).unwrap();
        assert_eq!(c.get("b"), Some(&Value::from(2)));
        assert_eq!(c.get(5), Some(&Value::from("five")));
        // JSON object order survives the round trip.
        assert_eq!(
            c.keys().values_vec(),
            vec![Value::from("b"), Value::from("a"), Value::from(5)]
        );
    }

    #[test]
    fn test_from_json_array_and_scalar() {
        let arr = from_json("[10, 20]").unwrap();
        assert_eq!(arr.get(1), Some(&Value::from(20)));

        let scalar = from_json("42").unwrap();
        assert_eq!(scalar.get(0), Some(&Value::from(42)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(from_json("{not json").is_err());
    }
}
