//! Collection keys.
//!
//! A [`Key`] is either an integer or a string, mirroring the two key kinds
//! an ordered associative collection supports. Integer keys are what
//! sequential sources (arrays, ranges, `push`) produce; string keys come
//! from map-like sources and explicit `put` calls.
//!
//! ## Examples
//!
//! ```rust
//! use kollect::Key;
//!
//! let a = Key::from(0);
//! let b = Key::from("name");
//!
//! assert!(a.is_int());
//! assert!(b.is_str());
//! assert_eq!(a.to_string(), "0");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A collection key: an integer or a string.
///
/// Keys are unique within one collection. Ordering (used by `sort_keys`)
/// places all integer keys before string keys, integers in numeric order
/// and strings in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Returns `true` if this is an integer key.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Returns `true` if this is a string key.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Key::Str(_))
    }

    /// If this is an integer key, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// If this is a string key, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    /// Derives a key from a value, the way `combine` and `pluck` re-key
    /// their results: strings become string keys, integral numbers become
    /// integer keys, booleans become `0`/`1`, and everything else falls
    /// back to its rendered text.
    #[must_use]
    pub fn from_value(value: &crate::Value) -> Key {
        match value {
            crate::Value::String(s) => Key::Str(s.clone()),
            crate::Value::Number(n) => match n.as_i64() {
                Some(i) => Key::Int(i),
                None => Key::Str(n.to_string()),
            },
            crate::Value::Bool(b) => Key::Int(i64::from(*b)),
            other => Key::Str(other.to_string()),
        }
    }

    /// Parses a raw string into a key, normalizing integral text to an
    /// integer key.
    ///
    /// This is how JSON object keys map back into the collection: `"3"`
    /// becomes `Key::Int(3)`, everything else stays a string key. Leading
    /// zeroes and signs other than a plain negative are left as strings so
    /// the normalization round-trips.
    #[must_use]
    pub fn parse(raw: &str) -> Key {
        if raw == "0" {
            return Key::Int(0);
        }
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if !digits.is_empty()
            && !digits.starts_with('0')
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            if let Ok(i) = raw.parse::<i64>() {
                return Key::Int(i);
            }
        }
        Key::Str(raw.to_string())
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
            (Key::Int(_), Key::Str(_)) => Ordering::Less,
            (Key::Str(_), Key::Int(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Int(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Key::Int(i) => serializer.serialize_i64(*i),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or string key")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Key::Int(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Key::Int(value as i64))
                } else {
                    Ok(Key::Str(value.to_string()))
                }
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Key::parse(value))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_integral_strings() {
        assert_eq!(Key::parse("3"), Key::Int(3));
        assert_eq!(Key::parse("-7"), Key::Int(-7));
        assert_eq!(Key::parse("0"), Key::Int(0));
        assert_eq!(Key::parse("03"), Key::Str("03".to_string()));
        assert_eq!(Key::parse("3.5"), Key::Str("3.5".to_string()));
        assert_eq!(Key::parse("name"), Key::Str("name".to_string()));
        assert_eq!(Key::parse(""), Key::Str(String::new()));
    }

    #[test]
    fn test_ordering_ints_before_strings() {
        let mut keys = vec![Key::from("b"), Key::from(2), Key::from("a"), Key::from(-1)];
        keys.sort();
        assert_eq!(
            keys,
            vec![Key::from(-1), Key::from(2), Key::from("a"), Key::from("b")]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::from(42).to_string(), "42");
        assert_eq!(Key::from("id").to_string(), "id");
    }
}
