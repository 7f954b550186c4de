//! Best-effort string-to-list coercion.
//!
//! When a string source fails structured (JSON) decoding during collection
//! construction, it is decomposed into a sequence of substrings instead of
//! being rejected: comma-separated text splits on commas, anything else
//! splits on whitespace. Construction stays total either way.

use crate::Value;

/// Splits an arbitrary string into an ordered list of trimmed components.
///
/// Comma-separated input splits on commas; otherwise the string splits on
/// whitespace. Empty components are dropped, so an empty or blank string
/// yields an empty list.
///
/// # Examples
///
/// ```rust
/// use kollect::strutil::to_list;
/// use kollect::Value;
///
/// assert_eq!(
///     to_list("a, b,c"),
///     vec![Value::from("a"), Value::from("b"), Value::from("c")]
/// );
/// assert_eq!(to_list("one two"), vec![Value::from("one"), Value::from("two")]);
/// assert_eq!(to_list("   "), Vec::<Value>::new());
/// ```
#[must_use]
pub fn to_list(input: &str) -> Vec<Value> {
    let parts: Vec<&str> = if input.contains(',') {
        input.split(',').map(str::trim).collect()
    } else {
        input.split_whitespace().collect()
    };
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(Value::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_split_trims() {
        assert_eq!(
            to_list(" x ,y, z "),
            vec![Value::from("x"), Value::from("y"), Value::from("z")]
        );
    }

    #[test]
    fn test_whitespace_split() {
        assert_eq!(
            to_list("alpha\tbeta  gamma"),
            vec![
                Value::from("alpha"),
                Value::from("beta"),
                Value::from("gamma")
            ]
        );
    }

    #[test]
    fn test_single_word() {
        assert_eq!(to_list("word"), vec![Value::from("word")]);
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(to_list(""), Vec::<Value>::new());
        assert_eq!(to_list(",,"), Vec::<Value>::new());
    }
}
