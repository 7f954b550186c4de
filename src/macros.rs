/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys go through [`Key::parse`](crate::Key::parse), so integral
/// keys like `"5"` land as integer keys the same way runtime coercion
/// would store them.
///
/// # Examples
///
/// ```rust
/// use kollect::{kollect, Key, Value};
///
/// let v = kollect!({
///     "name": "Alice",
///     "tags": ["admin", "dev"],
///     "5": true
/// });
/// let map = v.as_map().unwrap();
/// assert_eq!(map.get(&Key::from("name")), Some(&Value::from("Alice")));
/// assert_eq!(map.get(&Key::Int(5)), Some(&Value::Bool(true)));
/// ```
#[macro_export]
macro_rules! kollect {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::kollect!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Map($crate::OrderedMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::OrderedMap::new();
        $(
            map.insert($crate::Key::parse($key), $crate::kollect!($value));
        )*
        $crate::Value::Map(map)
    }};

    // Fallback for any expression convertible into a value
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Key, Number, OrderedMap, Value};

    #[test]
    fn test_kollect_macro_primitives() {
        assert_eq!(kollect!(null), Value::Null);
        assert_eq!(kollect!(true), Value::Bool(true));
        assert_eq!(kollect!(false), Value::Bool(false));
        assert_eq!(kollect!(42), Value::Number(Number::Int(42)));
        assert_eq!(kollect!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(kollect!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_kollect_macro_arrays() {
        assert_eq!(kollect!([]), Value::Array(vec![]));

        let arr = kollect!([1, "two", [3]]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::from(1));
                assert_eq!(vec[1], Value::from("two"));
                assert_eq!(vec[2], Value::Array(vec![Value::from(3)]));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_kollect_macro_objects() {
        assert_eq!(kollect!({}), Value::Map(OrderedMap::new()));

        let obj = kollect!({
            "name": "Alice",
            "age": 30,
            "7": "lucky"
        });

        match obj {
            Value::Map(map) => {
                assert_eq!(map.len(), 3);
                assert_eq!(map.get(&Key::from("name")), Some(&Value::from("Alice")));
                assert_eq!(map.get(&Key::from("age")), Some(&Value::from(30)));
                assert_eq!(map.get(&Key::Int(7)), Some(&Value::from("lucky")));
            }
            _ => panic!("Expected map"),
        }
    }

    #[test]
    fn test_kollect_macro_nested() {
        let obj = kollect!({
            "user": {"roles": ["admin"], "active": true},
            "count": 1
        });
        let map = obj.as_map().unwrap();
        let user = map.get(&Key::from("user")).and_then(Value::as_map).unwrap();
        assert_eq!(
            user.get(&Key::from("roles")),
            Some(&Value::Array(vec![Value::from("admin")]))
        );
        assert_eq!(user.get(&Key::from("active")), Some(&Value::Bool(true)));
    }
}
