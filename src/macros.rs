/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Keys are literals (strings or numbers); anything else in value position
/// goes through [`to_value`](crate::to_value). Negative numbers need
/// parentheses, e.g. `yaml!([(-1), 2])`.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::{yaml, Value};
///
/// let data = yaml!({
///     "name": "Alice",
///     "tags": ["rust", "yaml"],
///     "manager": null
/// });
/// assert_eq!(
///     data.as_mapping().and_then(|m| m.get_str("name")),
///     Some(&Value::from("Alice"))
/// );
/// ```
#[macro_export]
macro_rules! yaml {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::yaml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($crate::Value::from($key), $crate::yaml!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Anything serializable; values serde cannot express become null.
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Mapping, Number, Value};

    #[test]
    fn test_yaml_macro_primitives() {
        assert_eq!(yaml!(null), Value::Null);
        assert_eq!(yaml!(true), Value::Bool(true));
        assert_eq!(yaml!(false), Value::Bool(false));
        assert_eq!(yaml!(42), Value::Number(Number::Integer(42)));
        assert_eq!(yaml!((-42)), Value::Number(Number::Integer(-42)));
        assert_eq!(yaml!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(yaml!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_yaml_macro_sequences() {
        assert_eq!(yaml!([]), Value::Sequence(vec![]));

        match yaml!([1, "two", [3]]) {
            Value::Sequence(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Value::from(1));
                assert_eq!(items[1], Value::from("two"));
                assert_eq!(items[2], Value::Sequence(vec![Value::from(3)]));
            }
            _ => panic!("Expected sequence"),
        }
    }

    #[test]
    fn test_yaml_macro_mappings() {
        assert_eq!(yaml!({}), Value::Mapping(Mapping::new()));

        let obj = yaml!({
            "name": "Alice",
            "age": 30,
            1: "numeric key"
        });

        match obj {
            Value::Mapping(map) => {
                assert_eq!(map.len(), 3);
                assert_eq!(map.get_str("name"), Some(&Value::from("Alice")));
                assert_eq!(map.get_str("age"), Some(&Value::from(30)));
                assert_eq!(map.get(&Value::from(1)), Some(&Value::from("numeric key")));
                let keys: Vec<_> = map.keys().cloned().collect();
                assert_eq!(keys[0], Value::from("name"));
            }
            _ => panic!("Expected mapping"),
        }
    }
}
