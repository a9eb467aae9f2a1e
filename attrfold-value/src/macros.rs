//! The `value!` construction macro.

/// Build a [`Value`](crate::Value) from a JSON-like literal.
///
/// Every array element and object value is one token tree: a literal,
/// `null`, a nested `[...]` or `{...}`, an identifier, or a parenthesized
/// expression such as `(-1)` or `(name.clone())`.
///
/// ```
/// use attrfold_value::value;
///
/// let v = value!({"class": ["a", "b"], "data": {"foo": 1}, "hidden": null});
/// assert!(v.as_object().is_some());
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(::std::vec![ $( $crate::value!($elem) ),* ])
    };
    ({ $($key:tt : $val:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut object = $crate::VObject::new();
        $(
            object.insert(::std::string::String::from($key), $crate::value!($val));
        )*
        $crate::Value::Object(object)
    }};
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
