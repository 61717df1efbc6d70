//! JSON value representation.

/// A parsed JSON value.
///
/// The tree is acyclic and single-owner: every node is owned by its
/// parent container, and the root by whoever received it from the
/// parser. Teardown is Rust's ordinary `Drop`; there is no separate
/// release call.
///
/// Objects are kept as a sequence of `(key, value)` pairs rather than
/// a map: insertion order is significant and duplicate keys are
/// permitted and preserved. Lookup is defined as the first matching
/// pair in insertion order (see [`Value::find`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit floating-point number.
    Number(f64),
    /// UTF-8 string, with escape sequences already decoded.
    String(String),
    /// Array of values, insertion order significant.
    Array(Vec<Value>),
    /// Object as ordered key/value pairs, duplicates allowed.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is an `Array`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the key/value pairs if this is an `Object`.
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Look up `key` in an object by linear scan, returning the first
    /// pair whose key matches. Returns `None` when the key is absent
    /// or when this value is not an object at all; a non-object root
    /// is not an error here.
    pub fn find(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the element at `index` if this is an `Array`.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// The variant name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        Value::Object(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from("text").as_str(), Some("text"));
        assert_eq!(Value::Null.as_str(), None);
        assert_eq!(Value::Bool(false).as_array(), None);
    }

    #[test]
    fn test_find_first_match_wins() {
        let object = Value::Object(vec![
            ("a".to_string(), Value::Number(1.0)),
            ("b".to_string(), Value::Number(2.0)),
            ("a".to_string(), Value::Number(3.0)),
        ]);
        assert_eq!(object.find("a"), Some(&Value::Number(1.0)));
        assert_eq!(object.find("b"), Some(&Value::Number(2.0)));
        assert_eq!(object.find("c"), None);
    }

    #[test]
    fn test_find_on_non_object_is_none() {
        assert_eq!(Value::Null.find("key"), None);
        assert_eq!(Value::Array(vec![]).find("key"), None);
        assert_eq!(Value::from("text").find("key"), None);
    }

    #[test]
    fn test_get_index() {
        let array = Value::Array(vec![Value::Bool(true), Value::Null]);
        assert_eq!(array.get_index(0), Some(&Value::Bool(true)));
        assert_eq!(array.get_index(2), None);
        assert_eq!(Value::Null.get_index(0), None);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(2.0), Value::Number(2.0));
        assert_eq!(
            Value::from(vec![Value::Null]),
            Value::Array(vec![Value::Null])
        );
        let pairs = vec![("k".to_string(), Value::Null)];
        assert_eq!(Value::from(pairs.clone()), Value::Object(pairs));
    }
}
