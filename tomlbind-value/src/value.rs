//! Dynamically-typed destination values.

use core::fmt;

use indexmap::IndexMap;

use crate::{Datetime, Document};

/// The type of a [`Value`], for diagnostics and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Map of string keys to values
    Map,
    /// Sequence of values
    Seq,
    /// 64-bit signed integer
    Int,
    /// String
    String,
    /// 64-bit float
    Float,
    /// Boolean
    Bool,
    /// Datetime
    Datetime,
}

/// A value whose shape is decided by the data, not by a declared type.
///
/// This is what a decoder writes into destinations that accept "any value":
/// tables become [`Value::Map`], arrays become [`Value::Seq`], and scalars keep
/// their natural 64-bit representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Mapping from string to dynamically-typed value
    Map(IndexMap<String, Value>),
    /// Ordered sequence of dynamically-typed values
    Seq(Vec<Value>),
    /// 64-bit signed integer
    Int(i64),
    /// String
    String(String),
    /// 64-bit float
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Timestamp
    Datetime(Datetime),
}

impl Default for Value {
    fn default() -> Self {
        Value::Map(IndexMap::new())
    }
}

impl Value {
    /// Returns the type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Map(_) => ValueType::Map,
            Value::Seq(_) => ValueType::Seq,
            Value::Int(_) => ValueType::Int,
            Value::String(_) => ValueType::String,
            Value::Float(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Bool,
            Value::Datetime(_) => ValueType::Datetime,
        }
    }

    /// Returns the map if this is a [`Value::Map`].
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::Seq`].
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the float if this is a [`Value::Float`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the datetime if this is a [`Value::Datetime`].
    pub fn as_datetime(&self) -> Option<&Datetime> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Looks up `key` if this is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl From<&Document> for Value {
    /// Picks the representation from the document kind alone, recursively.
    fn from(doc: &Document) -> Self {
        match doc {
            Document::Table(table) => Value::Map(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
            Document::Array(items) => Value::Seq(items.iter().map(Value::from).collect()),
            Document::String(s) => Value::String(s.clone()),
            Document::Integer(n) => Value::Int(*n),
            Document::Float(n) => Value::Float(*n),
            Document::Boolean(b) => Value::Bool(*b),
            Document::Datetime(dt) => Value::Datetime(*dt),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Datetime> for Value {
    fn from(dt: Datetime) -> Self {
        Value::Datetime(dt)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Int(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Datetime(dt) => write!(f, "{dt}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Table;

    #[test]
    fn map_equality_ignores_order() {
        let a: Value = [("x", 1i64), ("y", 2i64)].into_iter().collect();
        let b: Value = [("y", 2i64), ("x", 1i64)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn from_document_is_kind_directed() {
        let mut inner = Table::new();
        inner.insert(
            "world".into(),
            Document::Array(vec![1i64.into(), 2i64.into(), 3i64.into()]),
        );
        let mut root = Table::new();
        root.insert("hello".into(), Document::Table(inner));

        let value = Value::from(&Document::Table(root));
        let world = value.get("hello").and_then(|h| h.get("world")).unwrap();
        assert_eq!(world, &Value::from(vec![1i64, 2, 3]));
    }

    #[test]
    fn display_is_compact() {
        let v: Value = [("a", Value::from(vec![1i64, 2])), ("b", "s".into())]
            .into_iter()
            .collect();
        assert_eq!(v.to_string(), r#"{"a": [1, 2], "b": "s"}"#);
    }
}
