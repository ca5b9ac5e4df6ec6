use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a node living in a [`VariableState`](super::state::VariableState) heap.
pub type NodeId = u32;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
    Array(Vec<Value>),
    Record(BTreeMap<String, Value>),
    Reference(NodeId),
    Undefined,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            Value::Reference(_) => "reference",
            Value::Undefined => "undefined",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// `Undefined` doubles as the null pointer for heap references.
    pub fn as_reference(&self) -> Option<Option<NodeId>> {
        match self {
            Value::Reference(id) => Some(Some(*id)),
            Value::Undefined => Some(None),
            _ => None,
        }
    }

    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    pub fn reference(id: Option<NodeId>) -> Self {
        match id {
            Some(id) => Value::Reference(id),
            None => Value::Undefined,
        }
    }

    /// Text printed by a pseudocode `print`: strings appear without quotes.
    pub fn printed(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

impl From<Vec<i64>> for Value {
    fn from(values: Vec<i64>) -> Self {
        Value::Array(values.into_iter().map(Value::Integer).collect())
    }
}

impl From<Vec<i32>> for Value {
    fn from(values: Vec<i32>) -> Self {
        Value::Array(values.into_iter().map(Value::from).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => {
                if v.fract() == 0.0 && v.is_finite() {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Value::Text(v) => write!(f, "{v:?}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Array(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            Value::Record(fields) => {
                write!(f, "{{")?;
                let mut first = true;
                for (name, value) in fields {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Reference(id) => write!(f, "@{id}"),
            Value::Undefined => write!(f, "undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_literal_syntax() {
        let node = Value::record([("value", Value::Integer(3)), ("next", Value::Reference(2))]);
        assert_eq!(node.to_string(), "{next: @2, value: 3}");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::Real(2.0).to_string(), "2.0");
        assert_eq!(Value::from("Fizz").to_string(), "\"Fizz\"");
    }

    #[test]
    fn printed_text_is_unquoted() {
        assert_eq!(Value::from("Buzz").printed(), "Buzz");
        assert_eq!(Value::Integer(7).printed(), "7");
    }

    #[test]
    fn undefined_is_a_null_reference() {
        assert_eq!(Value::Undefined.as_reference(), Some(None));
        assert_eq!(Value::Reference(4).as_reference(), Some(Some(4)));
        assert_eq!(Value::Integer(4).as_reference(), None);
    }
}
