use std::{collections::BTreeMap, fmt};

use crate::{
    error::RuntimeError,
    interpreter::evaluator::{core::EvalResult, function::core::NativeFunction},
};

/// Represents a runtime value in the interpreter.
///
/// Values are copy-valued: every declaration, assignment and lookup hands out
/// an independent deep copy, so two bindings never observe each other's
/// mutations. Composite updates go through read, modify, rebind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    /// Produced by relational and logical operators. `if` and `while` tests
    /// must evaluate to one.
    Boolean(bool),
    /// A signed machine integer. Division and modulo truncate toward zero.
    Number(i32),
    String(String),
    /// Named properties, each owning its value.
    Object(BTreeMap<String, Self>),
    Array(Vec<Self>),
    /// A host function from the native table.
    NativeFunction(NativeFunction),
    /// Signals loop termination through ordinary returns. Blocks relay it,
    /// `while` consumes it.
    Break,
}

/// The kind tag of a [`Value`], used to name operands in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Object,
    Array,
    NativeFunction,
    Break,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
            Self::Object => "Object",
            Self::Array => "Array",
            Self::NativeFunction => "NativeFunction",
            Self::Break => "Break",
        };
        f.write_str(name)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(v)
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Value {
    fn from_iter<T: IntoIterator<Item = (K, Self)>>(iter: T) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Value {
    /// Returns the kind tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Object(_) => ValueKind::Object,
            Self::Array(_) => ValueKind::Array,
            Self::NativeFunction(_) => ValueKind::NativeFunction,
            Self::Break => ValueKind::Break,
        }
    }

    /// Returns whether this is the loop-termination sentinel.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::Break)
    }

    /// Extracts a Boolean required by `context`.
    ///
    /// # Errors
    /// Returns `ExpectedBoolean` naming `context` and the kind found.
    ///
    /// # Example
    /// ```
    /// use padscript::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Boolean(true).as_bool("if test", 1), Ok(true));
    /// assert!(Value::Number(1).as_bool("if test", 1).is_err());
    /// ```
    pub fn as_bool(&self, context: &'static str, line: usize) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            other => Err(RuntimeError::ExpectedBoolean { context,
                                                         found: other.kind(),
                                                         line }),
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Object(properties) => {
                if properties.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in properties.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.fmt_nested(f)?;
                }
                f.write_str(" }")
            },
            Self::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.fmt_nested(f)?;
                }
                f.write_str("]")
            },
            Self::NativeFunction(function) => write!(f, "<native function {}>", function.name),
            Self::Break => f.write_str("break"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_are_independent() {
        let list = Value::Array(vec![Value::Number(1), Value::Number(2)]);
        let original: Value = [("list", list)].into_iter().collect();
        let mut copy = original.clone();
        if let Value::Object(properties) = &mut copy
           && let Some(Value::Array(list)) = properties.get_mut("list")
        {
            list.push(Value::Number(3));
        }
        assert_ne!(original, copy);
        assert_eq!(original.to_string(), "{ list: [1, 2] }");
        assert_eq!(copy.to_string(), "{ list: [1, 2, 3] }");
    }

    #[test]
    fn display_quotes_nested_strings_only() {
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::from(vec!["a".into(), Value::Null]).to_string(), "[\"a\", null]");
        assert_eq!(Value::Object(BTreeMap::new()).to_string(), "{}");
    }
}
