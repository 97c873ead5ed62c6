use indexmap::IndexMap;

use crate::error::DeclarationError;
use crate::schema::Schema;
use crate::value::Value;

/// A constraint value stored in a generic [`Props`] map.
///
/// Absence is expressed by the map itself (`get` returning `None`), which
/// stays distinct from a present `PropValue::Value(Value::Null)`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Value(Value),
    Schema(Box<Schema>),
}

impl PropValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PropValue::Value(value) => Some(value),
            PropValue::Schema(_) => None,
        }
    }

    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            PropValue::Schema(schema) => Some(schema),
            PropValue::Value(_) => None,
        }
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::Value(value)
    }
}

impl From<Schema> for PropValue {
    fn from(schema: Schema) -> Self {
        PropValue::Schema(Box::new(schema))
    }
}

/// Append-only attribute map used by custom schema variants.
///
/// Every mutation produces a new map; equality is key-by-key, with a
/// missing key never equal to a present one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    entries: IndexMap<String, PropValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Declare a constraint exactly once; redeclaring is a conflict.
    pub fn declare(
        &self,
        name: &str,
        value: impl Into<PropValue>,
    ) -> Result<Self, DeclarationError> {
        if self.entries.contains_key(name) {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "custom",
                constraint: "prop",
            });
        }
        Ok(self.update(name, value))
    }

    /// Shallow merge producing a new map; the last write wins.
    pub fn update(&self, name: &str, value: impl Into<PropValue>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(name.to_string(), value.into());
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_is_append_only() {
        let props = Props::new();
        let declared = props.declare("min", Value::Int(1)).unwrap();
        assert!(props.get("min").is_none());
        assert_eq!(declared.get("min"), Some(&PropValue::Value(Value::Int(1))));
        assert!(declared.declare("min", Value::Int(2)).is_err());
    }

    #[test]
    fn absent_differs_from_null() {
        let props = Props::new().update("value", Value::Null);
        assert!(props.contains("value"));
        assert_eq!(props.get("value"), Some(&PropValue::Value(Value::Null)));
        assert!(props.get("other").is_none());
        assert_ne!(props, Props::new());
    }

    #[test]
    fn equality_is_key_by_key() {
        let a = Props::new().update("min", Value::Int(1)).update("max", Value::Int(5));
        let b = Props::new().update("min", Value::Int(1)).update("max", Value::Int(5));
        assert_eq!(a, b);
        assert_ne!(a, a.update("max", Value::Int(6)));
    }
}
