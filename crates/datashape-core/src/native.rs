//! Conversion of concrete values into the minimal schemas that admit
//! exactly those values.

use crate::error::FromNativeError;
use crate::schema::{self, Item, Schema};
use crate::value::Value;

/// Build the most specific schema matching `value` and nothing else.
///
/// Containers convert recursively: a list becomes an exact element
/// template, a dict becomes a key set of required keys in order.
pub fn from_native(value: &Value) -> Result<Schema, FromNativeError> {
    let declaration = |err: crate::error::DeclarationError| FromNativeError(err.to_string());
    match value {
        Value::Null => Ok(Schema::None),
        Value::Bool(x) => Ok(schema::bool().value(*x).map_err(declaration)?.into()),
        Value::Int(x) => Ok(schema::int().value(*x).map_err(declaration)?.into()),
        Value::Float(x) => Ok(schema::float().value(*x).map_err(declaration)?.into()),
        Value::Str(x) => Ok(schema::str().value(x.clone()).map_err(declaration)?.into()),
        Value::Bytes(x) => Ok(schema::bytes().value(x.clone()).map_err(declaration)?.into()),
        Value::Uuid(x) => Ok(schema::uuid4().value(*x).map_err(declaration)?.into()),
        Value::Date(x) => Ok(schema::date().value(*x).map_err(declaration)?.into()),
        Value::DateTime(x) => Ok(schema::datetime().value(*x).map_err(declaration)?.into()),
        Value::List(elements) => {
            let mut items = Vec::with_capacity(elements.len());
            for element in elements {
                items.push(Item::Schema(from_native(element)?));
            }
            Ok(schema::list().elements(items).map_err(declaration)?.into())
        }
        Value::Dict(entries) => {
            let mut keys = Vec::with_capacity(entries.len());
            for (name, element) in entries {
                keys.push((name.as_str().into(), from_native(element)?));
            }
            Ok(schema::dict().keys(keys).map_err(declaration)?.into())
        }
    }
}
