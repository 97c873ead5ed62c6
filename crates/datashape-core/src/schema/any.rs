use crate::error::DeclarationError;

use super::Schema;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnyProps {
    pub types: Option<Vec<Schema>>,
}

/// Union schema: with no alternatives it admits every value, with
/// alternatives it admits a value matching at least one of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnySchema {
    props: AnyProps,
}

impl AnySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &AnyProps {
        &self.props
    }

    /// Declare the alternatives. Nested unions are flattened so the
    /// alternative list stays one level deep.
    pub fn alternatives(
        self,
        types: Vec<Schema>,
    ) -> Result<Self, DeclarationError> {
        if self.props.types.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "any",
                constraint: "types",
            });
        }
        if types.is_empty() {
            return Err(DeclarationError::EmptyUnion);
        }
        let mut flat = Vec::with_capacity(types.len());
        for schema in types {
            match schema {
                Schema::Any(AnyProps { types: Some(inner) }) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Ok(Self {
            props: AnyProps { types: Some(flat) },
        })
    }
}

impl From<AnySchema> for Schema {
    fn from(schema: AnySchema) -> Schema {
        Schema::Any(schema.props)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{any, int, str};
    use super::*;

    #[test]
    fn nested_unions_flatten() {
        let inner: Schema = any().alternatives(vec![int().into(), str().into()]).unwrap().into();
        let outer = any()
            .alternatives(vec![Schema::None, inner])
            .unwrap();
        let types = outer.props().types.as_ref().unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(types[0], Schema::None);
    }

    #[test]
    fn empty_union_is_rejected() {
        assert_eq!(
            any().alternatives(vec![]).unwrap_err(),
            DeclarationError::EmptyUnion
        );
    }

    #[test]
    fn alternatives_declare_once() {
        let sch = any().alternatives(vec![int().into()]).unwrap();
        assert!(sch.alternatives(vec![str().into()]).is_err());
    }
}
