use super::Schema;

#[derive(Debug, Clone, PartialEq)]
pub struct AliasProps {
    pub name: String,
    pub inner: Box<Schema>,
}

/// Named wrapper around an inner schema. Every engine delegates to the
/// inner schema; only the canonical rendering shows the name.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasSchema {
    props: AliasProps,
}

impl AliasSchema {
    pub fn new(name: impl Into<String>, inner: impl Into<Schema>) -> Self {
        Self {
            props: AliasProps {
                name: name.into(),
                inner: Box::new(inner.into()),
            },
        }
    }

    pub fn props(&self) -> &AliasProps {
        &self.props
    }
}

impl From<AliasSchema> for Schema {
    fn from(schema: AliasSchema) -> Schema {
        Schema::Alias(schema.props)
    }
}
