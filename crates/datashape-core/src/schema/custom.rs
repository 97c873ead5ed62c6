use crate::error::DeclarationError;
use crate::props::Props;

use super::Schema;

/// Open extension point: a schema variant identified by name, carrying a
/// generic property map. Engines resolve it through their hook registries
/// and fail with a capability error when no hook is registered.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomSchema {
    name: String,
    props: Props,
}

impl CustomSchema {
    /// Create a custom variant. The name must be a plain identifier since
    /// it doubles as the hook registry key and the rendering fallback.
    pub fn new(name: impl Into<String>) -> Result<Self, DeclarationError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(DeclarationError::InvalidTypeName { name });
        }
        Ok(Self {
            name,
            props: Props::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Declare one property; redeclaring a name fails.
    pub fn declare(
        self,
        key: &str,
        value: impl Into<crate::props::PropValue>,
    ) -> Result<Self, DeclarationError> {
        Ok(Self {
            props: self.props.declare(key, value)?,
            name: self.name,
        })
    }
}

impl From<CustomSchema> for Schema {
    fn from(schema: CustomSchema) -> Schema {
        Schema::Custom(schema)
    }
}
