use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::DeclarationError;

use super::Schema;

/// Schema matching exactly the null value. Carries no constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoneSchema;

impl NoneSchema {
    pub fn new() -> Self {
        Self
    }
}

impl From<NoneSchema> for Schema {
    fn from(_: NoneSchema) -> Schema {
        Schema::None
    }
}

macro_rules! value_only_schema {
    ($(#[$doc:meta])* $schema:ident, $props:ident, $variant:ident, $kind:literal, $value_ty:ty) => {
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $props {
            pub value: Option<$value_ty>,
        }

        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $schema {
            props: $props,
        }

        impl $schema {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn props(&self) -> &$props {
                &self.props
            }

            /// Fix the schema to one concrete value.
            pub fn value(self, value: impl Into<$value_ty>) -> Result<Self, DeclarationError> {
                if self.props.value.is_some() {
                    return Err(DeclarationError::AlreadyDeclared {
                        schema: $kind,
                        constraint: "value",
                    });
                }
                Ok(Self {
                    props: $props {
                        value: Some(value.into()),
                    },
                })
            }
        }

        impl From<$schema> for Schema {
            fn from(schema: $schema) -> Schema {
                Schema::$variant(schema.props)
            }
        }
    };
}

value_only_schema!(
    /// Boolean schema: either of the two values, or one fixed value.
    BoolSchema, BoolProps, Bool, "bool", bool
);
value_only_schema!(
    /// Byte-string schema.
    BytesSchema, BytesProps, Bytes, "bytes", Vec<u8>
);
value_only_schema!(
    /// Calendar date schema.
    DateSchema, DateProps, Date, "date", NaiveDate
);
value_only_schema!(
    /// Naive datetime schema.
    DateTimeSchema, DateTimeProps, DateTime, "datetime", NaiveDateTime
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uuid4Props {
    pub value: Option<Uuid>,
}

/// Version-4 UUID schema. A fixed value must itself be version 4.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uuid4Schema {
    props: Uuid4Props,
}

impl Uuid4Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &Uuid4Props {
        &self.props
    }

    pub fn value(self, value: Uuid) -> Result<Self, DeclarationError> {
        if self.props.value.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "uuid4",
                constraint: "value",
            });
        }
        if value.get_version_num() != 4 {
            return Err(DeclarationError::InvalidPattern {
                detail: format!("uuid {value} is version {}, expected 4", value.get_version_num()),
            });
        }
        Ok(Self {
            props: Uuid4Props { value: Some(value) },
        })
    }
}

impl From<Uuid4Schema> for Schema {
    fn from(schema: Uuid4Schema) -> Schema {
        Schema::Uuid4(schema.props)
    }
}
