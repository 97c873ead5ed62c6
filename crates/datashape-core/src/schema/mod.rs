//! Immutable schema nodes and their typed declaration builders.
//!
//! Every leaf constructor returns a builder (`IntSchema`, `StrSchema`, ...)
//! whose chained declaration methods consume `self` and return a fresh
//! value; conflicting or repeated declarations fail immediately with a
//! [`DeclarationError`]. Builders convert into the [`Schema`] enum that the
//! engines traverse.

mod alias;
mod any;
mod custom;
mod dict;
mod list;
mod numbers;
mod scalars;
mod text;

pub use alias::{AliasProps, AliasSchema};
pub use any::{AnyProps, AnySchema};
pub use custom::CustomSchema;
pub use dict::{DictEntry, DictProps, DictSchema, KeyDecl, optional};
pub use list::{Item, ListProps, ListSchema, TemplateShape, ellipsis, item, template_shape};
pub use numbers::{FloatProps, FloatSchema, Int32Schema, IntProps, IntSchema};
pub use scalars::{
    BoolProps, BoolSchema, BytesProps, BytesSchema, DateProps, DateSchema, DateTimeProps,
    DateTimeSchema, NoneSchema, Uuid4Props, Uuid4Schema,
};
pub use text::{StrProps, StrSchema};

/// An immutable schema node tagged by one variant from the catalog.
///
/// The closed variants dispatch statically; `Custom` is the open extension
/// point, resolved through per-engine hook registries.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    None,
    Bool(BoolProps),
    Int(IntProps),
    Int32(IntProps),
    Float(FloatProps),
    Str(StrProps),
    Bytes(BytesProps),
    List(ListProps),
    Dict(DictProps),
    Any(AnyProps),
    Uuid4(Uuid4Props),
    Date(DateProps),
    DateTime(DateTimeProps),
    Alias(AliasProps),
    Custom(CustomSchema),
}

impl Schema {
    /// Variant tag used in diagnostics and canonical rendering.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::None => "none",
            Schema::Bool(_) => "bool",
            Schema::Int(_) => "int",
            Schema::Int32(_) => "int32",
            Schema::Float(_) => "float",
            Schema::Str(_) => "str",
            Schema::Bytes(_) => "bytes",
            Schema::List(_) => "list",
            Schema::Dict(_) => "dict",
            Schema::Any(_) => "any",
            Schema::Uuid4(_) => "uuid4",
            Schema::Date(_) => "date",
            Schema::DateTime(_) => "datetime",
            Schema::Alias(_) => "alias",
            Schema::Custom(_) => "custom",
        }
    }
}

/// Unconstrained `none` schema.
pub fn none() -> NoneSchema {
    NoneSchema::new()
}

/// Unconstrained `bool` schema.
pub fn bool() -> BoolSchema {
    BoolSchema::new()
}

/// Unconstrained `int` schema.
pub fn int() -> IntSchema {
    IntSchema::new()
}

/// `int` schema preconstrained to the 32-bit range.
pub fn int32() -> Int32Schema {
    Int32Schema::new()
}

/// Unconstrained `float` schema.
pub fn float() -> FloatSchema {
    FloatSchema::new()
}

/// Unconstrained `str` schema.
pub fn str() -> StrSchema {
    StrSchema::new()
}

/// Unconstrained `bytes` schema.
pub fn bytes() -> BytesSchema {
    BytesSchema::new()
}

/// Untyped `list` schema; refine with `of`, `elements`, and length bounds.
pub fn list() -> ListSchema {
    ListSchema::new()
}

/// Untyped `dict` schema; refine with `keys` and `relaxed`.
pub fn dict() -> DictSchema {
    DictSchema::new()
}

/// Union schema; declare alternatives with `alternatives`.
pub fn any() -> AnySchema {
    AnySchema::new()
}

/// Version-4 UUID schema.
pub fn uuid4() -> Uuid4Schema {
    Uuid4Schema::new()
}

/// Calendar date schema.
pub fn date() -> DateSchema {
    DateSchema::new()
}

/// Naive datetime schema.
pub fn datetime() -> DateTimeSchema {
    DateTimeSchema::new()
}

/// Named wrapper around an inner schema, used purely for nicer rendering.
pub fn alias(name: impl Into<String>, inner: impl Into<Schema>) -> AliasSchema {
    AliasSchema::new(name, inner)
}
