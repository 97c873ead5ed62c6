//! Schema-directed substitution walk.

use std::collections::HashMap;

use datashape_core::schema::{
    AnyProps, CustomSchema, DictEntry, DictProps, Item, ListProps, TemplateShape, template_shape,
};
use datashape_core::{Schema, Value, from_native};
use datashape_validate::{Formatter, ValidateHook, Validator};
use tracing::trace;

use crate::errors::SubstitutionError;

/// Substitution hook for a custom schema variant, producing the narrowed
/// schema for a concrete value.
pub trait SubstituteHook: Send + Sync {
    fn substitute(
        &self,
        schema: &CustomSchema,
        value: &Value,
    ) -> Result<Schema, SubstitutionError>;
}

/// Narrows a schema to a concrete value.
///
/// Every node is first checked against the value with a lenient
/// validator: declared dict keys may be omitted and list uniqueness is
/// not enforced, but everything else must fit.
pub struct Substitutor {
    validator: Validator,
    formatter: Formatter,
    hooks: HashMap<String, Box<dyn SubstituteHook>>,
}

impl Default for Substitutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Substitutor {
    pub fn new() -> Self {
        Self {
            validator: Validator::lenient(),
            formatter: Formatter::new(),
            hooks: HashMap::new(),
        }
    }

    /// Register the substitution hook for a custom type name.
    pub fn register_hook(&mut self, type_name: impl Into<String>, hook: Box<dyn SubstituteHook>) {
        self.hooks.insert(type_name.into(), hook);
    }

    /// Register the validation hook used for the pre-substitution check
    /// of a custom type name.
    pub fn register_validate_hook(
        &mut self,
        type_name: impl Into<String>,
        hook: Box<dyn ValidateHook>,
    ) {
        self.validator.register_hook(type_name, hook);
    }

    fn check(&self, schema: &Schema, value: &Value) -> Result<(), SubstitutionError> {
        let result = self.validator.validate(schema, value)?;
        if result.has_errors() {
            return Err(SubstitutionError::Mismatch {
                formatted: self.formatter.format_result(&result),
            });
        }
        Ok(())
    }

    /// Return a new schema narrowed to `value`; `schema` is untouched.
    pub fn substitute(
        &self,
        schema: &Schema,
        value: &Value,
    ) -> Result<Schema, SubstitutionError> {
        trace!(kind = schema.kind(), "substitute");
        match schema {
            Schema::None => {
                self.check(schema, value)?;
                Ok(Schema::None)
            }
            Schema::Bool(props) => {
                self.check(schema, value)?;
                let Value::Bool(v) = value else { unreachable!() };
                let mut props = props.clone();
                props.value = Some(*v);
                Ok(Schema::Bool(props))
            }
            Schema::Int(props) | Schema::Int32(props) => {
                self.check(schema, value)?;
                let Value::Int(v) = value else { unreachable!() };
                let mut props = props.clone();
                props.value = Some(*v);
                Ok(match schema {
                    Schema::Int32(_) => Schema::Int32(props),
                    _ => Schema::Int(props),
                })
            }
            Schema::Float(props) => {
                self.check(schema, value)?;
                let Value::Float(v) = value else { unreachable!() };
                let mut props = props.clone();
                props.value = Some(*v);
                Ok(Schema::Float(props))
            }
            Schema::Str(props) => {
                self.check(schema, value)?;
                let Value::Str(v) = value else { unreachable!() };
                let mut props = props.clone();
                props.value = Some(v.clone());
                Ok(Schema::Str(props))
            }
            Schema::Bytes(props) => {
                self.check(schema, value)?;
                let Value::Bytes(v) = value else { unreachable!() };
                let mut props = props.clone();
                props.value = Some(v.clone());
                Ok(Schema::Bytes(props))
            }
            Schema::Uuid4(props) => {
                self.check(schema, value)?;
                let Value::Uuid(v) = value else { unreachable!() };
                let mut props = props.clone();
                props.value = Some(*v);
                Ok(Schema::Uuid4(props))
            }
            Schema::Date(props) => {
                self.check(schema, value)?;
                let Value::Date(v) = value else { unreachable!() };
                let mut props = props.clone();
                props.value = Some(*v);
                Ok(Schema::Date(props))
            }
            Schema::DateTime(props) => {
                self.check(schema, value)?;
                let Value::DateTime(v) = value else { unreachable!() };
                let mut props = props.clone();
                props.value = Some(*v);
                Ok(Schema::DateTime(props))
            }
            Schema::List(props) => {
                self.check(schema, value)?;
                let Value::List(elements) = value else { unreachable!() };
                self.substitute_list(props, elements)
            }
            Schema::Dict(props) => {
                self.check(schema, value)?;
                let Value::Dict(entries) = value else { unreachable!() };
                self.substitute_dict(props, entries)
            }
            Schema::Any(props) => {
                self.check(schema, value)?;
                let types = match &props.types {
                    None => vec![from_native(value)?],
                    Some(types) => {
                        // Keep the alternatives that accept the value.
                        let mut survivors = Vec::new();
                        for alternative in types {
                            if let Ok(substituted) = self.substitute(alternative, value) {
                                survivors.push(substituted);
                            }
                        }
                        if survivors.is_empty() {
                            return Err(SubstitutionError::NoMatchingAlternative);
                        }
                        survivors
                    }
                };
                Ok(Schema::Any(AnyProps { types: Some(types) }))
            }
            Schema::Alias(props) => {
                let inner = self.substitute(&props.inner, value)?;
                let mut props = props.clone();
                props.inner = Box::new(inner);
                Ok(Schema::Alias(props))
            }
            Schema::Custom(custom) => {
                self.check(schema, value)?;
                let hook = self.hooks.get(custom.name()).ok_or_else(|| {
                    datashape_core::CapabilityError::new(custom.name(), "substitute")
                })?;
                hook.substitute(custom, value)
            }
        }
    }

    fn substitute_list(
        &self,
        props: &ListProps,
        elements: &[Value],
    ) -> Result<Schema, SubstitutionError> {
        let items = match (&props.elements, &props.of) {
            (None, None) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(Item::Schema(from_native(element)?));
                }
                items
            }
            (None, Some(element_schema)) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(Item::Schema(self.substitute(element_schema, element)?));
                }
                items
            }
            (Some(template), _) => self.substitute_template(template, elements)?,
        };
        let mut props = props.clone();
        props.elements = Some(items);
        props.of = None;
        Ok(Schema::List(props))
    }

    fn substitute_template(
        &self,
        template: &[Item],
        elements: &[Value],
    ) -> Result<Vec<Item>, SubstitutionError> {
        match template_shape(template) {
            TemplateShape::Exact(schemas) => self.substitute_run(&schemas, elements, 0),
            TemplateShape::Head(schemas) => self.substitute_run(&schemas, elements, 0),
            TemplateShape::Tail(schemas) => {
                let start = elements.len().saturating_sub(schemas.len());
                self.substitute_run(&schemas, elements, start)
            }
            TemplateShape::Body(schemas) => {
                let last = elements.len().saturating_sub(schemas.len());
                for offset in 0..=last {
                    if let Ok(items) = self.substitute_run(&schemas, elements, offset) {
                        return Ok(items);
                    }
                }
                Err(SubstitutionError::NoMatchingOffset)
            }
        }
    }

    /// Substitute consecutive schemas at `start`, converting the value
    /// elements before and after into fixed schemas.
    fn substitute_run(
        &self,
        schemas: &[&Schema],
        elements: &[Value],
        start: usize,
    ) -> Result<Vec<Item>, SubstitutionError> {
        let mut items = Vec::with_capacity(elements.len());
        for element in &elements[..start] {
            items.push(Item::Schema(from_native(element)?));
        }
        for (offset, schema) in schemas.iter().enumerate() {
            let index = start + offset;
            let element = elements
                .get(index)
                .ok_or(SubstitutionError::IndexOutOfRange { index })?;
            items.push(Item::Schema(self.substitute(schema, element)?));
        }
        for element in &elements[(start + schemas.len()).min(elements.len())..] {
            items.push(Item::Schema(from_native(element)?));
        }
        Ok(items)
    }

    fn substitute_dict(
        &self,
        props: &DictProps,
        entries: &indexmap::IndexMap<String, Value>,
    ) -> Result<Schema, SubstitutionError> {
        let mut keys = indexmap::IndexMap::new();
        match &props.keys {
            None => {
                for (name, element) in entries {
                    keys.insert(
                        name.clone(),
                        DictEntry {
                            schema: from_native(element)?,
                            optional: false,
                        },
                    );
                }
            }
            Some(declared) => {
                for (name, entry) in declared {
                    match entries.get(name) {
                        Some(element) => {
                            keys.insert(
                                name.clone(),
                                DictEntry {
                                    schema: self.substitute(&entry.schema, element)?,
                                    optional: false,
                                },
                            );
                        }
                        None => {
                            keys.insert(name.clone(), entry.clone());
                        }
                    }
                }
                // Undeclared keys are rejected even for relaxed dicts: the
                // substituted schema must name every key it fixes.
                for name in entries.keys() {
                    if !declared.contains_key(name) {
                        return Err(SubstitutionError::UnknownKey { key: name.clone() });
                    }
                }
            }
        }
        let mut props = props.clone();
        props.keys = Some(keys);
        Ok(Schema::Dict(props))
    }
}
