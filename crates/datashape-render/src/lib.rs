//! Canonical text rendering of Datashape schemas.
//!
//! [`Representor`] prints a schema back as the builder chain that would
//! declare it, with containers spread over indented lines. Custom
//! variants render through a [`RepresentHook`], falling back to
//! `<TypeName>` when none is registered.

use std::collections::HashMap;

use datashape_core::Schema;
use datashape_core::schema::{CustomSchema, Item};

/// Rendering hook for a custom schema variant.
pub trait RepresentHook: Send + Sync {
    fn represent(&self, schema: &CustomSchema, indent: usize) -> String;
}

pub struct Representor {
    root: String,
    indent: usize,
    hooks: HashMap<String, Box<dyn RepresentHook>>,
}

impl Default for Representor {
    fn default() -> Self {
        Self::new()
    }
}

impl Representor {
    pub fn new() -> Self {
        Self {
            root: "schema".to_string(),
            indent: 4,
            hooks: HashMap::new(),
        }
    }

    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::new()
        }
    }

    /// Register the rendering hook for a custom type name.
    pub fn register_hook(&mut self, type_name: impl Into<String>, hook: Box<dyn RepresentHook>) {
        self.hooks.insert(type_name.into(), hook);
    }

    pub fn represent(&self, schema: &Schema) -> String {
        self.render(schema, 0)
    }

    fn render(&self, schema: &Schema, indent: usize) -> String {
        let root = &self.root;
        match schema {
            Schema::None => format!("{root}::none()"),
            Schema::Bool(props) => {
                let mut r = format!("{root}::bool()");
                if let Some(value) = props.value {
                    r.push_str(&format!(".value({value})"));
                }
                r
            }
            Schema::Int(props) | Schema::Int32(props) => {
                let name = schema.kind();
                let mut r = format!("{root}::{name}()");
                if let Some(value) = props.value {
                    r.push_str(&format!(".value({value})"));
                }
                if let Some(min) = props.min {
                    r.push_str(&format!(".min({min})"));
                }
                if let Some(max) = props.max {
                    r.push_str(&format!(".max({max})"));
                }
                if let Some(multiple_of) = props.multiple_of {
                    r.push_str(&format!(".multiple_of({multiple_of})"));
                }
                r
            }
            Schema::Float(props) => {
                let mut r = format!("{root}::float()");
                if let Some(value) = props.value {
                    r.push_str(&format!(".value({value:?})"));
                }
                if let Some(min) = props.min {
                    r.push_str(&format!(".min({min:?})"));
                }
                if let Some(max) = props.max {
                    r.push_str(&format!(".max({max:?})"));
                }
                if let Some(precision) = props.precision {
                    r.push_str(&format!(".precision({precision})"));
                }
                r
            }
            Schema::Str(props) => {
                let mut r = format!("{root}::str()");
                if let Some(value) = &props.value {
                    r.push_str(&format!(".value({value:?})"));
                }
                if let Some(alphabet) = &props.alphabet {
                    r.push_str(&format!(".alphabet({alphabet:?})"));
                }
                if let Some(substr) = &props.substr {
                    r.push_str(&format!(".contains({substr:?})"));
                }
                if let Some(pattern) = &props.pattern {
                    r.push_str(&format!(".regex({pattern:?})"));
                }
                push_len_calls(&mut r, props.len, props.min_len, props.max_len);
                r
            }
            Schema::Bytes(props) => {
                let mut r = format!("{root}::bytes()");
                if let Some(value) = &props.value {
                    r.push_str(&format!(".value(b\"{}\")", value.escape_ascii()));
                }
                r
            }
            Schema::List(props) => {
                let mut r = format!("{root}::list()");
                if let Some(element) = &props.of {
                    r.push_str(&format!(".of({})", self.render(element, indent)));
                } else if let Some(items) = &props.elements {
                    r.push_str(&self.render_elements(items, indent));
                }
                push_len_calls(&mut r, props.len, props.min_len, props.max_len);
                if props.unique {
                    r.push_str(".unique()");
                }
                r
            }
            Schema::Dict(props) => {
                let mut r = format!("{root}::dict()");
                if let Some(keys) = &props.keys {
                    if keys.is_empty() {
                        r.push_str(".keys([])");
                    } else {
                        let pad = " ".repeat(indent + self.indent);
                        let pairs: Vec<String> = keys
                            .iter()
                            .map(|(name, entry)| {
                                let key = if entry.optional {
                                    format!("optional({name:?})")
                                } else {
                                    format!("{name:?}")
                                };
                                let val = self.render(&entry.schema, indent + self.indent);
                                format!("{pad}{key}: {val}")
                            })
                            .collect();
                        let close = " ".repeat(indent);
                        r.push_str(&format!(
                            ".keys({{\n{}\n{close}}})",
                            pairs.join(",\n")
                        ));
                    }
                }
                if props.relaxed {
                    r.push_str(".relaxed()");
                }
                r
            }
            Schema::Any(props) => {
                let mut r = format!("{root}::any()");
                if let Some(types) = &props.types {
                    let rendered: Vec<String> =
                        types.iter().map(|t| self.render(t, indent)).collect();
                    r.push_str(&format!(".alternatives({})", rendered.join(", ")));
                }
                r
            }
            Schema::Uuid4(props) => {
                let mut r = format!("{root}::uuid4()");
                if let Some(value) = props.value {
                    r.push_str(&format!(".value({value:?})"));
                }
                r
            }
            Schema::Date(props) => {
                let mut r = format!("{root}::date()");
                if let Some(value) = props.value {
                    r.push_str(&format!(".value({value})"));
                }
                r
            }
            Schema::DateTime(props) => {
                let mut r = format!("{root}::datetime()");
                if let Some(value) = props.value {
                    r.push_str(&format!(".value({value})"));
                }
                r
            }
            Schema::Alias(props) => {
                format!("{}<{}>", props.name, self.render(&props.inner, indent))
            }
            Schema::Custom(custom) => match self.hooks.get(custom.name()) {
                Some(hook) => hook.represent(custom, indent),
                None => format!("<{}>", custom.name()),
            },
        }
    }

    fn render_elements(&self, items: &[Item], indent: usize) -> String {
        if items.is_empty() {
            return ".elements([])".to_string();
        }
        let pad = " ".repeat(indent + self.indent);
        let rendered: Vec<String> = items
            .iter()
            .map(|item| match item {
                Item::Ellipsis => format!("{pad}..."),
                Item::Schema(schema) => {
                    format!("{pad}{}", self.render(schema, indent + self.indent))
                }
            })
            .collect();
        let close = " ".repeat(indent);
        format!(".elements([\n{}\n{close}])", rendered.join(",\n"))
    }
}

fn push_len_calls(r: &mut String, len: Option<usize>, min_len: Option<usize>, max_len: Option<usize>) {
    if let Some(len) = len {
        r.push_str(&format!(".len({len})"));
    }
    if let Some(min_len) = min_len {
        r.push_str(&format!(".min_len({min_len})"));
    }
    if let Some(max_len) = max_len {
        r.push_str(&format!(".max_len({max_len})"));
    }
}

#[cfg(test)]
mod tests {
    use datashape_core::schema::{self, ellipsis, item, optional};

    use super::*;

    fn render(schema: impl Into<Schema>) -> String {
        Representor::new().represent(&schema.into())
    }

    #[test]
    fn leaves_render_their_builder_chain() {
        assert_eq!(render(schema::none()), "schema::none()");
        assert_eq!(
            render(schema::int().min(1).unwrap().max(10).unwrap()),
            "schema::int().min(1).max(10)"
        );
        assert_eq!(
            render(schema::str().value("hi").unwrap()),
            "schema::str().value(\"hi\")"
        );
        assert_eq!(
            render(schema::float().value(3.14).unwrap()),
            "schema::float().value(3.14)"
        );
    }

    #[test]
    fn uuid_values_render_hyphenated() {
        let id = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(render(schema::uuid4()), "schema::uuid4()");
        assert_eq!(
            render(schema::uuid4().value(id).unwrap()),
            "schema::uuid4().value(67e55044-10b1-426f-9247-bb680e5fe0c8)"
        );
    }

    #[test]
    fn dicts_spread_keys_over_indented_lines() {
        let sch = schema::dict()
            .keys(vec![
                ("id".into(), schema::int().into()),
                (optional("note"), schema::str().into()),
            ])
            .unwrap();
        assert_eq!(
            render(sch),
            "schema::dict().keys({\n    \"id\": schema::int(),\n    optional(\"note\"): schema::str()\n})"
        );
    }

    #[test]
    fn nested_containers_indent_further() {
        let sch = schema::dict()
            .keys(vec![(
                "items".into(),
                schema::list()
                    .elements(vec![item(schema::int()), ellipsis()])
                    .unwrap()
                    .into(),
            )])
            .unwrap();
        let expected = "schema::dict().keys({\n    \"items\": schema::list().elements([\n        schema::int(),\n        ...\n    ])\n})";
        assert_eq!(render(sch), expected);
    }

    #[test]
    fn aliases_and_customs_render_by_name() {
        let aliased = schema::alias("UserId", schema::int().min(1).unwrap());
        assert_eq!(render(aliased), "UserId<schema::int().min(1)>");

        let custom = schema::CustomSchema::new("Sha1Hash").unwrap();
        assert_eq!(render(custom), "<Sha1Hash>");
    }

    #[test]
    fn hooks_override_the_custom_fallback() {
        struct HexHook;
        impl RepresentHook for HexHook {
            fn represent(&self, schema: &CustomSchema, _indent: usize) -> String {
                format!("hex::{}()", schema.name())
            }
        }
        let mut representor = Representor::new();
        representor.register_hook("Sha1Hash", Box::new(HexHook));
        let custom: Schema = schema::CustomSchema::new("Sha1Hash").unwrap().into();
        assert_eq!(representor.represent(&custom), "hex::Sha1Hash()");
    }
}
