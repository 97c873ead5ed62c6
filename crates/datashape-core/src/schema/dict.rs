use indexmap::IndexMap;

use crate::error::DeclarationError;

use super::Schema;

/// A key declaration: required by default, optional when wrapped with
/// [`optional`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyDecl {
    Required(String),
    Optional(String),
}

impl KeyDecl {
    pub fn name(&self) -> &str {
        match self {
            KeyDecl::Required(name) | KeyDecl::Optional(name) => name,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, KeyDecl::Optional(_))
    }
}

impl From<&str> for KeyDecl {
    fn from(name: &str) -> Self {
        KeyDecl::Required(name.to_owned())
    }
}

impl From<String> for KeyDecl {
    fn from(name: String) -> Self {
        KeyDecl::Required(name)
    }
}

/// Mark a dict key as optional: it may be absent from a valid value,
/// and the generator skips it.
pub fn optional(name: impl Into<String>) -> KeyDecl {
    KeyDecl::Optional(name.into())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub schema: Schema,
    pub optional: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictProps {
    pub keys: Option<IndexMap<String, DictEntry>>,
    pub relaxed: bool,
}

impl DictProps {
    pub fn get(&self, key: &str) -> Option<&DictEntry> {
        self.keys.as_ref().and_then(|keys| keys.get(key))
    }
}

/// Dict schema: declared keys with per-key optionality, and a relaxed
/// flag permitting undeclared keys in validated values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictSchema {
    props: DictProps,
}

impl DictSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &DictProps {
        &self.props
    }

    /// Declare the full key set at once. Declaration order is preserved.
    pub fn keys(
        self,
        entries: Vec<(KeyDecl, Schema)>,
    ) -> Result<Self, DeclarationError> {
        if self.props.keys.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "dict",
                constraint: "keys",
            });
        }
        let mut keys = IndexMap::with_capacity(entries.len());
        for (decl, schema) in entries {
            let optional = decl.is_optional();
            let name = match decl {
                KeyDecl::Required(name) | KeyDecl::Optional(name) => name,
            };
            if keys.insert(name, DictEntry { schema, optional }).is_some() {
                return Err(DeclarationError::AlreadyDeclared {
                    schema: "dict",
                    constraint: "keys",
                });
            }
        }
        Ok(Self {
            props: DictProps {
                keys: Some(keys),
                ..self.props
            },
        })
    }

    /// Permit undeclared keys in validated values.
    pub fn relaxed(self) -> Result<Self, DeclarationError> {
        if self.props.relaxed {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "dict",
                constraint: "relaxed",
            });
        }
        Ok(Self {
            props: DictProps {
                relaxed: true,
                ..self.props
            },
        })
    }
}

impl From<DictSchema> for Schema {
    fn from(schema: DictSchema) -> Schema {
        Schema::Dict(schema.props)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{int, str};
    use super::*;

    #[test]
    fn keys_preserve_declaration_order() {
        let sch = DictSchema::new()
            .keys(vec![
                ("id".into(), int().into()),
                ("name".into(), str().into()),
                (optional("note"), str().into()),
            ])
            .unwrap();
        let names: Vec<&str> = sch
            .props()
            .keys
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(names, ["id", "name", "note"]);
        assert!(sch.props().get("note").unwrap().optional);
        assert!(!sch.props().get("id").unwrap().optional);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let res = DictSchema::new().keys(vec![
            ("id".into(), int().into()),
            ("id".into(), str().into()),
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn keys_and_relaxed_declare_once() {
        let sch = DictSchema::new()
            .keys(vec![("id".into(), int().into())])
            .unwrap();
        assert!(sch.clone().keys(vec![]).is_err());

        let relaxed = sch.relaxed().unwrap();
        assert!(relaxed.props().relaxed);
        assert!(relaxed.relaxed().is_err());
    }
}
