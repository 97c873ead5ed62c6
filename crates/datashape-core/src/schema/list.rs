use crate::error::DeclarationError;

use super::Schema;

/// One slot of a list element template: a schema, or the rest marker
/// meaning "zero or more unconstrained elements here".
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Schema(Schema),
    Ellipsis,
}

impl Item {
    pub fn is_ellipsis(&self) -> bool {
        matches!(self, Item::Ellipsis)
    }

    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            Item::Schema(schema) => Some(schema),
            Item::Ellipsis => None,
        }
    }
}

/// Template slot holding a schema.
pub fn item(schema: impl Into<Schema>) -> Item {
    Item::Schema(schema.into())
}

/// The rest marker, allowed only at the first and/or last position.
pub fn ellipsis() -> Item {
    Item::Ellipsis
}

/// Anchoring of a list element template, shared by the validator and the
/// substitutor. Carries the concrete (non-marker) schemas in order.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateShape<'a> {
    /// No markers: fixed prefix, extra trailing elements are errors.
    Exact(Vec<&'a Schema>),
    /// Trailing marker: fixed prefix, the rest is unconstrained.
    Head(Vec<&'a Schema>),
    /// Leading marker: fixed suffix matched against the value's end.
    Tail(Vec<&'a Schema>),
    /// Markers on both ends: fixed middle slid over every offset.
    Body(Vec<&'a Schema>),
}

/// Classify a well-formed template (marker placement is enforced at
/// declaration time).
pub fn template_shape(items: &[Item]) -> TemplateShape<'_> {
    let leading = items.first().is_some_and(Item::is_ellipsis);
    let trailing = items.len() > 1 && items.last().is_some_and(Item::is_ellipsis);
    let concrete: Vec<&Schema> = items.iter().filter_map(Item::as_schema).collect();

    match (leading, trailing) {
        (true, true) => TemplateShape::Body(concrete),
        (false, true) => TemplateShape::Head(concrete),
        // A lone marker is a template with an empty fixed prefix.
        (true, false) if items.len() == 1 => TemplateShape::Head(concrete),
        (true, false) => TemplateShape::Tail(concrete),
        (false, false) => TemplateShape::Exact(concrete),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProps {
    pub elements: Option<Vec<Item>>,
    pub of: Option<Box<Schema>>,
    pub len: Option<usize>,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub unique: bool,
}

impl ListProps {
    /// Count of non-marker template slots.
    pub fn concrete_len(&self) -> Option<usize> {
        self.elements
            .as_ref()
            .map(|items| items.iter().filter(|item| !item.is_ellipsis()).count())
    }

    pub fn has_markers(&self) -> bool {
        self.elements
            .as_ref()
            .is_some_and(|items| items.iter().any(Item::is_ellipsis))
    }
}

/// List schema: either an explicit element template, a homogeneous
/// element type, or fully unconstrained; plus length and uniqueness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSchema {
    props: ListProps,
}

impl ListSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &ListProps {
        &self.props
    }

    fn conflict(constraint: &'static str) -> DeclarationError {
        DeclarationError::AlreadyDeclared {
            schema: "list",
            constraint,
        }
    }

    /// Homogeneous element type.
    pub fn of(self, element: impl Into<Schema>) -> Result<Self, DeclarationError> {
        if self.props.of.is_some() || self.props.elements.is_some() {
            return Err(Self::conflict("elements"));
        }
        Ok(Self {
            props: ListProps {
                of: Some(Box::new(element.into())),
                ..self.props
            },
        })
    }

    /// Explicit element template, possibly with rest markers at the ends.
    pub fn elements(self, items: Vec<Item>) -> Result<Self, DeclarationError> {
        if self.props.of.is_some() || self.props.elements.is_some() {
            return Err(Self::conflict("elements"));
        }
        if self.props.len.is_some() || self.props.min_len.is_some() || self.props.max_len.is_some()
        {
            return Err(Self::conflict("elements"));
        }
        let last = items.len().saturating_sub(1);
        for (index, element) in items.iter().enumerate() {
            if element.is_ellipsis() && index != 0 && index != last {
                return Err(DeclarationError::MisplacedEllipsis);
            }
        }
        if items.len() == 2 && items.iter().all(Item::is_ellipsis) {
            return Err(DeclarationError::MisplacedEllipsis);
        }
        Ok(Self {
            props: ListProps {
                elements: Some(items),
                ..self.props
            },
        })
    }

    /// Exact element count; must agree with a declared template.
    pub fn len(self, len: usize) -> Result<Self, DeclarationError> {
        if self.props.len.is_some() || self.props.min_len.is_some() || self.props.max_len.is_some()
        {
            return Err(Self::conflict("len"));
        }
        if let Some(concrete) = self.props.concrete_len() {
            if !self.props.has_markers() && len != concrete {
                return Err(DeclarationError::IncorrectLen {
                    schema: "list",
                    expected: concrete,
                    given: len,
                });
            }
            if self.props.has_markers() && len < concrete {
                return Err(DeclarationError::IncorrectMinLen {
                    schema: "list",
                    expected: concrete,
                    given: len,
                });
            }
        }
        Ok(Self {
            props: ListProps {
                len: Some(len),
                ..self.props
            },
        })
    }

    pub fn min_len(self, min_len: usize) -> Result<Self, DeclarationError> {
        if self.props.len.is_some() || self.props.min_len.is_some() {
            return Err(Self::conflict("min_len"));
        }
        if let Some(concrete) = self.props.concrete_len() {
            if min_len > concrete {
                return Err(DeclarationError::IncorrectMinLen {
                    schema: "list",
                    expected: concrete,
                    given: min_len,
                });
            }
        }
        if let Some(max_len) = self.props.max_len {
            if min_len > max_len {
                return Err(DeclarationError::InvertedLenRange {
                    schema: "list",
                    min_len,
                    max_len,
                });
            }
        }
        Ok(Self {
            props: ListProps {
                min_len: Some(min_len),
                ..self.props
            },
        })
    }

    pub fn max_len(self, max_len: usize) -> Result<Self, DeclarationError> {
        if self.props.len.is_some() || self.props.max_len.is_some() {
            return Err(Self::conflict("max_len"));
        }
        if let Some(concrete) = self.props.concrete_len() {
            if max_len < concrete {
                return Err(DeclarationError::IncorrectMaxLen {
                    schema: "list",
                    expected: concrete,
                    given: max_len,
                });
            }
        }
        if let Some(min_len) = self.props.min_len {
            if min_len > max_len {
                return Err(DeclarationError::InvertedLenRange {
                    schema: "list",
                    min_len,
                    max_len,
                });
            }
        }
        Ok(Self {
            props: ListProps {
                max_len: Some(max_len),
                ..self.props
            },
        })
    }

    /// Require pairwise distinct elements under deep value equality.
    pub fn unique(self) -> Result<Self, DeclarationError> {
        if self.props.unique {
            return Err(Self::conflict("unique"));
        }
        Ok(Self {
            props: ListProps {
                unique: true,
                ..self.props
            },
        })
    }
}

impl From<ListSchema> for Schema {
    fn from(schema: ListSchema) -> Schema {
        Schema::List(schema.props)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{int, str};
    use super::*;

    #[test]
    fn markers_only_at_the_ends() {
        let ok = ListSchema::new().elements(vec![
            ellipsis(),
            item(int()),
            item(str()),
            ellipsis(),
        ]);
        assert!(ok.is_ok());

        let misplaced =
            ListSchema::new().elements(vec![item(int()), ellipsis(), item(str())]);
        assert_eq!(misplaced.unwrap_err(), DeclarationError::MisplacedEllipsis);

        let only_markers = ListSchema::new().elements(vec![ellipsis(), ellipsis()]);
        assert_eq!(only_markers.unwrap_err(), DeclarationError::MisplacedEllipsis);
    }

    #[test]
    fn template_shapes() {
        let exact = vec![item(int()), item(str())];
        assert!(matches!(template_shape(&exact), TemplateShape::Exact(v) if v.len() == 2));

        let head = vec![item(int()), ellipsis()];
        assert!(matches!(template_shape(&head), TemplateShape::Head(v) if v.len() == 1));

        let tail = vec![ellipsis(), item(int())];
        assert!(matches!(template_shape(&tail), TemplateShape::Tail(v) if v.len() == 1));

        let body = vec![ellipsis(), item(int()), ellipsis()];
        assert!(matches!(template_shape(&body), TemplateShape::Body(v) if v.len() == 1));

        let lone = vec![ellipsis()];
        assert!(matches!(template_shape(&lone), TemplateShape::Head(v) if v.is_empty()));
    }

    #[test]
    fn len_must_agree_with_the_template() {
        let templated = ListSchema::new()
            .elements(vec![item(int()), item(int())])
            .unwrap();
        assert!(templated.clone().len(2).is_ok());
        assert!(templated.len(3).is_err());

        let open = ListSchema::new()
            .elements(vec![item(int()), ellipsis()])
            .unwrap();
        assert!(open.clone().len(5).is_ok());
        assert!(open.len(0).is_err());
    }

    #[test]
    fn template_excludes_homogeneous_type_and_vice_versa() {
        let typed = ListSchema::new().of(int()).unwrap();
        assert!(typed.elements(vec![item(int())]).is_err());

        let templated = ListSchema::new().elements(vec![item(int())]).unwrap();
        assert!(templated.of(int()).is_err());
    }

    #[test]
    fn unique_declares_once() {
        let sch = ListSchema::new().unique().unwrap();
        assert!(sch.props().unique);
        assert!(sch.unique().is_err());
    }
}
