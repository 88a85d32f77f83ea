use std::fmt;

use serde::{Deserialize, Serialize};

use super::occurs::{MaxOccurs, Occurs, default_min_occurs};
use super::qname::QName;
use super::types::TypeRef;

/// Compositor of a model group.
///
/// Unknown compositors are kept as [`ModelKind::Other`] so the converter can
/// reject them with a precise error instead of failing at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelKind {
    #[default]
    Sequence,
    Choice,
    All,
    Other(String),
}

impl From<String> for ModelKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "sequence" => ModelKind::Sequence,
            "choice" => ModelKind::Choice,
            "all" => ModelKind::All,
            _ => ModelKind::Other(value),
        }
    }
}

impl From<ModelKind> for String {
    fn from(kind: ModelKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Sequence => write!(f, "sequence"),
            ModelKind::Choice => write!(f, "choice"),
            ModelKind::All => write!(f, "all"),
            ModelKind::Other(other) => write!(f, "{other}"),
        }
    }
}

/// A model group (`xs:sequence`, `xs:choice`, `xs:all`), either defined in
/// place or referring to a global group through `ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XsdGroup {
    #[serde(default)]
    pub name: Option<QName>,
    #[serde(rename = "ref", default)]
    pub reference: Option<QName>,
    #[serde(default)]
    pub model: ModelKind,
    #[serde(default)]
    pub children: Vec<GroupChild>,
    #[serde(default = "default_min_occurs")]
    pub min_occurs: u32,
    #[serde(default)]
    pub max_occurs: MaxOccurs,
}

impl XsdGroup {
    pub fn new(model: ModelKind, children: Vec<GroupChild>) -> Self {
        Self {
            name: None,
            reference: None,
            model,
            children,
            min_occurs: 1,
            max_occurs: MaxOccurs::default(),
        }
    }

    pub fn occurs(&self) -> Occurs {
        Occurs::new(self.min_occurs, self.max_occurs)
    }

    /// The name this group is known by at its point of use: the referenced
    /// group for a `ref`, its own name otherwise.
    pub fn effective_name(&self) -> Option<&QName> {
        self.reference.as_ref().or(self.name.as_ref())
    }
}

/// A particle inside a model group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupChild {
    Element(XsdElement),
    Any(AnyElement),
    Group(XsdGroup),
}

/// An element declaration or a reference to a global one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XsdElement {
    #[serde(default)]
    pub name: Option<QName>,
    #[serde(rename = "ref", default)]
    pub reference: Option<QName>,
    #[serde(rename = "type", default = "TypeRef::any_type")]
    pub type_ref: TypeRef,
    #[serde(default = "default_min_occurs")]
    pub min_occurs: u32,
    #[serde(default)]
    pub max_occurs: MaxOccurs,
}

impl XsdElement {
    pub fn new(name: QName, type_ref: TypeRef) -> Self {
        Self {
            name: Some(name),
            reference: None,
            type_ref,
            min_occurs: 1,
            max_occurs: MaxOccurs::default(),
        }
    }

    pub fn with_occurs(mut self, min_occurs: u32, max_occurs: MaxOccurs) -> Self {
        self.min_occurs = min_occurs;
        self.max_occurs = max_occurs;
        self
    }

    pub fn occurs(&self) -> Occurs {
        Occurs::new(self.min_occurs, self.max_occurs)
    }
}

/// An `xs:any` element wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyElement {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub process_contents: ProcessContents,
    #[serde(default = "default_min_occurs")]
    pub min_occurs: u32,
    #[serde(default)]
    pub max_occurs: MaxOccurs,
}

impl Default for AnyElement {
    fn default() -> Self {
        Self {
            namespace: None,
            process_contents: ProcessContents::default(),
            min_occurs: 1,
            max_occurs: MaxOccurs::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessContents {
    #[default]
    Strict,
    Lax,
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_from_string() {
        assert_eq!(ModelKind::from("choice".to_string()), ModelKind::Choice);
        assert_eq!(
            ModelKind::from("interleave".to_string()),
            ModelKind::Other("interleave".to_string())
        );
    }

    #[test]
    fn test_parse_group_children() {
        let yaml = r#"
model: choice
children:
  - element: { name: a, type: "xs:int" }
  - any: { namespace: '##other', process_contents: lax }
  - group: { ref: Common, min_occurs: 0 }
"#;
        let group: XsdGroup = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(group.model, ModelKind::Choice);
        assert_eq!(group.children.len(), 3);
        match &group.children[0] {
            GroupChild::Element(e) => {
                assert_eq!(e.name, Some(QName::local("a")));
                assert_eq!(e.type_ref, TypeRef::Named(QName::xsd("int")));
                assert_eq!(e.occurs(), Occurs::default());
            }
            other => panic!("expected element, got {other:?}"),
        }
        match &group.children[1] {
            GroupChild::Any(any) => {
                assert_eq!(any.namespace.as_deref(), Some("##other"));
                assert_eq!(any.process_contents, ProcessContents::Lax);
            }
            other => panic!("expected wildcard, got {other:?}"),
        }
        match &group.children[2] {
            GroupChild::Group(g) => {
                assert_eq!(g.effective_name(), Some(&QName::local("Common")));
                assert_eq!(g.min_occurs, 0);
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_element_defaults_to_any_type() {
        let element: XsdElement = serde_yaml_ng::from_str("name: free").unwrap();
        assert_eq!(element.type_ref, TypeRef::any_type());
    }
}
