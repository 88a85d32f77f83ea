use serde::{Deserialize, Serialize};

use super::attribute::AttributeDecl;
use super::group::XsdGroup;
use super::qname::QName;

/// An XSD type definition: simple, complex, or a simple-type union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum XsdType {
    Simple(SimpleType),
    Complex(ComplexType),
    Union(UnionType),
}

impl XsdType {
    /// Qualified name, `None` for anonymous types.
    pub fn name(&self) -> Option<&QName> {
        match self {
            XsdType::Simple(s) => s.name.as_ref(),
            XsdType::Complex(c) => c.name.as_ref(),
            XsdType::Union(u) => u.name.as_ref(),
        }
    }

    pub(crate) fn set_name(&mut self, name: QName) {
        match self {
            XsdType::Simple(s) => s.name = Some(name),
            XsdType::Complex(c) => c.name = Some(name),
            XsdType::Union(u) => u.name = Some(name),
        }
    }
}

/// A reference to a type: a qualified name (global or built-in) or an inline,
/// anonymous definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Named(QName),
    Inline(Box<XsdType>),
}

impl TypeRef {
    /// `xs:anyType`, the type of an element declared without one.
    pub fn any_type() -> Self {
        TypeRef::Named(QName::xsd("anyType"))
    }

    /// `xs:anySimpleType`, the type of an attribute declared without one.
    pub fn any_simple_type() -> Self {
        TypeRef::Named(QName::xsd("anySimpleType"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleVariety {
    #[default]
    Atomic,
    List,
}

/// A simple type restricted from a built-in or another simple type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleType {
    pub name: Option<QName>,
    pub base: Option<TypeRef>,
    /// Nearest built-in ancestor along the base chain. Filled in by the
    /// linker when the model omits it.
    pub primitive: Option<QName>,
    pub variety: SimpleVariety,
    pub enumeration: Vec<serde_json::Value>,
    pub patterns: Vec<String>,
    pub facets: Facets,
}

/// Constraining facets of a simple type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Facets {
    pub length: Option<u64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub total_digits: Option<u64>,
    pub fraction_digits: Option<u64>,
    pub min_inclusive: Option<serde_json::Value>,
    pub max_inclusive: Option<serde_json::Value>,
    pub min_exclusive: Option<serde_json::Value>,
    pub max_exclusive: Option<serde_json::Value>,
    pub white_space: Option<String>,
}

/// A union of simple member types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnionType {
    pub name: Option<QName>,
    /// `None` when the model carries no member information.
    pub member_types: Option<Vec<TypeRef>>,
}

/// A complex type: attributes plus an optional content model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexType {
    pub name: Option<QName>,
    pub attributes: Vec<AttributeDecl>,
    pub content: Option<ContentModel>,
    pub derivation: Option<Derivation>,
    pub mixed: bool,
}

impl ComplexType {
    /// The base type when this type extends another over complex content.
    pub fn extension_base(&self) -> Option<&TypeRef> {
        match (&self.derivation, &self.content) {
            (_, Some(ContentModel::Simple(_))) => None,
            (Some(derivation), _) if derivation.kind == DerivationKind::Extension => {
                Some(&derivation.base)
            }
            _ => None,
        }
    }
}

/// Content of a complex type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentModel {
    /// Complex content: a model group of element particles.
    Group(XsdGroup),
    /// Simple content: character data of the given simple type.
    Simple(TypeRef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub kind: DerivationKind,
    pub base: TypeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivationKind {
    Extension,
    Restriction,
}
