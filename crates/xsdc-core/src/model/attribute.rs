use serde::{Deserialize, Serialize};

use super::group::ProcessContents;
use super::qname::QName;
use super::types::TypeRef;

/// An entry in a complex type's attribute list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeDecl {
    Attribute(XsdAttribute),
    AnyAttribute(AnyAttribute),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XsdAttribute {
    pub name: QName,
    #[serde(rename = "type", default = "TypeRef::any_simple_type")]
    pub type_ref: TypeRef,
    #[serde(rename = "use", default)]
    pub usage: AttributeUse,
    #[serde(default)]
    pub fixed: Option<serde_json::Value>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeUse {
    Required,
    #[default]
    Optional,
    Prohibited,
}

/// An `xs:anyAttribute` wildcard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnyAttribute {
    pub namespace: Option<String>,
    pub process_contents: ProcessContents,
}
