pub mod attribute;
pub mod builtins;
pub mod group;
pub mod link;
pub mod occurs;
pub mod qname;
pub mod schema;
pub mod types;

pub use attribute::{AnyAttribute, AttributeDecl, AttributeUse, XsdAttribute};
pub use group::{AnyElement, GroupChild, ModelKind, ProcessContents, XsdElement, XsdGroup};
pub use link::link;
pub use occurs::{MaxOccurs, Occurs};
pub use qname::{QName, XSD_NAMESPACE};
pub use schema::XsdSchema;
pub use types::{
    ComplexType, ContentModel, Derivation, DerivationKind, Facets, SimpleType, SimpleVariety,
    TypeRef, UnionType, XsdType,
};

use crate::error::ParseError;

/// Load a schema model dump from YAML and link it.
pub fn from_yaml(input: &str) -> Result<XsdSchema, ParseError> {
    let schema: XsdSchema = serde_yaml_ng::from_str(input)?;
    Ok(link(schema)?)
}

/// Load a schema model dump from JSON and link it.
pub fn from_json(input: &str) -> Result<XsdSchema, ParseError> {
    let schema: XsdSchema = serde_json::from_str(input)?;
    Ok(link(schema)?)
}
