use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::group::{XsdElement, XsdGroup};
use super::qname::QName;
use super::types::XsdType;

/// A loaded XSD schema: global types, groups and elements keyed by qualified
/// name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XsdSchema {
    pub target_namespace: Option<String>,
    pub types: IndexMap<QName, XsdType>,
    pub groups: IndexMap<QName, XsdGroup>,
    pub elements: IndexMap<QName, XsdElement>,
    /// Built-in types referenced by the schema, materialized by the linker.
    #[serde(skip)]
    pub(crate) builtins: IndexMap<QName, XsdType>,
}

impl XsdSchema {
    /// Look up a global or built-in type.
    pub fn lookup_type(&self, name: &QName) -> Option<&XsdType> {
        self.types.get(name).or_else(|| self.builtins.get(name))
    }

    pub fn lookup_group(&self, name: &QName) -> Option<&XsdGroup> {
        self.groups.get(name)
    }

    pub fn lookup_element(&self, name: &QName) -> Option<&XsdElement> {
        self.elements.get(name)
    }
}
