use indexmap::IndexMap;

use crate::json_schema::{Schema, SchemaOrRef};

/// A named member of an object fragment.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Property {
    pub name: String,
    pub schema: SchemaOrRef,
    pub required: bool,
}

/// Properties, required names and alternatives collected for one object
/// fragment before it is finished.
#[derive(Debug, Default)]
pub(crate) struct ObjectMembers {
    properties: IndexMap<String, SchemaOrRef>,
    required: Vec<String>,
    one_of: Vec<SchemaOrRef>,
    all_of: Vec<SchemaOrRef>,
}

impl ObjectMembers {
    pub fn push(&mut self, property: Property) {
        if property.required {
            self.required.push(property.name.clone());
        }
        self.properties.insert(property.name, property.schema);
    }

    /// Add an optional property.
    pub fn insert(&mut self, name: impl Into<String>, schema: SchemaOrRef) {
        self.properties.insert(name.into(), schema);
    }

    pub fn compose(&mut self, base: SchemaOrRef) {
        self.all_of.push(base);
    }

    pub fn alternative(&mut self, alternative: SchemaOrRef) {
        self.one_of.push(alternative);
    }

    pub fn has_alternatives(&self) -> bool {
        !self.one_of.is_empty()
    }

    /// Merge the properties, required names and alternatives of `schema`.
    pub fn absorb(&mut self, schema: Schema) {
        self.properties.extend(schema.properties.into_iter().flatten());
        self.required.extend(schema.required);
        self.one_of.extend(schema.one_of);
    }

    /// `base`, or `base` with a numeric suffix if that property is taken.
    pub fn vacant_key(&self, base: &str) -> String {
        if !self.properties.contains_key(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}{n}"))
            .find(|key| !self.properties.contains_key(key))
            .unwrap_or_else(|| base.to_string())
    }

    /// Properties and the sorted, deduplicated required list.
    pub fn into_parts(self) -> (IndexMap<String, SchemaOrRef>, Vec<String>) {
        (self.properties, sorted_unique(self.required))
    }

    /// The finished `{type: object, ...}` fragment.
    pub fn finish(self) -> Schema {
        Schema {
            properties: Some(self.properties),
            required: sorted_unique(self.required),
            one_of: self.one_of,
            all_of: self.all_of,
            ..Schema::object()
        }
    }
}

fn sorted_unique(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names.dedup();
    names
}
