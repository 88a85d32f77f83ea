use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::warn;

use crate::json_schema::{Schema, SchemaOrRef};
use crate::model::QName;

use super::warning::{ConversionWarning, WarningKind};

/// Mutable state of one conversion run, threaded through every converter.
#[derive(Debug, Default)]
pub(crate) struct ConversionContext {
    definitions: IndexMap<String, Schema>,
    /// Named types and groups that are converted or being converted.
    visited: HashSet<QName>,
    /// Which qualified name currently owns each definitions slot.
    owners: HashMap<String, QName>,
    /// Element references currently being expanded through anonymous types.
    open_elements: HashSet<QName>,
    warnings: Vec<ConversionWarning>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visited(&self, name: &QName) -> bool {
        self.visited.contains(name)
    }

    /// Mark `name` as visited. Returns `false` if it already was.
    pub fn mark_visited(&mut self, name: &QName) -> bool {
        self.visited.insert(name.clone())
    }

    pub fn definition(&self, key: &str) -> Option<&Schema> {
        self.definitions.get(key)
    }

    /// Store `schema` under the local name of `name` and return a reference
    /// to it.
    pub fn define(&mut self, name: &QName, schema: Schema) -> SchemaOrRef {
        let key = name.local_name().to_string();
        if let Some(owner) = self.owners.insert(key.clone(), name.clone()) {
            if &owner != name {
                let message = format!("replaces the definition of {owner} under '{key}'");
                self.warn(WarningKind::DefinitionCollision, name.to_string(), message);
            }
        }
        self.definitions.insert(key.clone(), schema);
        SchemaOrRef::definition(&key)
    }

    /// Returns `false` if `element` is already being expanded.
    pub fn enter_element(&mut self, element: &QName) -> bool {
        self.open_elements.insert(element.clone())
    }

    pub fn leave_element(&mut self, element: &QName) {
        self.open_elements.remove(element);
    }

    /// Record a warning. A warning identical to one already recorded, as
    /// when a global simple type is converted at every use, is dropped.
    pub fn warn(&mut self, kind: WarningKind, subject: impl Into<String>, message: impl Into<String>) {
        let warning = ConversionWarning {
            kind,
            subject: subject.into(),
            message: message.into(),
        };
        if self.record(warning.clone()) {
            warn!("{warning}");
        }
    }

    /// Take over the warnings of a detached context. Its definitions are
    /// discarded.
    pub fn absorb_warnings(&mut self, other: ConversionContext) {
        for warning in other.warnings {
            self.record(warning);
        }
    }

    fn record(&mut self, warning: ConversionWarning) -> bool {
        if self.warnings.contains(&warning) {
            return false;
        }
        self.warnings.push(warning);
        true
    }

    pub fn into_parts(self) -> (IndexMap<String, Schema>, Vec<ConversionWarning>) {
        (self.definitions, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_schema::SchemaType;

    #[test]
    fn test_mark_visited_once() {
        let mut ctx = ConversionContext::new();
        let name = QName::local("Person");
        assert!(!ctx.is_visited(&name));
        assert!(ctx.mark_visited(&name));
        assert!(!ctx.mark_visited(&name));
        assert!(ctx.is_visited(&name));
    }

    #[test]
    fn test_define_returns_reference() {
        let mut ctx = ConversionContext::new();
        let reference = ctx.define(&QName::new(Some("urn:a"), "Person"), Schema::object());
        assert_eq!(reference, SchemaOrRef::definition("Person"));
        assert_eq!(ctx.definition("Person"), Some(&Schema::object()));
    }

    #[test]
    fn test_redefining_same_name_is_silent() {
        let mut ctx = ConversionContext::new();
        let name = QName::local("Person");
        ctx.define(&name, Schema::object());
        ctx.define(&name, Schema::of_type(SchemaType::String));
        let (definitions, warnings) = ctx.into_parts();
        assert_eq!(definitions.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_local_name_collision_warns() {
        let mut ctx = ConversionContext::new();
        ctx.define(&QName::new(Some("urn:a"), "Item"), Schema::object());
        ctx.define(&QName::new(Some("urn:b"), "Item"), Schema::object());
        let (definitions, warnings) = ctx.into_parts();
        assert_eq!(definitions.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::DefinitionCollision);
        assert_eq!(warnings[0].subject, "{urn:b}Item");
    }

    #[test]
    fn test_repeated_warning_is_recorded_once() {
        let mut ctx = ConversionContext::new();
        ctx.warn(WarningKind::UnknownSimpleType, "Codes", "list");
        ctx.warn(WarningKind::UnknownSimpleType, "Codes", "list");
        ctx.warn(WarningKind::UnsupportedFacet, "Codes", "minInclusive");

        let mut detached = ConversionContext::new();
        detached.warn(WarningKind::UnknownSimpleType, "Codes", "list");
        ctx.absorb_warnings(detached);

        let warnings = ctx.into_parts().1;
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].kind, WarningKind::UnknownSimpleType);
        assert_eq!(warnings[1].kind, WarningKind::UnsupportedFacet);
    }

    #[test]
    fn test_absorb_warnings_drops_definitions() {
        let mut ctx = ConversionContext::new();
        let mut detached = ConversionContext::new();
        detached.define(&QName::local("Scratch"), Schema::object());
        detached.warn(WarningKind::MalformedUnion, "U", "no member types");
        ctx.absorb_warnings(detached);
        let (definitions, warnings) = ctx.into_parts();
        assert!(definitions.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
