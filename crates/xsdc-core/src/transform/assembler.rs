use log::{debug, info};
use serde::Serialize;

use crate::config::{ExtensionMode, XsdcConfig};
use crate::error::ConvertError;
use crate::json_schema::{DRAFT_07, JsonSchemaDocument};
use crate::model::XsdSchema;

use super::Converter;
use super::context::ConversionContext;
use super::members::ObjectMembers;
use super::warning::ConversionWarning;

/// Options controlling one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Merge anonymous content groups into the enclosing object instead of
    /// nesting them under `AnonymousGroup`.
    pub flatten_anonymous: bool,
    pub extension: ExtensionMode,
    pub schema_uri: String,
    pub title: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            flatten_anonymous: true,
            extension: ExtensionMode::default(),
            schema_uri: DRAFT_07.to_string(),
            title: "schema".to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn from_config(config: &XsdcConfig, title: impl Into<String>) -> Self {
        Self {
            flatten_anonymous: config.flatten_anonymous,
            extension: config.extension,
            schema_uri: config.schema_uri.clone(),
            title: title.into(),
        }
    }
}

/// The result of a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub document: JsonSchemaDocument,
    pub warnings: Vec<ConversionWarning>,
}

/// Convert a linked schema with default options.
pub fn convert(schema: &XsdSchema) -> Result<Conversion, ConvertError> {
    convert_with_options(schema, &ConvertOptions::default())
}

/// Convert a linked schema into a JSON Schema document.
pub fn convert_with_options(
    schema: &XsdSchema,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    info!(
        "converting '{}' (flatten_anonymous={}, extension={:?})",
        options.title, options.flatten_anonymous, options.extension
    );
    let converter = Converter { schema, options };
    let mut ctx = ConversionContext::new();

    // Phase 1: Global types into definitions
    for (qname, ty) in &schema.types {
        if ctx.is_visited(qname) {
            continue;
        }
        debug!("converting type {qname}");
        converter.convert_type(ty, &mut ctx)?;
    }

    // Phase 2: Global groups into definitions
    for (qname, group) in &schema.groups {
        if ctx.is_visited(qname) {
            continue;
        }
        debug!("converting group {qname}");
        converter.convert_group(group, &mut ctx)?;
    }

    // Phase 3: Global elements into top-level properties
    let mut members = ObjectMembers::default();
    for (qname, element) in &schema.elements {
        debug!("converting element {qname}");
        members.push(converter.convert_global_element(qname, element, &mut ctx)?);
    }

    let (properties, required) = members.into_parts();
    let (definitions, warnings) = ctx.into_parts();
    let mut document = JsonSchemaDocument::new(&options.schema_uri, &options.title);
    document.properties = properties;
    document.required = required;
    document.definitions = definitions;

    info!(
        "converted '{}': {} definitions, {} top-level properties, {} warnings",
        document.title,
        document.definitions.len(),
        document.properties.len(),
        warnings.len()
    );
    Ok(Conversion { document, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model;
    use serde_json::json;

    #[test]
    fn test_empty_schema() {
        let schema = model::from_yaml("{}").unwrap();
        let conversion = convert(&schema).unwrap();
        assert_eq!(
            serde_json::to_value(&conversion.document).unwrap(),
            json!({
                "$schema": DRAFT_07,
                "title": "schema",
                "type": "object",
                "properties": {},
                "definitions": {}
            })
        );
        assert!(conversion.warnings.is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let config = XsdcConfig {
            flatten_anonymous: false,
            extension: ExtensionMode::Compose,
            ..XsdcConfig::default()
        };
        let options = ConvertOptions::from_config(&config, "orders");
        assert!(!options.flatten_anonymous);
        assert_eq!(options.extension, ExtensionMode::Compose);
        assert_eq!(options.schema_uri, DRAFT_07);
        assert_eq!(options.title, "orders");
    }

    #[test]
    fn test_global_simple_types_are_not_definitions() {
        let schema = model::from_yaml(
            r#"
types:
  Code:
    kind: simple
    base: "xs:string"
elements:
  code:
    type: Code
    min_occurs: 0
"#,
        )
        .unwrap();
        let conversion = convert(&schema).unwrap();
        let doc = serde_json::to_value(&conversion.document).unwrap();
        assert_eq!(doc["definitions"], json!({}));
        assert_eq!(doc["properties"], json!({ "code": { "type": "string" } }));
        assert!(doc.get("required").is_none());
    }

    #[test]
    fn test_untyped_element_references_any_type() {
        let schema = model::from_yaml("elements:\n  free: {}\n").unwrap();
        let conversion = convert(&schema).unwrap();
        let doc = serde_json::to_value(&conversion.document).unwrap();
        assert_eq!(doc["properties"]["free"], json!({ "$ref": "#/definitions/anyType" }));
        assert_eq!(
            doc["definitions"]["anyType"],
            json!({
                "type": "object",
                "properties": {
                    "anyAttribute": { "type": "object", "additionalProperties": true },
                    "any": { "type": "object", "additionalProperties": true }
                }
            })
        );
        assert_eq!(doc["required"], json!(["free"]));
    }
}
