use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::json_schema::DRAFT_07;

/// Project configuration loaded from `.xsdc.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct XsdcConfig {
    /// Merge anonymous model groups into the enclosing object.
    pub flatten_anonymous: bool,
    pub extension: ExtensionMode,
    /// Value written to the document's `$schema` keyword.
    pub schema_uri: String,
    /// Appended to the model file's base name to form the default output path.
    pub output_suffix: String,
}

impl Default for XsdcConfig {
    fn default() -> Self {
        Self {
            flatten_anonymous: true,
            extension: ExtensionMode::Flatten,
            schema_uri: DRAFT_07.to_string(),
            output_suffix: "-jsonschema.json".to_string(),
        }
    }
}

/// How a complex type derived by extension relates to its base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionMode {
    /// Copy the base type's properties, required names and alternatives into
    /// the derived type.
    #[default]
    Flatten,
    /// Reference the base type through `allOf`.
    Compose,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".xsdc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<XsdcConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: XsdcConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# xsdc configuration
flatten_anonymous: true     # merge anonymous groups into their parent object
extension: flatten          # flatten | compose (compose = allOf with the base type)
schema_uri: "http://json-schema.org/draft-07/schema#"
output_suffix: -jsonschema.json
"#
}
