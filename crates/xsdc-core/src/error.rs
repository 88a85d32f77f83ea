use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to link schema model: {0}")]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unresolved type reference: {0}")]
    UnresolvedType(String),

    #[error("unresolved group reference: {0}")]
    UnresolvedGroup(String),

    #[error("unresolved element reference: {0}")]
    UnresolvedElement(String),

    #[error("circular base type chain detected at: {0}")]
    CircularBase(String),

    #[error("element declared without a name or ref in {0}")]
    MissingName(String),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("unexpected group model '{model}' in group {group}")]
    UnexpectedGroupModel { group: String, model: String },

    #[error("unexpected nested schema for group {group}")]
    UnexpectedNestedSchema { group: String },
}
