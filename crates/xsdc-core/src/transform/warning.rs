use std::fmt;

use serde::{Deserialize, Serialize};

/// A recoverable condition met during conversion. The affected construct is
/// emitted as a fallback fragment and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionWarning {
    pub kind: WarningKind,
    /// The construct the warning is about, usually a qualified name.
    pub subject: String,
    pub message: String,
}

/// Classification of conversion warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A union without member-type information.
    MalformedUnion,
    /// A simple type without primitive information, such as a list type.
    UnknownSimpleType,
    /// A facet whose value has no JSON Schema counterpart.
    UnsupportedFacet,
    /// A content-model node the converter does not translate.
    UnexpectedContent,
    /// A nested group's alternatives could not be merged into its parent.
    OneOfConflict,
    /// Two qualified names share a local name and the same definitions slot.
    DefinitionCollision,
    /// A complex type whose extension chain leads back to itself.
    CircularExtension,
    /// An element that contains itself through an anonymous type.
    RecursiveElement,
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}
