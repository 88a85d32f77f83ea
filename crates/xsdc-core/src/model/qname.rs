use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Namespace of the XML Schema built-in datatypes.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// A qualified XML name.
///
/// Parsed from Clark notation (`{namespace}local`), from a bare local name, or
/// from the conventional `xs:` / `xsd:` prefixes for XML Schema built-ins. Any
/// other prefix is kept verbatim as part of the local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    namespace: Option<String>,
    local_name: String,
}

impl QName {
    pub fn new(namespace: Option<&str>, local_name: &str) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            local_name: local_name.to_string(),
        }
    }

    /// A name in no namespace.
    pub fn local(local_name: &str) -> Self {
        Self::new(None, local_name)
    }

    /// A name in the XML Schema namespace.
    pub fn xsd(local_name: &str) -> Self {
        Self::new(Some(XSD_NAMESPACE), local_name)
    }

    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix('{') {
            if let Some((namespace, local_name)) = rest.split_once('}') {
                return Self::new(Some(namespace), local_name);
            }
        }
        match raw.split_once(':') {
            Some(("xs" | "xsd", local_name)) => Self::xsd(local_name),
            _ => Self::local(raw),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn is_xsd(&self) -> bool {
        self.namespace() == Some(XSD_NAMESPACE)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{}}}{}", namespace, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

impl Serialize for QName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(QName::parse(&raw))
    }
}
