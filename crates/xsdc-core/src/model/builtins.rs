use super::attribute::{AnyAttribute, AttributeDecl};
use super::group::{AnyElement, GroupChild, ModelKind, XsdGroup};
use super::occurs::MaxOccurs;
use super::qname::QName;
use super::types::{ComplexType, ContentModel, SimpleType, SimpleVariety, XsdType};

/// Local names of the XML Schema built-in datatypes.
const BUILTIN_NAMES: &[&str] = &[
    "anyType",
    "anySimpleType",
    "anyAtomicType",
    "string",
    "normalizedString",
    "token",
    "language",
    "Name",
    "NCName",
    "ID",
    "IDREF",
    "IDREFS",
    "ENTITY",
    "ENTITIES",
    "NMTOKEN",
    "NMTOKENS",
    "boolean",
    "decimal",
    "integer",
    "nonPositiveInteger",
    "negativeInteger",
    "long",
    "int",
    "short",
    "byte",
    "nonNegativeInteger",
    "unsignedLong",
    "unsignedInt",
    "unsignedShort",
    "unsignedByte",
    "positiveInteger",
    "float",
    "double",
    "duration",
    "dayTimeDuration",
    "yearMonthDuration",
    "dateTime",
    "dateTimeStamp",
    "time",
    "date",
    "gYearMonth",
    "gYear",
    "gMonthDay",
    "gDay",
    "gMonth",
    "hexBinary",
    "base64Binary",
    "anyURI",
    "QName",
    "NOTATION",
];

/// Built-ins whose variety is list rather than atomic.
const LIST_BUILTINS: &[&str] = &["IDREFS", "ENTITIES", "NMTOKENS"];

pub fn is_builtin(name: &QName) -> bool {
    name.is_xsd() && BUILTIN_NAMES.contains(&name.local_name())
}

pub fn is_any_simple_type(name: &QName) -> bool {
    name.is_xsd() && name.local_name() == "anySimpleType"
}

/// The built-in a type named `name` contributes as a primitive, if any.
pub fn builtin_primitive(name: &QName) -> Option<QName> {
    if !is_builtin(name) || name.local_name() == "anyType" {
        return None;
    }
    if LIST_BUILTINS.contains(&name.local_name()) {
        return None;
    }
    Some(name.clone())
}

/// Materialize the definition of a built-in type.
pub fn builtin_type(name: &QName) -> Option<XsdType> {
    if !is_builtin(name) {
        return None;
    }
    if name.local_name() == "anyType" {
        return Some(any_type());
    }
    let variety = if LIST_BUILTINS.contains(&name.local_name()) {
        SimpleVariety::List
    } else {
        SimpleVariety::Atomic
    };
    Some(XsdType::Simple(SimpleType {
        name: Some(name.clone()),
        primitive: builtin_primitive(name),
        variety,
        ..SimpleType::default()
    }))
}

/// The ur-type: any attributes, any mixed element content.
fn any_type() -> XsdType {
    let wildcard = AnyElement {
        min_occurs: 0,
        max_occurs: MaxOccurs::Unbounded,
        ..AnyElement::default()
    };
    XsdType::Complex(ComplexType {
        name: Some(QName::xsd("anyType")),
        attributes: vec![AttributeDecl::AnyAttribute(AnyAttribute::default())],
        content: Some(ContentModel::Group(XsdGroup::new(
            ModelKind::Sequence,
            vec![GroupChild::Any(wildcard)],
        ))),
        derivation: None,
        mixed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_builtin() {
        assert!(is_builtin(&QName::xsd("string")));
        assert!(is_builtin(&QName::xsd("anyType")));
        assert!(!is_builtin(&QName::local("string")));
        assert!(!is_builtin(&QName::xsd("notAType")));
    }

    #[test]
    fn test_builtin_primitive_is_most_specific() {
        assert_eq!(
            builtin_primitive(&QName::xsd("int")),
            Some(QName::xsd("int"))
        );
        assert_eq!(builtin_primitive(&QName::xsd("anyType")), None);
        assert_eq!(builtin_primitive(&QName::xsd("NMTOKENS")), None);
    }

    #[test]
    fn test_list_builtin_has_list_variety() {
        match builtin_type(&QName::xsd("IDREFS")) {
            Some(XsdType::Simple(s)) => assert_eq!(s.variety, SimpleVariety::List),
            other => panic!("expected simple type, got {other:?}"),
        }
    }

    #[test]
    fn test_any_type_is_complex_wildcard() {
        match builtin_type(&QName::xsd("anyType")) {
            Some(XsdType::Complex(c)) => {
                assert_eq!(c.name, Some(QName::xsd("anyType")));
                assert_eq!(c.attributes.len(), 1);
                assert!(matches!(c.content, Some(ContentModel::Group(_))));
            }
            other => panic!("expected complex type, got {other:?}"),
        }
    }
}
