use xsdc_core::error::{ParseError, ResolveError};
use xsdc_core::model::{
    self, AttributeDecl, AttributeUse, ContentModel, GroupChild, MaxOccurs, QName, TypeRef,
    XsdType,
};

const PERSON_YAML: &str = include_str!("fixtures/person.yaml");
const PERSON_JSON: &str = include_str!("fixtures/person.json");
const ORDERS: &str = include_str!("fixtures/orders.yaml");

fn orders(local: &str) -> QName {
    QName::new(Some("urn:example:orders"), local)
}

#[test]
fn parse_person_yaml() {
    let schema = model::from_yaml(PERSON_YAML).expect("should parse person.yaml");
    assert_eq!(
        schema.target_namespace.as_deref(),
        Some("http://example.com/person")
    );
    let person = QName::new(Some("http://example.com/person"), "Person");
    let ty = match schema.lookup_type(&person) {
        Some(XsdType::Complex(c)) => c,
        other => panic!("expected complex type, got {other:?}"),
    };
    assert_eq!(ty.name.as_ref(), Some(&person));
    match &ty.attributes[0] {
        AttributeDecl::Attribute(attr) => {
            assert_eq!(attr.name, QName::local("id"));
            assert_eq!(attr.usage, AttributeUse::Required);
        }
        other => panic!("expected attribute, got {other:?}"),
    }
    let group = match &ty.content {
        Some(ContentModel::Group(g)) => g,
        other => panic!("expected group content, got {other:?}"),
    };
    match &group.children[1] {
        GroupChild::Element(tag) => {
            assert_eq!(tag.min_occurs, 0);
            assert_eq!(tag.max_occurs, MaxOccurs::Unbounded);
        }
        other => panic!("expected element, got {other:?}"),
    }
}

#[test]
fn yaml_and_json_dumps_agree() {
    let from_yaml = model::from_yaml(PERSON_YAML).unwrap();
    let from_json = model::from_json(PERSON_JSON).unwrap();
    assert_eq!(from_yaml, from_json);
}

#[test]
fn parse_orders_yaml() {
    let schema = model::from_yaml(ORDERS).expect("should parse orders.yaml");
    assert_eq!(schema.types.len(), 7);
    assert_eq!(schema.groups.len(), 1);
    assert_eq!(schema.elements.len(), 2);

    match schema.lookup_type(&orders("Quantity")) {
        Some(XsdType::Simple(s)) => {
            assert_eq!(s.primitive, Some(QName::xsd("positiveInteger")));
        }
        other => panic!("expected simple type, got {other:?}"),
    }
    match schema.lookup_type(&orders("Amount")) {
        Some(XsdType::Union(u)) => {
            let members = u.member_types.as_ref().unwrap();
            assert_eq!(members[0], TypeRef::Named(QName::xsd("decimal")));
        }
        other => panic!("expected union, got {other:?}"),
    }
    let contact = schema.lookup_group(&orders("Contact")).unwrap();
    assert_eq!(contact.name, Some(orders("Contact")));
    assert!(schema.lookup_type(&QName::xsd("boolean")).is_some());
}

#[test]
fn unresolved_reference_fails_to_load() {
    let yaml = r#"
elements:
  order:
    type: "{urn:example:orders}Missing"
"#;
    let err = model::from_yaml(yaml).unwrap_err();
    match err {
        ParseError::Resolve(ResolveError::UnresolvedType(name)) => {
            assert_eq!(name, "{urn:example:orders}Missing");
        }
        other => panic!("expected unresolved type, got {other}"),
    }
}

#[test]
fn invalid_max_occurs_fails_to_load() {
    let yaml = r#"
elements:
  order:
    type: "xs:string"
    max_occurs: lots
"#;
    let err = model::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ParseError::Yaml(_)));
}
