use crate::error::ConvertError;
use crate::json_schema::{Schema, SchemaType, TypeSet};
use crate::model::UnionType;

use super::Converter;
use super::context::ConversionContext;
use super::warning::WarningKind;

impl Converter<'_> {
    /// `{anyOf: [...]}` with one inline fragment per member type.
    ///
    /// Each member is converted in its own detached context so union branches
    /// never land in the shared definitions table; only their warnings are
    /// carried over.
    pub(super) fn convert_union(
        &self,
        union: &UnionType,
        ctx: &mut ConversionContext,
    ) -> Result<Schema, ConvertError> {
        let Some(members) = &union.member_types else {
            let subject = union
                .name
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "anonymous union".to_string());
            ctx.warn(
                WarningKind::MalformedUnion,
                subject,
                "union has no member types, emitting its name as the type",
            );
            let schema_type = match &union.name {
                Some(name) => TypeSet::Named(name.to_string()),
                None => TypeSet::Single(SchemaType::String),
            };
            return Ok(Schema {
                schema_type: Some(schema_type),
                ..Schema::default()
            });
        };

        let mut any_of = Vec::with_capacity(members.len());
        for member in members {
            let mut detached = ConversionContext::new();
            let fragment = self.convert_type_ref(member, &mut detached)?;
            ctx.absorb_warnings(detached);
            any_of.push(fragment);
        }
        Ok(Schema {
            any_of,
            ..Schema::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ConvertOptions, Converter};
    use super::*;
    use crate::model::{self, QName, XsdType};
    use serde_json::json;

    const SCHEMA: &str = r#"
types:
  Code:
    kind: simple
    base: "xs:string"
    enumeration: [A, B]
  CodeOrNumber:
    kind: union
    member_types:
      - Code
      - "xs:int"
      - kind: simple
        variety: list
  Broken:
    kind: union
"#;

    fn convert_named(name: &str) -> (serde_json::Value, ConversionContext) {
        let schema = model::from_yaml(SCHEMA).unwrap();
        let options = ConvertOptions::default();
        let converter = Converter {
            schema: &schema,
            options: &options,
        };
        let mut ctx = ConversionContext::new();
        let union = match schema.lookup_type(&QName::local(name)) {
            Some(XsdType::Union(u)) => u,
            other => panic!("expected union, got {other:?}"),
        };
        let value = serde_json::to_value(converter.convert_union(union, &mut ctx).unwrap()).unwrap();
        (value, ctx)
    }

    #[test]
    fn test_members_become_any_of() {
        let (value, ctx) = convert_named("CodeOrNumber");
        assert_eq!(
            value,
            json!({
                "anyOf": [
                    { "type": "string", "enum": ["A", "B"] },
                    { "type": "integer" },
                    { "type": "string" }
                ]
            })
        );
        let (definitions, warnings) = ctx.into_parts();
        assert!(definitions.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnknownSimpleType);
    }

    #[test]
    fn test_missing_members_fall_back_to_name() {
        let (value, ctx) = convert_named("Broken");
        assert_eq!(value, json!({ "type": "Broken" }));
        assert_eq!(ctx.into_parts().1[0].kind, WarningKind::MalformedUnion);
    }
}
