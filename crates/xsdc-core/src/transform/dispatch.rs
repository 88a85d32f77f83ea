use crate::error::{ConvertError, ResolveError};
use crate::json_schema::{Schema, SchemaOrRef};
use crate::model::{Occurs, QName, TypeRef, XsdElement, XsdType};

use super::Converter;
use super::context::ConversionContext;
use super::facets::convert_simple_type;
use super::members::Property;
use super::occurs::wrap_occurs;
use super::warning::WarningKind;

impl Converter<'_> {
    pub(super) fn convert_type(
        &self,
        ty: &XsdType,
        ctx: &mut ConversionContext,
    ) -> Result<SchemaOrRef, ConvertError> {
        match ty {
            XsdType::Union(union) => Ok(self.convert_union(union, ctx)?.into()),
            XsdType::Simple(simple) => Ok(convert_simple_type(simple, ctx).into()),
            XsdType::Complex(complex) => self.convert_complex(complex, ctx),
        }
    }

    pub(super) fn convert_type_ref(
        &self,
        type_ref: &TypeRef,
        ctx: &mut ConversionContext,
    ) -> Result<SchemaOrRef, ConvertError> {
        let ty = self.resolve_type(type_ref)?;
        self.convert_type(ty, ctx)
    }

    pub(super) fn resolve_type<'t>(
        &'t self,
        type_ref: &'t TypeRef,
    ) -> Result<&'t XsdType, ConvertError> {
        match type_ref {
            TypeRef::Named(name) => self
                .schema
                .lookup_type(name)
                .ok_or_else(|| ResolveError::UnresolvedType(name.to_string()).into()),
            TypeRef::Inline(ty) => Ok(&**ty),
        }
    }

    /// Property for an element particle. References take the name and type
    /// of the global declaration and the occurs bounds of the particle.
    pub(super) fn convert_element(
        &self,
        element: &XsdElement,
        ctx: &mut ConversionContext,
    ) -> Result<Property, ConvertError> {
        match &element.reference {
            Some(reference) => {
                let declaration = self
                    .schema
                    .lookup_element(reference)
                    .ok_or_else(|| ResolveError::UnresolvedElement(reference.to_string()))?;
                self.convert_declaration(Some(reference), declaration, element.occurs(), ctx)
            }
            None => self.convert_declaration(None, element, element.occurs(), ctx),
        }
    }

    pub(super) fn convert_global_element(
        &self,
        qname: &QName,
        element: &XsdElement,
        ctx: &mut ConversionContext,
    ) -> Result<Property, ConvertError> {
        match &element.reference {
            Some(_) => self.convert_element(element, ctx),
            None => self.convert_declaration(Some(qname), element, element.occurs(), ctx),
        }
    }

    fn convert_declaration(
        &self,
        global: Option<&QName>,
        declaration: &XsdElement,
        occurs: Occurs,
        ctx: &mut ConversionContext,
    ) -> Result<Property, ConvertError> {
        let name = declaration
            .name
            .as_ref()
            .or(global)
            .ok_or_else(|| ResolveError::MissingName("a model group".to_string()))?
            .local_name()
            .to_string();

        // Named types stop recursion on their own; anonymous ones are guarded
        // by the global element they belong to.
        let guard = global.filter(|_| matches!(declaration.type_ref, TypeRef::Inline(_)));
        let item = match guard {
            Some(element) if !ctx.enter_element(element) => {
                ctx.warn(
                    WarningKind::RecursiveElement,
                    element.to_string(),
                    "element contains itself through an anonymous type, nested occurrence left open",
                );
                Schema::permissive_object().into()
            }
            Some(element) => {
                let item = self.convert_type_ref(&declaration.type_ref, ctx);
                ctx.leave_element(element);
                item?
            }
            None => self.convert_type_ref(&declaration.type_ref, ctx)?,
        };

        Ok(Property {
            name,
            schema: wrap_occurs(item, occurs),
            required: occurs.is_required(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ConvertOptions, Converter};
    use super::*;
    use crate::model;
    use serde_json::json;

    const SCHEMA: &str = r#"
types:
  Name:
    kind: simple
    base: "xs:string"
    facets: { maxLength: 64 }
elements:
  title:
    type: Name
  node:
    type:
      kind: complex
      content:
        group:
          children:
            - element: { name: label, type: "xs:string" }
            - element: { ref: node, min_occurs: 0, max_occurs: unbounded }
"#;

    fn with_converter<T>(f: impl FnOnce(&Converter<'_>, &mut ConversionContext) -> T) -> T {
        let schema = model::from_yaml(SCHEMA).unwrap();
        let options = ConvertOptions::default();
        let converter = Converter {
            schema: &schema,
            options: &options,
        };
        let mut ctx = ConversionContext::new();
        f(&converter, &mut ctx)
    }

    #[test]
    fn test_simple_named_type_is_inlined() {
        let value = with_converter(|converter, ctx| {
            let fragment = converter
                .convert_type_ref(&TypeRef::Named(QName::local("Name")), ctx)
                .unwrap();
            serde_json::to_value(fragment).unwrap()
        });
        assert_eq!(value, json!({ "type": "string", "maxLength": 64 }));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let err = with_converter(|converter, ctx| {
            converter
                .convert_type_ref(&TypeRef::Named(QName::local("Missing")), ctx)
                .unwrap_err()
        });
        assert!(matches!(
            err,
            ConvertError::Resolve(ResolveError::UnresolvedType(_))
        ));
    }

    #[test]
    fn test_element_reference_uses_particle_occurs() {
        let property = with_converter(|converter, ctx| {
            let particle = XsdElement {
                name: None,
                reference: Some(QName::local("title")),
                type_ref: TypeRef::any_type(),
                min_occurs: 1,
                max_occurs: model::MaxOccurs::Unbounded,
            };
            converter.convert_element(&particle, ctx).unwrap()
        });
        assert_eq!(property.name, "title");
        assert!(property.required);
        assert_eq!(
            serde_json::to_value(property.schema).unwrap(),
            json!({
                "type": "array",
                "items": { "type": "string", "maxLength": 64 },
                "minItems": 1
            })
        );
    }

    #[test]
    fn test_recursive_anonymous_element_terminates() {
        let (property, warnings) = with_converter(|converter, ctx| {
            let schema = converter.schema;
            let qname = QName::local("node");
            let property = converter
                .convert_global_element(&qname, &schema.elements[&qname], ctx)
                .unwrap();
            let warnings = std::mem::take(ctx).into_parts().1;
            (property, warnings)
        });
        assert_eq!(
            serde_json::to_value(property.schema).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "label": { "type": "string" },
                    "node": {
                        "type": "array",
                        "items": { "type": "object", "additionalProperties": true },
                        "minItems": 0
                    }
                },
                "required": ["label"]
            })
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::RecursiveElement);
    }
}
