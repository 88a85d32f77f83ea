use crate::config::ExtensionMode;
use crate::error::ConvertError;
use crate::json_schema::{Schema, SchemaOrRef};
use crate::model::{
    AttributeDecl, AttributeUse, ComplexType, ContentModel, QName, TypeRef, XsdGroup, XsdType,
};

use super::Converter;
use super::context::ConversionContext;
use super::group::ANONYMOUS_GROUP;
use super::members::{ObjectMembers, Property};
use super::occurs::wrap_occurs;
use super::warning::WarningKind;

/// Property key for an attribute wildcard.
const ANY_ATTRIBUTE: &str = "anyAttribute";

impl Converter<'_> {
    /// Convert a complex type. Named types are stored in the definitions
    /// table and come back as a `$ref`; a repeat encounter returns the `$ref`
    /// without descending, which is what stops recursive types.
    pub(super) fn convert_complex(
        &self,
        ty: &ComplexType,
        ctx: &mut ConversionContext,
    ) -> Result<SchemaOrRef, ConvertError> {
        if let Some(name) = &ty.name {
            if !ctx.mark_visited(name) {
                return Ok(SchemaOrRef::definition(name.local_name()));
            }
        }

        let mut members = ObjectMembers::default();
        let mut lineage: Vec<QName> = ty.name.iter().cloned().collect();
        self.collect_members(ty, &mut lineage, &mut members, ctx)?;

        let schema = members.finish();
        Ok(match &ty.name {
            Some(name) => ctx.define(name, schema),
            None => schema.into(),
        })
    }

    /// Add the members `ty` declares: inherited ones first, then its
    /// attributes, then its content group. `lineage` holds the named types
    /// already on the extension chain.
    fn collect_members(
        &self,
        ty: &ComplexType,
        lineage: &mut Vec<QName>,
        members: &mut ObjectMembers,
        ctx: &mut ConversionContext,
    ) -> Result<(), ConvertError> {
        let subject = ty
            .name
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "anonymous complex type".to_string());

        if let Some(base) = ty.extension_base() {
            self.extend(base, &subject, lineage, members, ctx)?;
        }

        for decl in &ty.attributes {
            match decl {
                AttributeDecl::AnyAttribute(_) => {
                    members.insert(ANY_ATTRIBUTE, Schema::permissive_object().into())
                }
                AttributeDecl::Attribute(attribute) if attribute.usage == AttributeUse::Prohibited => {}
                AttributeDecl::Attribute(attribute) => members.push(Property {
                    name: attribute.name.local_name().to_string(),
                    schema: self.convert_attribute(attribute, ctx)?.into(),
                    required: attribute.usage == AttributeUse::Required,
                }),
            }
        }

        match &ty.content {
            Some(ContentModel::Group(group)) => self.merge_content(group, members, ctx)?,
            Some(ContentModel::Simple(_)) => ctx.warn(
                WarningKind::UnexpectedContent,
                subject,
                "simple content is not converted, no properties added",
            ),
            None => {}
        }
        Ok(())
    }

    /// Compose mode references the base through `allOf`. Flatten mode copies
    /// the base's members from the source model, so the result does not
    /// depend on whether the base definition is finished yet.
    fn extend(
        &self,
        base: &TypeRef,
        subject: &str,
        lineage: &mut Vec<QName>,
        members: &mut ObjectMembers,
        ctx: &mut ConversionContext,
    ) -> Result<(), ConvertError> {
        let converted = self.convert_type_ref(base, ctx)?;
        if self.options.extension == ExtensionMode::Compose {
            members.compose(converted);
            return Ok(());
        }

        let XsdType::Complex(base_type) = self.resolve_type(base)? else {
            return Ok(());
        };
        if let Some(name) = &base_type.name {
            if lineage.contains(name) {
                ctx.warn(
                    WarningKind::CircularExtension,
                    subject,
                    format!("extension chain loops back to {name}, its members are copied once"),
                );
                return Ok(());
            }
            lineage.push(name.clone());
        }
        self.collect_members(base_type, lineage, members, ctx)
    }

    /// Attach the complex content group: merged into the type when it is
    /// anonymous and flattening is on, kept as its own property otherwise.
    fn merge_content(
        &self,
        group: &XsdGroup,
        members: &mut ObjectMembers,
        ctx: &mut ConversionContext,
    ) -> Result<(), ConvertError> {
        let converted = self.convert_group(group, ctx)?;
        let name = group.effective_name();
        match converted {
            SchemaOrRef::Schema(schema) if name.is_none() && self.options.flatten_anonymous => {
                members.absorb(*schema);
            }
            converted => {
                let occurs = group.occurs();
                members.push(Property {
                    name: name
                        .map(|name| name.local_name().to_string())
                        .unwrap_or_else(|| ANONYMOUS_GROUP.to_string()),
                    schema: wrap_occurs(converted, occurs),
                    required: occurs.is_required(),
                });
            }
        }
        Ok(())
    }
}
