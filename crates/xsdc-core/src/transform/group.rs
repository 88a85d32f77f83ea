use crate::error::{ConvertError, ResolveError};
use crate::json_schema::{Schema, SchemaOrRef};
use crate::model::{GroupChild, ModelKind, XsdGroup};

use super::Converter;
use super::context::ConversionContext;
use super::members::{ObjectMembers, Property};
use super::occurs::wrap_occurs;
use super::warning::WarningKind;

/// Property key for a group nested without a name.
pub(crate) const ANONYMOUS_GROUP: &str = "AnonymousGroup";

/// Property key for an element wildcard.
const ANY_ELEMENT: &str = "any";

impl Converter<'_> {
    /// Convert a model group. Named groups are stored in the definitions table
    /// and come back as a `$ref`; anonymous groups come back inline.
    pub(super) fn convert_group(
        &self,
        group: &XsdGroup,
        ctx: &mut ConversionContext,
    ) -> Result<SchemaOrRef, ConvertError> {
        let group = self.resolve_group(group)?;
        if let Some(name) = &group.name {
            if !ctx.mark_visited(name) {
                return Ok(SchemaOrRef::definition(name.local_name()));
            }
        }

        let schema = match &group.model {
            ModelKind::Sequence | ModelKind::All => self.convert_sequence(group, ctx)?,
            ModelKind::Choice => self.convert_choice(group, ctx)?,
            ModelKind::Other(model) => {
                return Err(ConvertError::UnexpectedGroupModel {
                    group: group_label(group),
                    model: model.clone(),
                });
            }
        };

        Ok(match &group.name {
            Some(name) => ctx.define(name, schema),
            None => schema.into(),
        })
    }

    fn resolve_group<'g>(&'g self, group: &'g XsdGroup) -> Result<&'g XsdGroup, ConvertError> {
        match &group.reference {
            Some(reference) => self
                .schema
                .lookup_group(reference)
                .ok_or_else(|| ResolveError::UnresolvedGroup(reference.to_string()).into()),
            None => Ok(group),
        }
    }

    fn convert_sequence(
        &self,
        group: &XsdGroup,
        ctx: &mut ConversionContext,
    ) -> Result<Schema, ConvertError> {
        let mut members = ObjectMembers::default();
        for child in &group.children {
            match child {
                GroupChild::Element(element) => members.push(self.convert_element(element, ctx)?),
                GroupChild::Any(_) => members.insert(ANY_ELEMENT, Schema::permissive_object().into()),
                GroupChild::Group(nested) => match self.convert_group(nested, ctx)? {
                    SchemaOrRef::Schema(schema) => merge_nested(&mut members, nested, *schema, ctx),
                    reference => members.push(group_property(nested, reference)?),
                },
            }
        }
        Ok(members.finish())
    }

    /// `{type: object, properties: {}, oneOf: [...]}` with one object
    /// alternative per child.
    fn convert_choice(
        &self,
        group: &XsdGroup,
        ctx: &mut ConversionContext,
    ) -> Result<Schema, ConvertError> {
        let mut choice = ObjectMembers::default();
        for child in &group.children {
            let mut alternative = ObjectMembers::default();
            match child {
                GroupChild::Element(element) => {
                    alternative.push(self.convert_element(element, ctx)?)
                }
                GroupChild::Any(_) => {
                    alternative.insert(ANY_ELEMENT, Schema::permissive_object().into())
                }
                GroupChild::Group(nested) => match self.convert_group(nested, ctx)? {
                    SchemaOrRef::Schema(schema) => alternative.absorb(*schema),
                    reference => alternative.push(group_property(nested, reference)?),
                },
            }
            choice.alternative(alternative.finish().into());
        }
        Ok(choice.finish())
    }
}

/// Merge an inline nested group into a sequence. Two sets of alternatives
/// cannot be merged, so a conflicting group is kept as its own property.
fn merge_nested(
    members: &mut ObjectMembers,
    nested: &XsdGroup,
    schema: Schema,
    ctx: &mut ConversionContext,
) {
    if schema.one_of.is_empty() || !members.has_alternatives() {
        members.absorb(schema);
        return;
    }
    let base = nested
        .effective_name()
        .map(|name| name.local_name().to_string())
        .unwrap_or_else(|| ANONYMOUS_GROUP.to_string());
    let key = members.vacant_key(&base);
    ctx.warn(
        WarningKind::OneOfConflict,
        group_label(nested),
        format!("nested group alternatives conflict with the parent's, nested under '{key}'"),
    );
    members.insert(key, schema.into());
}

/// Property holding a reference to a named group, keyed by its local name.
fn group_property(nested: &XsdGroup, reference: SchemaOrRef) -> Result<Property, ConvertError> {
    let name = nested
        .effective_name()
        .ok_or_else(|| ConvertError::UnexpectedNestedSchema {
            group: group_label(nested),
        })?;
    let occurs = nested.occurs();
    Ok(Property {
        name: name.local_name().to_string(),
        schema: wrap_occurs(reference, occurs),
        required: occurs.is_required(),
    })
}

pub(crate) fn group_label(group: &XsdGroup) -> String {
    match group.effective_name() {
        Some(name) => name.to_string(),
        None => format!("anonymous {}", group.model),
    }
}
