use crate::error::ConvertError;
use crate::json_schema::{Schema, SchemaType};
use crate::model::{XsdAttribute, XsdType};

use super::Converter;
use super::context::ConversionContext;
use super::facets::convert_simple_type;

impl Converter<'_> {
    /// Fragment for a named attribute. A `fixed` value becomes `const`.
    pub(super) fn convert_attribute(
        &self,
        attribute: &XsdAttribute,
        ctx: &mut ConversionContext,
    ) -> Result<Schema, ConvertError> {
        let mut schema = match self.resolve_type(&attribute.type_ref)? {
            XsdType::Simple(simple) => convert_simple_type(simple, ctx),
            XsdType::Union(union) => self.convert_union(union, ctx)?,
            XsdType::Complex(_) => Schema::of_type(SchemaType::String),
        };
        if let Some(fixed) = &attribute.fixed {
            schema.const_value = Some(fixed.clone());
        }
        Ok(schema)
    }
}
