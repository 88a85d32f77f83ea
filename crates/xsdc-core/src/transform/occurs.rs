use crate::json_schema::{Schema, SchemaOrRef, SchemaType};
use crate::model::Occurs;

/// Wrap `item` in an array fragment when `occurs` allows more than one
/// occurrence; return it unchanged otherwise.
///
/// `minItems` is always present (the minimum, possibly 0); `maxItems` only
/// when the maximum is bounded.
pub fn wrap_occurs(item: SchemaOrRef, occurs: Occurs) -> SchemaOrRef {
    if !occurs.is_repeatable() {
        return item;
    }
    Schema {
        items: Some(Box::new(item)),
        min_items: Some(u64::from(occurs.min)),
        max_items: occurs.max.bound().map(u64::from),
        ..Schema::of_type(SchemaType::Array)
    }
    .into()
}
