use log::debug;
use serde_json::{Number, Value};

use crate::json_schema::{Schema, SchemaType, TypeSet};
use crate::model::builtins::{is_any_simple_type, is_builtin};
use crate::model::{SimpleType, SimpleVariety};

use super::context::ConversionContext;
use super::warning::WarningKind;

/// JSON Schema type for an XML Schema built-in, by local name. Anything not
/// listed maps to `string`.
pub fn builtin_json_type(local_name: &str) -> SchemaType {
    match local_name {
        "boolean" => SchemaType::Boolean,
        "decimal" | "float" | "double" => SchemaType::Number,
        "integer" | "long" | "int" | "short" | "byte" | "unsignedByte" | "unsignedShort"
        | "unsignedInt" | "unsignedLong" | "positiveInteger" | "negativeInteger"
        | "nonNegativeInteger" | "nonPositiveInteger" => SchemaType::Integer,
        _ => SchemaType::String,
    }
}

/// Map a simple type and its facets to a leaf fragment.
pub(crate) fn convert_simple_type(ty: &SimpleType, ctx: &mut ConversionContext) -> Schema {
    if ty.name.as_ref().is_some_and(is_any_simple_type) {
        return Schema {
            schema_type: Some(TypeSet::Multiple(vec![
                SchemaType::String,
                SchemaType::Number,
                SchemaType::Boolean,
                SchemaType::Integer,
            ])),
            ..Schema::default()
        };
    }

    let subject = subject_of(ty);
    let primitive = match (&ty.variety, &ty.primitive) {
        (SimpleVariety::Atomic, Some(primitive)) => primitive,
        (SimpleVariety::List, _) => {
            ctx.warn(
                WarningKind::UnknownSimpleType,
                subject,
                "list types are not supported, emitting a plain string",
            );
            return Schema::of_type(SchemaType::String);
        }
        (_, None) => {
            ctx.warn(
                WarningKind::UnknownSimpleType,
                subject,
                "no built-in base type, emitting a plain string",
            );
            return Schema::of_type(SchemaType::String);
        }
    };

    let json_type = if is_builtin(primitive) {
        builtin_json_type(primitive.local_name())
    } else {
        SchemaType::String
    };
    let mut schema = Schema::of_type(json_type);

    for value in &ty.enumeration {
        if !schema.enum_values.contains(value) {
            schema.enum_values.push(value.clone());
        }
    }

    if let Some((first, rest)) = ty.patterns.split_first() {
        schema.pattern = Some(first.clone());
        if !rest.is_empty() {
            debug!("{subject}: only the first of {} patterns is kept", ty.patterns.len());
        }
    }

    let facets = &ty.facets;
    if let Some(length) = facets.length {
        schema.min_length = Some(length);
        schema.max_length = Some(length);
    }
    if let Some(min_length) = facets.min_length {
        schema.min_length = Some(min_length);
    }
    if let Some(max_length) = facets.max_length {
        schema.max_length = Some(max_length);
    }
    // Lossy: digit count approximated as string length.
    if let Some(total_digits) = facets.total_digits {
        schema.max_length = Some(total_digits);
    }

    if let Some(bound) = &facets.min_inclusive {
        schema.minimum = numeric_bound(bound, "minInclusive", &subject, ctx);
    }
    if let Some(bound) = &facets.max_inclusive {
        schema.maximum = numeric_bound(bound, "maxInclusive", &subject, ctx);
    }

    for (facet, present) in [
        ("minExclusive", facets.min_exclusive.is_some()),
        ("maxExclusive", facets.max_exclusive.is_some()),
        ("fractionDigits", facets.fraction_digits.is_some()),
    ] {
        if present {
            debug!("{subject}: facet {facet} has no draft-07 counterpart, dropped");
        }
    }

    schema
}

fn subject_of(ty: &SimpleType) -> String {
    ty.name
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "anonymous simple type".to_string())
}

/// A facet value as a JSON number. Numeric strings are accepted; anything
/// else (dates, durations) is dropped with a warning.
fn numeric_bound(
    value: &Value,
    facet: &str,
    subject: &str,
    ctx: &mut ConversionContext,
) -> Option<Number> {
    let number = match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    };
    if number.is_none() {
        ctx.warn(
            WarningKind::UnsupportedFacet,
            subject,
            format!("{facet} value {value} is not numeric, dropped"),
        );
    }
    number
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(Number::from(n));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}
