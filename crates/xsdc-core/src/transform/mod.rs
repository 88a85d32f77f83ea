mod assembler;
mod attribute;
mod complex;
mod context;
mod dispatch;
mod facets;
mod group;
mod members;
mod occurs;
mod union;
pub mod warning;

pub use assembler::{Conversion, ConvertOptions, convert, convert_with_options};
pub use facets::builtin_json_type;
pub use occurs::wrap_occurs;
pub use warning::{ConversionWarning, WarningKind};

use crate::model::XsdSchema;

/// The recursive converter. Read-only state for one run; everything that
/// changes during traversal lives in the `ConversionContext` passed along.
struct Converter<'a> {
    schema: &'a XsdSchema,
    options: &'a ConvertOptions,
}
