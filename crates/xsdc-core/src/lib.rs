pub mod config;
pub mod error;
pub mod json_schema;
pub mod model;
pub mod transform;
