//! Domain layer: form fields, option lists, schemas and their stored shapes

pub mod field;
pub mod options;
pub mod schema;
pub mod document;
pub mod record;
