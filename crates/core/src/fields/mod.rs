//! Schedule column to template variable mapping.

pub mod mapper;
pub mod mapping;

pub use mapper::{MappedFields, map_fields};
pub use mapping::{COLUMN_MAPPING, ColumnMapping};
