pub mod schema;
pub mod catalog;

// Re-export main types for convenience
pub use schema::{Column, ForeignKey, PrimaryKey, TableDefinition};
pub use catalog::Catalog;
