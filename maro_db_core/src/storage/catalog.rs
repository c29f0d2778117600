use std::collections::HashMap;

use tracing::error;

use crate::error::{CatalogError, DdlError};
use crate::storage::schema::TableDefinition;

mod persistence;

/// Committed table definitions, keyed by table name.
///
/// Reads are public; the only write path is [`Catalog::register`], which is
/// reserved for the schema mutator.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<String, TableDefinition>,
}

impl Catalog {
    /// Creates a new empty catalog
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Checks if a table exists in the catalog
    pub fn exists(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Retrieves the definition of a committed table
    pub fn get(&self, table: &str) -> Result<&TableDefinition, CatalogError> {
        self.tables
            .get(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDefinition> {
        self.tables.values()
    }

    /// Names of committed tables with a foreign key targeting `table`, sorted.
    pub fn referencing(&self, table: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .tables
            .values()
            .filter(|t| t.references(table))
            .map(|t| t.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Inserts a definition that already passed validation.
    ///
    /// A name collision here means validation was skipped or raced, so it is
    /// reported as an invariant violation rather than a user error.
    pub(crate) fn register(&mut self, definition: TableDefinition) -> Result<(), DdlError> {
        if self.exists(&definition.name) {
            error!(table = %definition.name, "catalog register called for an existing table");
            return Err(DdlError::DuplicateRegistration {
                table: definition.name,
            });
        }
        self.tables.insert(definition.name.clone(), definition);
        Ok(())
    }
}
