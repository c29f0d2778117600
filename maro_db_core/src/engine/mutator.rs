//! The single writer of the catalog.

use tracing::info;

use crate::config::DdlConfig;
use crate::engine::validator::{ConstraintValidator, ValidatedTable};
use crate::error::{BatchError, DdlError};
use crate::storage::catalog::Catalog;
use crate::storage::schema::TableDefinition;

pub struct SchemaMutator<'a> {
    catalog: &'a mut Catalog,
    config: &'a DdlConfig,
}

impl<'a> SchemaMutator<'a> {
    pub fn new(catalog: &'a mut Catalog, config: &'a DdlConfig) -> Self {
        Self { catalog, config }
    }

    /// Registers a validated definition. Returns the committed table name.
    pub fn commit(&mut self, table: ValidatedTable) -> Result<String, DdlError> {
        let name = table.name().to_string();
        self.catalog.register(table.into_inner())?;
        info!(table = %name, tables = self.catalog.len(), "created table");
        Ok(name)
    }

    /// Validates `definition` and commits it. On failure the catalog is
    /// untouched.
    pub fn create_table(&mut self, definition: TableDefinition) -> Result<String, DdlError> {
        let validated = ConstraintValidator::new(&*self.catalog, self.config).validate(definition)?;
        self.commit(validated)
    }

    /// Validates every definition in order, each seeing the ones before it,
    /// and commits them all only if all pass.
    pub fn create_tables(
        &mut self,
        definitions: Vec<TableDefinition>,
    ) -> Result<Vec<String>, BatchError> {
        let mut validated: Vec<ValidatedTable> = Vec::with_capacity(definitions.len());
        for (position, definition) in definitions.into_iter().enumerate() {
            let table = ConstraintValidator::new(&*self.catalog, self.config)
                .with_pending(&validated)
                .validate(definition)
                .map_err(|source| BatchError { position, source })?;
            validated.push(table);
        }

        // Stage on a copy so a register failure cannot leave half a batch.
        let mut staged = self.catalog.clone();
        let mut names = Vec::with_capacity(validated.len());
        for (position, table) in validated.into_iter().enumerate() {
            let name = table.name().to_string();
            staged
                .register(table.into_inner())
                .map_err(|source| BatchError { position, source })?;
            names.push(name);
        }
        *self.catalog = staged;
        info!(count = names.len(), tables = self.catalog.len(), "created tables");
        Ok(names)
    }
}
