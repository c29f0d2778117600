//! DDL core: validates `CREATE TABLE` definitions against the catalog and
//! registers them atomically.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

pub mod config;
pub mod engine;
pub mod error;
pub mod storage;
pub mod types;

pub use config::{DdlConfig, IdentifierCase};
pub use engine::{ConstraintValidator, KeyMatch, KeyResolver, SchemaMutator, ValidatedTable};
pub use error::{
    BatchError, CatalogError, ConfigError, DdlError, ErrorKind, StoreError, StructuralViolation,
};
pub use storage::{Catalog, Column, ForeignKey, PrimaryKey, TableDefinition};
pub use types::DataType;

/// A catalog plus the lock that serializes schema changes against it.
///
/// Each create call holds the write lock from the existence check through
/// the commit, so two concurrent creates of one name cannot both succeed.
#[derive(Debug)]
pub struct Database {
    path: Option<PathBuf>,
    catalog: RwLock<Catalog>,
    config: DdlConfig,
}

impl Database {
    /// An empty catalog that is never written to disk.
    pub fn in_memory(config: DdlConfig) -> Self {
        Self {
            path: None,
            catalog: RwLock::new(Catalog::new()),
            config,
        }
    }

    /// Opens the catalog snapshot at `path`, starting empty if it does not
    /// exist yet. [`Database::save`] writes back to the same file.
    ///
    /// Stored names are folded with the configured identifier case, so a
    /// snapshot written case-sensitively is rejected if two of its tables
    /// collide once folded.
    pub fn open(path: impl Into<PathBuf>, config: DdlConfig) -> Result<Self, error::StoreError> {
        let path = path.into();
        let catalog = Catalog::load_from_path(&path)?.folded(config.identifier_case)?;
        Ok(Self {
            path: Some(path),
            catalog: RwLock::new(catalog),
            config,
        })
    }

    pub fn create_table(&self, definition: TableDefinition) -> Result<String, DdlError> {
        let mut catalog = self.catalog.write();
        SchemaMutator::new(&mut catalog, &self.config).create_table(definition)
    }

    pub fn create_tables(
        &self,
        definitions: Vec<TableDefinition>,
    ) -> Result<Vec<String>, BatchError> {
        let mut catalog = self.catalog.write();
        SchemaMutator::new(&mut catalog, &self.config).create_tables(definitions)
    }

    /// Looks up a committed table, folding the name like definitions are.
    pub fn table(&self, name: &str) -> Option<TableDefinition> {
        let name = self.config.identifier_case.fold(name);
        self.catalog.read().get(&name).ok().cloned()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.catalog.read().table_names()
    }

    pub fn table_count(&self) -> usize {
        self.catalog.read().len()
    }

    /// Runs `f` against the catalog under the read lock.
    pub fn with_catalog<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        f(&self.catalog.read())
    }

    pub fn save(&self) -> Result<(), error::StoreError> {
        match &self.path {
            Some(path) => self.catalog.read().save_to_path(path),
            None => Ok(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> &DdlConfig {
        &self.config
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::in_memory(DdlConfig::default())
    }
}
