use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Catalog;
use crate::config::IdentifierCase;
use crate::engine::validator::check_structure;
use crate::error::StoreError;
use crate::storage::schema::TableDefinition;

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    tables: Vec<TableDefinition>,
}

impl Catalog {
    /// Saves catalog metadata to disk, tables sorted by name.
    pub fn save_to_path(&self, path: &Path) -> Result<(), StoreError> {
        let mut tables: Vec<TableDefinition> = self.tables().cloned().collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));

        let payload = serde_json::to_string_pretty(&CatalogFile { tables })?;
        fs::write(path, payload).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), tables = self.len(), "saved catalog");
        Ok(())
    }

    /// Loads catalog metadata from disk. A missing or blank file yields an
    /// empty catalog. Every stored table must still be well formed.
    pub fn load_from_path(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let file: CatalogFile = serde_json::from_str(&content)?;
        let mut tables: HashMap<String, TableDefinition> = HashMap::new();
        for table in file.tables {
            if let Err(violation) = check_structure(&table) {
                return Err(StoreError::Malformed {
                    table: table.name,
                    violation,
                });
            }
            if tables.contains_key(&table.name) {
                return Err(StoreError::DuplicateTable(table.name));
            }
            tables.insert(table.name.clone(), table);
        }
        debug!(path = %path.display(), tables = tables.len(), "loaded catalog");

        Ok(Self { tables })
    }

    /// Folds every stored identifier with `case`. Two tables whose names
    /// only differ by case cannot both survive folding.
    pub(crate) fn folded(self, case: IdentifierCase) -> Result<Self, StoreError> {
        if case == IdentifierCase::Sensitive {
            return Ok(self);
        }
        let mut tables: HashMap<String, TableDefinition> = HashMap::with_capacity(self.len());
        for table in self.tables.into_values() {
            let table = table.normalized(case);
            if tables.contains_key(&table.name) {
                return Err(StoreError::DuplicateTable(table.name));
            }
            tables.insert(table.name.clone(), table);
        }
        Ok(Self { tables })
    }
}
