//! Definition-time validation of `CREATE TABLE` requests.
//!
//! Checks run cheapest first and stop at the first failure:
//!
//! 1. the table name must be free,
//! 2. the definition must be well formed (parser contract),
//! 3. every foreign key, in declaration order, must target an existing
//!    table and name exactly that table's primary key.

use std::collections::HashSet;

use tracing::{debug, error, warn};

use crate::config::DdlConfig;
use crate::engine::key_resolver::{KeyMatch, KeyResolver};
use crate::error::{DdlError, StructuralViolation};
use crate::storage::catalog::Catalog;
use crate::storage::schema::{ForeignKey, TableDefinition};

/// A definition that passed validation and may be committed.
///
/// Only [`ConstraintValidator::validate`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTable(TableDefinition);

impl ValidatedTable {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn definition(&self) -> &TableDefinition {
        &self.0
    }

    pub(crate) fn into_inner(self) -> TableDefinition {
        self.0
    }
}

pub struct ConstraintValidator<'a> {
    catalog: &'a Catalog,
    config: &'a DdlConfig,
    resolver: KeyResolver,
    /// Validated but uncommitted definitions from the same batch.
    pending: &'a [ValidatedTable],
}

impl<'a> ConstraintValidator<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a DdlConfig) -> Self {
        Self {
            catalog,
            config,
            resolver: KeyResolver::new(),
            pending: &[],
        }
    }

    /// Makes earlier definitions of a batch visible to existence checks and
    /// foreign key resolution.
    pub fn with_pending(mut self, pending: &'a [ValidatedTable]) -> Self {
        self.pending = pending;
        self
    }

    pub fn validate(&self, definition: TableDefinition) -> Result<ValidatedTable, DdlError> {
        let definition = definition.normalized(self.config.identifier_case);
        debug!(table = %definition.name, "validating table definition");

        if self.table_exists(&definition.name) {
            return Err(rejected(DdlError::TableAlreadyExists {
                table: definition.name,
            }));
        }

        if let Err(violation) = check_structure(&definition) {
            error!(table = %definition.name, %violation, "malformed table definition");
            return Err(DdlError::Malformed {
                table: definition.name,
                violation,
            });
        }

        for (idx, fk) in definition.foreign_keys.iter().enumerate() {
            self.check_foreign_key(&definition, fk)?;
            debug!(table = %definition.name, fk = idx, ref_table = %fk.ref_table, "foreign key ok");
        }

        debug!(table = %definition.name, "table definition validated");
        Ok(ValidatedTable(definition))
    }

    fn table_exists(&self, name: &str) -> bool {
        self.catalog.exists(name) || self.pending.iter().any(|t| t.name() == name)
    }

    fn resolve_target<'d>(
        &'d self,
        definition: &'d TableDefinition,
        fk: &ForeignKey,
    ) -> Option<&'d TableDefinition> {
        if fk.ref_table == definition.name {
            return self.config.allow_self_reference.then_some(definition);
        }
        if let Ok(table) = self.catalog.get(&fk.ref_table) {
            return Some(table);
        }
        self.pending
            .iter()
            .map(ValidatedTable::definition)
            .find(|t| t.name == fk.ref_table)
    }

    fn check_foreign_key(
        &self,
        definition: &TableDefinition,
        fk: &ForeignKey,
    ) -> Result<(), DdlError> {
        let Some(target) = self.resolve_target(definition, fk) else {
            return Err(rejected(DdlError::ReferencedTableMissing {
                table: definition.name.clone(),
                ref_table: fk.ref_table.clone(),
            }));
        };

        match self.resolver.classify(target, &fk.ref_columns) {
            KeyMatch::Full => Ok(()),
            KeyMatch::Partial => Err(rejected(DdlError::ReferenceNonFullPrimaryKey {
                table: definition.name.clone(),
                ref_table: fk.ref_table.clone(),
                ref_columns: fk.ref_columns.clone(),
            })),
            KeyMatch::Unrelated => Err(rejected(DdlError::ReferenceNonPrimaryKey {
                table: definition.name.clone(),
                ref_table: fk.ref_table.clone(),
                ref_columns: fk.ref_columns.clone(),
            })),
        }
    }
}

fn rejected(err: DdlError) -> DdlError {
    warn!(table = %err.table(), kind = ?err.kind(), "create table rejected: {err}");
    err
}

/// Re-asserts the shape the parser is expected to guarantee. Also run over
/// every table of a loaded snapshot.
pub(crate) fn check_structure(definition: &TableDefinition) -> Result<(), StructuralViolation> {
    if definition.name.is_empty() {
        return Err(StructuralViolation::EmptyTableName);
    }
    if definition.columns.is_empty() {
        return Err(StructuralViolation::NoColumns);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for c in &definition.columns {
        if !seen.insert(c.name.as_str()) {
            return Err(StructuralViolation::DuplicateColumn(c.name.clone()));
        }
    }

    if let Some(pk) = &definition.primary_key {
        if pk.is_empty() {
            return Err(StructuralViolation::EmptyPrimaryKey);
        }
        let mut pk_seen: HashSet<&str> = HashSet::new();
        for c in &pk.columns {
            if !definition.has_column(c) {
                return Err(StructuralViolation::UnknownPrimaryKeyColumn(c.clone()));
            }
            if !pk_seen.insert(c.as_str()) {
                return Err(StructuralViolation::DuplicatePrimaryKeyColumn(c.clone()));
            }
        }
    }

    for fk in &definition.foreign_keys {
        if fk.columns.is_empty() || fk.ref_columns.is_empty() {
            return Err(StructuralViolation::EmptyForeignKey);
        }
        if fk.columns.len() != fk.ref_columns.len() {
            return Err(StructuralViolation::ForeignKeyArity {
                local: fk.columns.len(),
                referenced: fk.ref_columns.len(),
            });
        }
        if let Some(c) = fk.columns.iter().find(|c| !definition.has_column(c)) {
            return Err(StructuralViolation::UnknownForeignKeyColumn(c.clone()));
        }
    }
    Ok(())
}
