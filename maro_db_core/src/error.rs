//! Error types for catalog access and DDL validation.

use std::path::PathBuf;

use thiserror::Error;

/// Machine-readable classification of a [`DdlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TableAlreadyExists,
    ReferencedTableMissing,
    ReferenceNonPrimaryKey,
    ReferenceNonFullPrimaryKey,
    /// Upstream contract breach: the definition was malformed.
    Malformed,
    /// Catalog invariant breach: a register call raced or skipped validation.
    DuplicateRegistration,
}

/// Failure of a `CREATE TABLE` request.
///
/// The four user-facing kinds render a fixed message regardless of the
/// tables and columns involved; the context is kept in the fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DdlError {
    #[error("table with the same name already exists")]
    TableAlreadyExists { table: String },

    #[error("foreign key references non existing table")]
    ReferencedTableMissing { table: String, ref_table: String },

    #[error("foreign key references non primary key column")]
    ReferenceNonPrimaryKey {
        table: String,
        ref_table: String,
        ref_columns: Vec<String>,
    },

    #[error("foreign key does not references full primary key")]
    ReferenceNonFullPrimaryKey {
        table: String,
        ref_table: String,
        ref_columns: Vec<String>,
    },

    #[error("malformed definition for table '{table}': {violation}")]
    Malformed {
        table: String,
        violation: StructuralViolation,
    },

    #[error("table '{table}' was registered twice")]
    DuplicateRegistration { table: String },
}

impl DdlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DdlError::TableAlreadyExists { .. } => ErrorKind::TableAlreadyExists,
            DdlError::ReferencedTableMissing { .. } => ErrorKind::ReferencedTableMissing,
            DdlError::ReferenceNonPrimaryKey { .. } => ErrorKind::ReferenceNonPrimaryKey,
            DdlError::ReferenceNonFullPrimaryKey { .. } => ErrorKind::ReferenceNonFullPrimaryKey,
            DdlError::Malformed { .. } => ErrorKind::Malformed,
            DdlError::DuplicateRegistration { .. } => ErrorKind::DuplicateRegistration,
        }
    }

    /// True for errors caused by a bug upstream of validation rather than by
    /// the user's statement.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            DdlError::Malformed { .. } | DdlError::DuplicateRegistration { .. }
        )
    }

    /// Name of the table whose creation failed.
    pub fn table(&self) -> &str {
        match self {
            DdlError::TableAlreadyExists { table }
            | DdlError::ReferencedTableMissing { table, .. }
            | DdlError::ReferenceNonPrimaryKey { table, .. }
            | DdlError::ReferenceNonFullPrimaryKey { table, .. }
            | DdlError::Malformed { table, .. }
            | DdlError::DuplicateRegistration { table } => table,
        }
    }
}

/// A table definition that breaks the shape the parser guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    #[error("table name is empty")]
    EmptyTableName,
    #[error("table has no columns")]
    NoColumns,
    #[error("column '{0}' is defined more than once")]
    DuplicateColumn(String),
    #[error("primary key has no columns")]
    EmptyPrimaryKey,
    #[error("primary key lists column '{0}' more than once")]
    DuplicatePrimaryKeyColumn(String),
    #[error("primary key references unknown column '{0}'")]
    UnknownPrimaryKeyColumn(String),
    #[error("foreign key column list cannot be empty")]
    EmptyForeignKey,
    #[error("foreign key has {local} local columns but {referenced} referenced columns")]
    ForeignKeyArity { local: usize, referenced: usize },
    #[error("foreign key references unknown column '{0}'")]
    UnknownForeignKeyColumn(String),
}

/// Failure of a batch of `CREATE TABLE` requests. Nothing from the batch
/// was committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("definition #{position} in batch failed: {source}")]
pub struct BatchError {
    /// Zero-based index of the failing definition.
    pub position: usize,
    pub source: DdlError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Table '{0}' does not exist")]
    TableNotFound(String),
}

/// Errors from reading or writing a catalog snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog file lists table '{0}' more than once")]
    DuplicateTable(String),
    #[error("catalog file has a malformed definition for table '{table}': {violation}")]
    Malformed {
        table: String,
        violation: StructuralViolation,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
