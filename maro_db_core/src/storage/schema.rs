use serde::{Deserialize, Serialize};

use crate::config::IdentifierCase;
use crate::types::datatype::DataType;

/// Represents a single column in a table definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub dtype: DataType,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

/// Ordered primary key columns. Matching against it ignores order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
}

impl PrimaryKey {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// `FOREIGN KEY (columns) REFERENCES ref_table (ref_columns)`, mapped
/// positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
}

impl ForeignKey {
    pub fn new<L, R, S, T>(columns: L, ref_table: impl Into<String>, ref_columns: R) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ref_table: ref_table.into(),
            ref_columns: ref_columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// A parsed `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
        }
    }

    /// Adds a nullable column.
    pub fn column(mut self, name: impl Into<String>, dtype: DataType) -> Self {
        self.columns.push(Column {
            name: name.into(),
            dtype,
            nullable: true,
        });
        self
    }

    pub fn not_null_column(mut self, name: impl Into<String>, dtype: DataType) -> Self {
        self.columns.push(Column {
            name: name.into(),
            dtype,
            nullable: false,
        });
        self
    }

    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(PrimaryKey::new(columns));
        self
    }

    pub fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Get column by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    /// Returns the number of columns in this table
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True if any foreign key targets `table`.
    pub fn references(&self, table: &str) -> bool {
        self.foreign_keys.iter().any(|fk| fk.ref_table == table)
    }

    /// Folds every identifier according to `case`.
    pub fn normalized(mut self, case: IdentifierCase) -> Self {
        if case == IdentifierCase::Sensitive {
            return self;
        }
        fold(&mut self.name, case);
        for c in &mut self.columns {
            fold(&mut c.name, case);
        }
        if let Some(pk) = &mut self.primary_key {
            pk.columns.iter_mut().for_each(|c| fold(c, case));
        }
        for fk in &mut self.foreign_keys {
            fold(&mut fk.ref_table, case);
            fk.columns.iter_mut().for_each(|c| fold(c, case));
            fk.ref_columns.iter_mut().for_each(|c| fold(c, case));
        }
        self
    }
}

fn fold(ident: &mut String, case: IdentifierCase) {
    *ident = case.fold(ident);
}
