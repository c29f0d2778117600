//! DDL configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How table and column identifiers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCase {
    /// Names must match exactly.
    #[default]
    Sensitive,
    /// Names are folded to lowercase before validation and storage.
    Insensitive,
}

impl IdentifierCase {
    pub fn fold(self, ident: &str) -> String {
        match self {
            IdentifierCase::Sensitive => ident.to_string(),
            IdentifierCase::Insensitive => ident.to_lowercase(),
        }
    }
}

/// Options for validating and registering table definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdlConfig {
    pub identifier_case: IdentifierCase,
    /// Allow a foreign key to reference the table being created.
    pub allow_self_reference: bool,
}

impl Default for DdlConfig {
    fn default() -> Self {
        Self {
            identifier_case: IdentifierCase::Sensitive,
            allow_self_reference: true,
        }
    }
}

impl DdlConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Loads a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
