//! Matching of referenced column sets against a table's primary key.

use std::collections::HashSet;

use crate::storage::schema::TableDefinition;

/// How a referenced column set relates to the target's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
    /// Set-equal to the primary key.
    Full,
    /// Shares at least one column with the primary key but is not equal to it.
    Partial,
    /// Target has no primary key, or no column is shared with it.
    Unrelated,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyResolver;

impl KeyResolver {
    pub fn new() -> Self {
        Self
    }

    /// True iff `target` declares a primary key and `candidate` names exactly
    /// its columns, in any order.
    pub fn is_full_primary_key_match(
        &self,
        target: &TableDefinition,
        candidate: &[String],
    ) -> bool {
        self.classify(target, candidate) == KeyMatch::Full
    }

    pub fn classify(&self, target: &TableDefinition, candidate: &[String]) -> KeyMatch {
        let Some(pk) = &target.primary_key else {
            return KeyMatch::Unrelated;
        };
        let pk_set: HashSet<&str> = pk.columns.iter().map(String::as_str).collect();
        let candidate_set: HashSet<&str> = candidate.iter().map(String::as_str).collect();

        // Cardinality guards against repeated names such as (a, a) vs {a, b}.
        if candidate.len() == pk.len() && candidate_set == pk_set {
            return KeyMatch::Full;
        }
        if candidate_set.is_disjoint(&pk_set) {
            KeyMatch::Unrelated
        } else {
            KeyMatch::Partial
        }
    }
}
