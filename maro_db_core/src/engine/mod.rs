pub mod key_resolver;
pub mod validator;
pub mod mutator;

pub use key_resolver::{KeyMatch, KeyResolver};
pub use mutator::SchemaMutator;
pub use validator::{ConstraintValidator, ValidatedTable};
