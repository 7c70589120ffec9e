//! Data models for variable snapshots and projected token trees

mod collection;
mod snapshot;
mod token;
mod variable;

// Re-export all public types
pub use collection::{Mode, VariableCollection};
pub use snapshot::Snapshot;
pub use token::{lookup, DefinitionRecord, NestedObject, Scalar, TokenNode};
pub use variable::{ResolvedType, Variable, VariableAlias, VariableValue};
