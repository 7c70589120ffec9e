//! Read-only snapshot of a document's local variables and collections.

use serde::{Deserialize, Serialize};

use super::{Variable, VariableCollection};

/// Everything the orchestrator reads in one pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
}

impl Snapshot {
    pub fn new(variables: Vec<Variable>, collections: Vec<VariableCollection>) -> Self {
        Self { variables, collections }
    }

    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn collection(&self, id: &str) -> Option<&VariableCollection> {
        self.collections.iter().find(|c| c.id == id)
    }
}
