//! Variable data sources
//!
//! The orchestrator reads variables exclusively through [`VariableSource`], so
//! the host application can be swapped for a file snapshot, an in-memory
//! fixture, or a test double.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Snapshot, Variable, VariableCollection};

/// Error raised by a data source.
///
/// A lookup that finds nothing is not an error: point lookups return
/// `Ok(None)` for that.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// Reading the snapshot failed
    #[error("Failed to read variables: {0}")]
    Io(#[from] std::io::Error),
    /// The snapshot is not valid JSON or has the wrong shape
    #[error("Failed to parse variables: {0}")]
    Parse(#[from] serde_json::Error),
    /// The source could not serve the request
    #[error("{0}")]
    Unavailable(String),
}

/// Read-only access to a document's variables and collections.
#[async_trait]
pub trait VariableSource: Send + Sync {
    /// All local variables, in host order.
    async fn variables(&self) -> Result<Vec<Variable>, SourceError>;

    /// All local variable collections, in host order.
    async fn collections(&self) -> Result<Vec<VariableCollection>, SourceError>;

    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, SourceError>;

    async fn collection_by_id(&self, id: &str) -> Result<Option<VariableCollection>, SourceError>;
}

/// In-memory source over a [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Parse a snapshot from a JSON string.
    ///
    /// ```
    /// use tokensrc::source::SnapshotSource;
    ///
    /// let source = SnapshotSource::from_json(r#"{"variables": [], "collections": []}"#).unwrap();
    /// assert!(source.snapshot().variables.is_empty());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl VariableSource for SnapshotSource {
    async fn variables(&self) -> Result<Vec<Variable>, SourceError> {
        Ok(self.snapshot.variables.clone())
    }

    async fn collections(&self) -> Result<Vec<VariableCollection>, SourceError> {
        Ok(self.snapshot.collections.clone())
    }

    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, SourceError> {
        Ok(self.snapshot.variable(id).cloned())
    }

    async fn collection_by_id(&self, id: &str) -> Result<Option<VariableCollection>, SourceError> {
        Ok(self.snapshot.collection(id).cloned())
    }
}
