//! Variable collections and their modes.

use serde::{Deserialize, Serialize};

/// A named variant dimension (e.g. light/dark) within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

impl Mode {
    pub fn new(mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { mode_id: mode_id.into(), name: name.into() }
    }
}

/// A named group of variables sharing a set of modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    /// Modes in display order
    #[serde(default)]
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub default_mode_id: String,
    /// Declared display order of member variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_ids: Option<Vec<String>>,
}

impl VariableCollection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), ..Default::default() }
    }

    /// Add a mode. The first mode added becomes the default.
    pub fn with_mode(mut self, mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        let mode = Mode::new(mode_id, name);
        if self.modes.is_empty() && self.default_mode_id.is_empty() {
            self.default_mode_id = mode.mode_id.clone();
        }
        self.modes.push(mode);
        self
    }

    /// Set the declared variable ordering.
    pub fn with_variable_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variable_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if `mode_id` is this collection's default mode
    pub fn is_default(&self, mode_id: &str) -> bool {
        self.default_mode_id == mode_id
    }

    /// The declared member ordering, if present and non-empty
    pub fn declared_order(&self) -> Option<&[String]> {
        self.variable_ids.as_deref().filter(|ids| !ids.is_empty())
    }
}
