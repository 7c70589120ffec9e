//! Variable and variable value types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// The declared type every value of a variable resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
    /// Any type this tool does not know how to project
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedType::Color => write!(f, "COLOR"),
            ResolvedType::Float => write!(f, "FLOAT"),
            ResolvedType::String => write!(f, "STRING"),
            ResolvedType::Boolean => write!(f, "BOOLEAN"),
            ResolvedType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A reference from one variable value to another variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    /// Always `VARIABLE_ALIAS` in host snapshots
    #[serde(rename = "type", default = "alias_type")]
    pub kind: String,
    /// Id of the referenced variable
    pub id: String,
}

fn alias_type() -> String {
    "VARIABLE_ALIAS".to_string()
}

impl VariableAlias {
    pub fn new(id: impl Into<String>) -> Self {
        Self { kind: alias_type(), id: id.into() }
    }
}

/// A variable's value for one mode.
///
/// Either a literal or an alias to another variable. Literals are not
/// guaranteed to match the variable's [`ResolvedType`]; the projector coerces.
///
/// # Examples
///
/// ```
/// use tokensrc::models::VariableValue;
///
/// let alias: VariableValue =
///     serde_json::from_str(r#"{"type": "VARIABLE_ALIAS", "id": "VariableID:1:2"}"#).unwrap();
/// let color: VariableValue = serde_json::from_str(r#"{"r": 1, "g": 0, "b": 0}"#).unwrap();
/// let number: VariableValue = serde_json::from_str("16").unwrap();
///
/// assert!(alias.is_alias());
/// assert!(matches!(color, VariableValue::Color(_)));
/// assert!(matches!(number, VariableValue::Float(n) if n == 16.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(VariableAlias),
    Color(Rgba),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl VariableValue {
    /// Returns true if this value references another variable
    pub fn is_alias(&self) -> bool {
        matches!(self, VariableValue::Alias(_))
    }

    /// Returns the referenced variable id if this is an alias
    pub fn as_alias(&self) -> Option<&VariableAlias> {
        match self {
            VariableValue::Alias(alias) => Some(alias),
            _ => None,
        }
    }
}

impl From<Rgba> for VariableValue {
    fn from(c: Rgba) -> Self {
        VariableValue::Color(c)
    }
}

impl From<f64> for VariableValue {
    fn from(v: f64) -> Self {
        VariableValue::Float(v)
    }
}

impl From<&str> for VariableValue {
    fn from(v: &str) -> Self {
        VariableValue::String(v.to_string())
    }
}

impl From<bool> for VariableValue {
    fn from(v: bool) -> Self {
        VariableValue::Boolean(v)
    }
}

/// A named, typed design token with one value per mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    /// Slash-delimited hierarchical path, e.g. `color/brand/primary`
    pub name: String,
    pub variable_collection_id: String,
    pub resolved_type: ResolvedType,
    /// Mode id -> value, in host order
    #[serde(default)]
    pub values_by_mode: IndexMap<String, VariableValue>,
}

impl Variable {
    /// Create a variable with no values.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        collection_id: impl Into<String>,
        resolved_type: ResolvedType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variable_collection_id: collection_id.into(),
            resolved_type,
            values_by_mode: IndexMap::new(),
        }
    }

    /// Set the value for a mode, builder style.
    pub fn with_value(mut self, mode_id: impl Into<String>, value: impl Into<VariableValue>) -> Self {
        self.values_by_mode.insert(mode_id.into(), value.into());
        self
    }

    /// Get the value for a mode
    pub fn value_for(&self, mode_id: &str) -> Option<&VariableValue> {
        self.values_by_mode.get(mode_id)
    }
}

impl From<VariableAlias> for VariableValue {
    fn from(a: VariableAlias) -> Self {
        VariableValue::Alias(a)
    }
}
