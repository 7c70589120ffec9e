//! Projected token values and the nested tree they are assembled into.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// A projected leaf value.
///
/// Numbers that are whole serialize as JSON integers (`16`, not `16.0`) and
/// non-finite numbers serialize as `null`, matching what the host's JSON
/// encoder produces.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Number(f64),
    Boolean(bool),
}

/// Largest integer an f64 represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Boolean(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Scalar::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl Scalar {
    /// The empty string, used wherever a value cannot be projected
    pub fn empty() -> Self {
        Scalar::String(String::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

/// A variable's hierarchical name paired with its projected value for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionRecord {
    pub name: String,
    pub value: Scalar,
}

impl DefinitionRecord {
    pub fn new(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// A node in a token tree: either a leaf value or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    Leaf(Scalar),
    Group(NestedObject),
}

impl TokenNode {
    pub fn as_group(&self) -> Option<&NestedObject> {
        match self {
            TokenNode::Group(g) => Some(g),
            TokenNode::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Scalar> {
        match self {
            TokenNode::Leaf(s) => Some(s),
            TokenNode::Group(_) => None,
        }
    }
}

/// Insertion-ordered tree keyed by camel-cased path segments.
pub type NestedObject = IndexMap<String, TokenNode>;

/// Follow `path` through nested groups and return the node at its end.
///
/// ```
/// use tokensrc::models::{lookup, DefinitionRecord, Scalar};
/// use tokensrc::tree::build_tree;
///
/// let tree = build_tree("tokens", &[DefinitionRecord::new("space/sm", 4.0)]);
/// let leaf = lookup(&tree, &["tokens", "space", "sm"]).and_then(|n| n.as_leaf());
/// assert_eq!(leaf, Some(&Scalar::Number(4.0)));
/// ```
pub fn lookup<'a>(tree: &'a NestedObject, path: &[&str]) -> Option<&'a TokenNode> {
    let (first, rest) = path.split_first()?;
    let mut node = tree.get(*first)?;
    for segment in rest {
        node = node.as_group()?.get(*segment)?;
    }
    Some(node)
}
