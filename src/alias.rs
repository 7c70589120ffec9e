//! Alias placeholders
//!
//! An alias value is not resolved to the target's literal. It becomes an inert
//! placeholder naming the target's collection and path, e.g.
//! `##core['spacing']['base']##`, which source generators later splice in as
//! a real expression.

use tracing::debug;

use crate::case::{collection_prefix, kebab_to_camel};
use crate::source::{SourceError, VariableSource};

/// Delimiter on both sides of a placeholder
pub const PLACEHOLDER_DELIMITER: &str = "##";

/// Placeholder produced when the target or its collection cannot be found
pub const EMPTY_PLACEHOLDER: &str = "####";

/// Build the bracket-path reference for a variable in a collection.
///
/// Segments are single-quoted; `'` and `\` inside them are backslash-escaped.
///
/// ```
/// use tokensrc::alias::reference_path;
///
/// assert_eq!(reference_path("_core", "spacing/base"), "core['spacing']['base']");
/// assert_eq!(reference_path("Brand", "text-color/on-primary"), "brand['textColor']['onPrimary']");
/// assert_eq!(reference_path("copy", "it's"), r"copy['it\'s']");
/// ```
pub fn reference_path(collection_name: &str, variable_name: &str) -> String {
    let mut out = collection_prefix(collection_name);
    for segment in variable_name.split('/') {
        out.push_str("['");
        for c in kebab_to_camel(segment).chars() {
            if c == '\\' || c == '\'' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push_str("']");
    }
    out
}

/// Wrap a reference path in placeholder delimiters.
pub fn placeholder(reference: &str) -> String {
    format!("{PLACEHOLDER_DELIMITER}{reference}{PLACEHOLDER_DELIMITER}")
}

/// If `s` is a whole placeholder, return the reference between the delimiters.
///
/// ```
/// use tokensrc::alias::placeholder_reference;
///
/// assert_eq!(placeholder_reference("##core['a']##"), Some("core['a']"));
/// assert_eq!(placeholder_reference("####"), None);
/// assert_eq!(placeholder_reference("#ff0000ff"), None);
/// ```
pub fn placeholder_reference(s: &str) -> Option<&str> {
    s.strip_prefix(PLACEHOLDER_DELIMITER)?
        .strip_suffix(PLACEHOLDER_DELIMITER)
        .filter(|inner| !inner.is_empty())
}

/// Resolve an alias to its placeholder string.
///
/// `owner_id` is the variable holding the alias; it is only used for logging.
/// Missing targets degrade to [`EMPTY_PLACEHOLDER`]. Errors from the source
/// are propagated.
pub async fn resolve_alias(
    source: &dyn VariableSource,
    alias_id: &str,
    owner_id: &str,
) -> Result<String, SourceError> {
    let Some(target) = source.variable_by_id(alias_id).await? else {
        debug!(owner = owner_id, target = alias_id, "alias target not found");
        return Ok(EMPTY_PLACEHOLDER.to_string());
    };

    let Some(collection) = source.collection_by_id(&target.variable_collection_id).await? else {
        debug!(
            owner = owner_id,
            target = alias_id,
            collection = %target.variable_collection_id,
            "alias target collection not found"
        );
        return Ok(EMPTY_PLACEHOLDER.to_string());
    };

    Ok(placeholder(&reference_path(&collection.name, &target.name)))
}
