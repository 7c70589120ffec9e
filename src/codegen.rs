//! TypeScript source generation
//!
//! Renders exported token trees as `export const` declarations. Alias
//! placeholders (`##core['spacing']['base']##`) are spliced in unquoted, so
//! they become property accesses on the referenced collection's constant.
//!
//! # Example Output
//!
//! ```text
//! export const core = {
//!   spacing: {
//!     base: 4,
//!   },
//! } as const;
//!
//! export const themeDark = {
//!   gap: core['spacing']['base'],
//! } as const;
//! ```

use std::fmt::Write;

use thiserror::Error;

use crate::alias::placeholder_reference;
use crate::case::{collection_ident, collection_path};
use crate::models::{lookup, NestedObject, Scalar, TokenNode};
use crate::protocol::{CollectionTokens, Event, ModeTokens};

/// Error type for source generation
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The export pass failed, so there is nothing to render
    #[error("cannot generate source from a failed export: {0}")]
    Upstream(String),
    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("failed to quote string: {0}")]
    Quote(#[from] serde_json::Error),
}

/// Options controlling generated source layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Spaces per nesting level
    pub indent: usize,
    /// Append `as const` to each declaration
    pub as_const: bool,
    /// Prefix for every exported name and reference
    pub export_prefix: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self { indent: 2, as_const: true, export_prefix: String::new() }
    }
}

const HEADER: &str = "// Generated by tokensrc. Do not edit.\n";

/// Render an export event as a TypeScript module.
///
/// Each collection's default mode is exported under the collection key; the
/// other modes append their PascalCase mode name (`tokensDark`).
pub fn render_typescript(event: &Event, options: &CodegenOptions) -> Result<String, CodegenError> {
    let collections = match event {
        Event::VariablesData { collections } => collections,
        Event::Error { message } => return Err(CodegenError::Upstream(message.clone())),
    };

    let mut out = String::from(HEADER);
    for collection in collections {
        for mode in &collection.variables_by_mode {
            out.push('\n');
            render_declaration(&mut out, collection, mode, options)?;
        }
    }
    Ok(out)
}

/// Exported name for one mode of a collection.
///
/// ```
/// use tokensrc::codegen::const_name;
///
/// assert_eq!(const_name("", "_core", "Value", true), "core");
/// assert_eq!(const_name("", "Theme", "dark mode", false), "themeDarkMode");
/// assert_eq!(const_name("ds", "theme", "Light", true), "dsTheme");
/// assert_eq!(const_name("", "Brand/Colors", "Value", true), "brandColors");
/// ```
pub fn const_name(prefix: &str, collection_name: &str, mode_name: &str, is_default: bool) -> String {
    let mut name = collection_ident(collection_name);
    if !is_default {
        name.push_str(&pascal_case(mode_name));
    }
    if prefix.is_empty() {
        name
    } else {
        format!("{}{}", prefix, capitalize(&name))
    }
}

fn render_declaration(
    out: &mut String,
    collection: &CollectionTokens,
    mode: &ModeTokens,
    options: &CodegenOptions,
) -> Result<(), CodegenError> {
    let is_default = collection.modes.iter().any(|m| m.id == mode.mode_id && m.is_default);
    let name =
        const_name(&options.export_prefix, &collection.collection_name, &mode.mode_name, is_default);

    // The tree nests everything under the collection's root path; export its contents
    let root_path = collection_path(&collection.collection_name);
    let root_path: Vec<&str> = root_path.iter().map(String::as_str).collect();
    let empty = NestedObject::new();
    let body = match lookup(&mode.data, &root_path) {
        Some(TokenNode::Group(group)) => group,
        _ => &empty,
    };

    write!(out, "export const {} = ", name)?;
    render_group(out, body, 1, options)?;
    if options.as_const {
        out.push_str(" as const");
    }
    out.push_str(";\n");
    Ok(())
}

fn render_group(
    out: &mut String,
    group: &NestedObject,
    depth: usize,
    options: &CodegenOptions,
) -> Result<(), CodegenError> {
    if group.is_empty() {
        out.push_str("{}");
        return Ok(());
    }

    out.push_str("{\n");
    let pad = " ".repeat(options.indent * depth);
    for (key, node) in group {
        write!(out, "{}{}: ", pad, render_key(key)?)?;
        match node {
            TokenNode::Group(child) => render_group(out, child, depth + 1, options)?,
            TokenNode::Leaf(scalar) => out.push_str(&render_scalar(scalar, options)?),
        }
        out.push_str(",\n");
    }
    write!(out, "{}}}", " ".repeat(options.indent * (depth - 1)))?;
    Ok(())
}

fn render_key(key: &str) -> Result<String, CodegenError> {
    if is_identifier(key) {
        Ok(key.to_string())
    } else {
        Ok(serde_json::to_string(key)?)
    }
}

fn render_scalar(scalar: &Scalar, options: &CodegenOptions) -> Result<String, CodegenError> {
    Ok(match scalar {
        Scalar::String(s) => match placeholder_reference(s) {
            Some(reference) => reference_expression(reference, options),
            None => serde_json::to_string(s)?,
        },
        Scalar::Boolean(b) => b.to_string(),
        Scalar::Number(n) if n.is_nan() => "NaN".to_string(),
        Scalar::Number(n) if n.is_infinite() => {
            let name = if *n > 0.0 { "Infinity" } else { "-Infinity" };
            name.to_string()
        }
        Scalar::Number(n) => n.to_string(),
    })
}

/// Turn a placeholder reference into an expression on the referenced
/// collection's constant. The head before the first `[` is the collection
/// prefix, which may still hold `/` separators.
fn reference_expression(reference: &str, options: &CodegenOptions) -> String {
    let (head, access) = reference.split_at(reference.find('[').unwrap_or(reference.len()));
    let binding = collection_ident(head);
    if options.export_prefix.is_empty() {
        format!("{}{}", binding, access)
    } else {
        format!("{}{}{}", options.export_prefix, capitalize(&binding), access)
    }
}

/// True for keys that can be written without quotes.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "dark mode" / "high-contrast" -> "DarkMode" / "HighContrast"
fn pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).map(capitalize).collect()
}
