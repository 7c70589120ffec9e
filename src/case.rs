//! Case conversion for variable path segments
//!
//! Variable names use hyphenated words inside each slash-delimited segment
//! (`brand-primary`). Output keys use camel case (`brandPrimary`).

/// Convert a hyphenated string to camel case.
///
/// Every `-` immediately followed by an ASCII lowercase letter is dropped and
/// the letter upper-cased. Any other `-` is kept, so the conversion is
/// idempotent.
///
/// # Examples
///
/// ```
/// use tokensrc::case::kebab_to_camel;
///
/// assert_eq!(kebab_to_camel("brand-primary"), "brandPrimary");
/// assert_eq!(kebab_to_camel("size-2x"), "size-2x");
/// assert_eq!(kebab_to_camel(""), "");
/// ```
pub fn kebab_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }

    out
}

/// Convert to camel case and force the first character to lowercase.
///
/// ```
/// use tokensrc::case::lower_camel;
///
/// assert_eq!(lower_camel("Brand-colors"), "brandColors");
/// ```
pub fn lower_camel(s: &str) -> String {
    let camel = kebab_to_camel(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => camel,
    }
}

/// Collection prefix used in alias placeholders: leading underscores
/// stripped, then [`lower_camel`]. Unlike [`collection_path`] it does not
/// split on `/`.
///
/// ```
/// use tokensrc::case::collection_prefix;
///
/// assert_eq!(collection_prefix("_core"), "core");
/// assert_eq!(collection_prefix("Semantic-colors"), "semanticColors");
/// ```
pub fn collection_prefix(name: &str) -> String {
    lower_camel(name.trim_start_matches('_'))
}

/// Root path of a collection in its token trees.
///
/// The collection name (leading underscores stripped) may itself hold `/`
/// separators. The head segment goes through [`lower_camel`], the rest
/// through [`kebab_to_camel`], matching how record names are split.
///
/// ```
/// use tokensrc::case::collection_path;
///
/// assert_eq!(collection_path("_core"), ["core"]);
/// assert_eq!(collection_path("Brand/Colors"), ["brand", "Colors"]);
/// ```
pub fn collection_path(name: &str) -> Vec<String> {
    name.trim_start_matches('_')
        .split('/')
        .enumerate()
        .map(|(i, segment)| if i == 0 { lower_camel(segment) } else { kebab_to_camel(segment) })
        .collect()
}

/// Single identifier for a collection: its root path segments joined in
/// camel case (`Brand/Colors` -> `brandColors`).
pub fn collection_ident(name: &str) -> String {
    let mut out = String::new();
    for (i, segment) in collection_path(name).iter().enumerate() {
        if i == 0 {
            out.push_str(segment);
        } else {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}
