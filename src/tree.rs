//! Path tree assembly
//!
//! Turns flat definition records with slash-delimited names into one nested
//! tree rooted at the collection's path.

use crate::case::{collection_path, kebab_to_camel};
use crate::models::{DefinitionRecord, NestedObject, TokenNode};

/// Build the nested tree for one (collection, mode) pair.
///
/// Every path starts with the collection's root path, so a collection named
/// `Brand/Colors` nests its records under `brand` then `Colors`. Records are
/// applied in order; when two records normalize to the same path the later
/// one wins. A leaf standing where a group is needed is replaced.
///
/// # Examples
///
/// ```
/// use tokensrc::models::DefinitionRecord;
/// use tokensrc::tree::build_tree;
///
/// let tree = build_tree("tokens", &[DefinitionRecord::new("color/brand/primary", "#ff0000ff")]);
/// assert_eq!(
///     serde_json::to_string(&tree).unwrap(),
///     r##"{"tokens":{"color":{"brand":{"primary":"#ff0000ff"}}}}"##
/// );
/// ```
pub fn build_tree(collection_name: &str, records: &[DefinitionRecord]) -> NestedObject {
    let root_path = collection_path(collection_name);
    let mut root = NestedObject::new();

    for record in records {
        let segments: Vec<String> = root_path
            .iter()
            .cloned()
            .chain(record.name.split('/').map(kebab_to_camel))
            .collect();
        insert_path(&mut root, &segments, TokenNode::Leaf(record.value.clone()));
    }

    root
}

/// Walk (creating groups as needed) to the parent of the last segment and set the node.
fn insert_path(root: &mut NestedObject, segments: &[String], node: TokenNode) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| TokenNode::Group(NestedObject::new()));
        if let TokenNode::Leaf(_) = entry {
            *entry = TokenNode::Group(NestedObject::new());
        }
        let TokenNode::Group(group) = entry else {
            return;
        };
        current = group;
    }

    current.insert(last.clone(), node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{lookup, Scalar};

    fn leaf_at<'a>(tree: &'a NestedObject, path: &[&str]) -> Option<&'a Scalar> {
        lookup(tree, path).and_then(TokenNode::as_leaf)
    }

    #[test]
    fn test_nested_under_collection_key() {
        let tree = build_tree("tokens", &[DefinitionRecord::new("color/brand/primary", "#ff0000ff")]);
        assert_eq!(
            leaf_at(&tree, &["tokens", "color", "brand", "primary"]),
            Some(&Scalar::from("#ff0000ff"))
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_collection_key_is_normalized() {
        let tree = build_tree("_Core-set", &[DefinitionRecord::new("gap", 4.0)]);
        assert!(tree.contains_key("coreSet"));
    }

    #[test]
    fn test_collection_name_with_slash_nests() {
        let tree = build_tree("Brand/Colors", &[DefinitionRecord::new("primary", "#fff")]);
        assert_eq!(serde_json::to_string(&tree).unwrap(), r##"{"brand":{"Colors":{"primary":"#fff"}}}"##);
    }

    #[test]
    fn test_segments_are_camel_cased() {
        let tree = build_tree("tokens", &[DefinitionRecord::new("text-color/on-primary", "#fff")]);
        assert!(leaf_at(&tree, &["tokens", "textColor", "onPrimary"]).is_some());
    }

    #[test]
    fn test_siblings_share_groups_in_insertion_order() {
        let tree = build_tree(
            "tokens",
            &[
                DefinitionRecord::new("space/lg", 16.0),
                DefinitionRecord::new("space/sm", 4.0),
                DefinitionRecord::new("radius", 2.0),
            ],
        );
        let space = lookup(&tree, &["tokens", "space"]).and_then(TokenNode::as_group).unwrap();
        let keys: Vec<_> = space.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["lg", "sm"]);
        assert_eq!(leaf_at(&tree, &["tokens", "radius"]), Some(&Scalar::Number(2.0)));
    }

    #[test]
    fn test_last_write_wins_on_collision() {
        let tree = build_tree(
            "tokens",
            &[DefinitionRecord::new("brand-color", "first"), DefinitionRecord::new("brandColor", "second")],
        );
        assert_eq!(leaf_at(&tree, &["tokens", "brandColor"]), Some(&Scalar::from("second")));
    }

    #[test]
    fn test_leaf_replaced_by_group() {
        let tree = build_tree(
            "tokens",
            &[DefinitionRecord::new("brand", "#000"), DefinitionRecord::new("brand/primary", "#fff")],
        );
        assert_eq!(leaf_at(&tree, &["tokens", "brand", "primary"]), Some(&Scalar::from("#fff")));
    }

    #[test]
    fn test_empty_records() {
        assert!(build_tree("tokens", &[]).is_empty());
    }
}
