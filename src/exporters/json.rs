use std::collections::BTreeMap;

use crate::error::Result;
use crate::tree::{Children, DuTree, TreeNode};

/// Serializable mirror of the tree, embedded in the page and consulted by the
/// expansion script.
pub type Projection<'a> = BTreeMap<&'a str, ProjectedNode<'a>>;

#[derive(serde_derive::Serialize, Debug, PartialEq, Eq)]
pub struct ProjectedNode<'a> {
    size: Option<&'a str>,
    children: Projection<'a>,
}

fn project_children(children: &Children) -> Projection<'_> {
    children
        .iter()
        .map(|(name, node)| (name.as_str(), project_node(node)))
        .collect()
}

fn project_node(node: &TreeNode) -> ProjectedNode<'_> {
    ProjectedNode {
        size: node.size.as_deref(),
        children: project_children(&node.children),
    }
}

/// Projects the whole tree, every level deep.
pub fn project(tree: &DuTree) -> Projection<'_> {
    project_children(&tree.children)
}

pub fn to_json(projection: &Projection) -> Result<String> {
    Ok(serde_json::to_string(projection)?)
}

pub fn to_json_pretty(projection: &Projection) -> Result<String> {
    Ok(serde_json::to_string_pretty(projection)?)
}

/// JSON safe to place inside a `<script>` element. `<` only occurs inside
/// strings, and `\u003c` parses back to the same character, so no `</script>`
/// or `<!--` can reach the HTML tokenizer.
pub fn to_script_json(projection: &Projection) -> Result<String> {
    Ok(to_json(projection)?.replace('<', "\\u003c"))
}
