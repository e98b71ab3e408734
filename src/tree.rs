use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

pub type Children = BTreeMap<String, TreeNode>;

/// One filesystem entry from the `du` listing.
///
/// A node can carry a size and children at the same time: `du` prints a line
/// for a directory itself as well as lines for its contents.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// The raw size token, carried through verbatim.
    pub size: Option<String>,
    pub children: Children,
}

impl TreeNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn count(&self) -> usize {
        1 + self.children.values().map(TreeNode::count).sum::<usize>()
    }
}

/// The anonymous root. Holds the top-level entries and has no size of its own.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DuTree {
    pub children: Children,
}

impl DuTree {
    /// Looks up a node by `/`-delimited path. Leading slashes are ignored, the
    /// same way they are when the tree is built.
    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return None;
        }

        let mut components = path.split('/');
        let mut current = self.children.get(components.next()?)?;
        for component in components {
            current = current.children.get(component)?;
        }
        Some(current)
    }

    /// Number of nodes in the tree, not counting the root.
    pub fn node_count(&self) -> usize {
        self.children.values().map(TreeNode::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A line that survived filtering, split into its size token and path
/// components.
#[derive(Debug, PartialEq, Eq)]
pub struct DuEntry<'a> {
    pub size: &'a str,
    pub components: Vec<&'a str>,
}

/// Parses one line of `du` output. Returns `None` for blank lines, known
/// noise, and anything not shaped like `<size>\t<path>`.
pub fn parse_line(line: &str) -> Option<DuEntry<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Noise printed by `nohup du ... &`.
    if line.contains("ignoring") || line.starts_with("nohup:") {
        return None;
    }

    let (size, path) = line.split_once('\t')?;
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }

    Some(DuEntry {
        size,
        components: path.split('/').collect(),
    })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub accepted: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: DuTree,
    stats: ParseStats,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw line. Returns `true` if it contributed to the tree.
    pub fn push_line(&mut self, line: &str) -> bool {
        match parse_line(line) {
            Some(entry) => {
                self.insert(entry);
                self.stats.accepted += 1;
                true
            }
            None => {
                log::trace!("skipping line {line:?}");
                self.stats.skipped += 1;
                false
            }
        }
    }

    fn insert(&mut self, entry: DuEntry<'_>) {
        let Some((leaf, parents)) = entry.components.split_last() else {
            return;
        };

        let mut children = &mut self.tree.children;
        for component in parents {
            children = &mut children
                .entry(component.to_string())
                .or_default()
                .children;
        }

        // Last write wins when the same path shows up twice.
        children.entry(leaf.to_string()).or_default().size = Some(entry.size.to_string());
    }

    pub fn finish(self) -> (DuTree, ParseStats) {
        (self.tree, self.stats)
    }
}

pub fn build_tree<I, S>(lines: I) -> DuTree
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TreeBuilder::new();
    for line in lines {
        builder.push_line(line.as_ref());
    }
    builder.finish().0
}

/// Reads a `du` listing from disk. Failing to read the file is fatal;
/// malformed lines inside it are not.
pub fn read_du_file(path: &Path) -> Result<(DuTree, ParseStats)> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let mut builder = TreeBuilder::new();
    for line in contents.lines() {
        builder.push_line(line);
    }
    Ok(builder.finish())
}
