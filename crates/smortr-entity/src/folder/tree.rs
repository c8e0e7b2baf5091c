//! Arena-backed folder hierarchy.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::path::FolderPath;

/// Identifier of a folder within one [`FolderTree`].
///
/// Identifiers are arena slots and are never reused, since folders are not
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(usize);

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "folder-{}", self.0)
    }
}

/// A node in the folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Display label.
    pub name: String,
    /// Names from the root down to this node, ending with `name`.
    pub path: FolderPath,
    /// Parent folder (None for roots).
    pub parent: Option<FolderId>,
    /// Child folders in display order.
    pub children: Vec<FolderId>,
}

impl FolderNode {
    /// Depth level (0 for roots).
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A folder hierarchy stored as an arena of nodes with parent links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "StoredTree")]
pub struct FolderTree {
    nodes: Vec<FolderNode>,
    roots: Vec<FolderId>,
    /// First node registered for each path. Sibling folders may share a
    /// name, in which case lookups resolve to the earliest one.
    #[serde(skip)]
    by_path: HashMap<FolderPath, FolderId>,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The template every new project starts from.
    pub fn default_template() -> Self {
        let mut tree = Self::empty();
        let level = tree.add_root("Level 01 - First floor");
        for discipline in ["Architectural", "Structural"] {
            if let Some(id) = tree.add_child(level, discipline) {
                tree.add_child(id, "Plan drawings");
            }
        }
        tree
    }

    /// Append a new root folder.
    pub fn add_root(&mut self, name: &str) -> FolderId {
        let id = self.insert(None, FolderPath::root().child(name), name);
        self.roots.push(id);
        id
    }

    /// Append a child folder under `parent`. Returns `None` if `parent`
    /// is not part of this tree.
    pub fn add_child(&mut self, parent: FolderId, name: &str) -> Option<FolderId> {
        let path = self.get(parent)?.path.child(name);
        let id = self.insert(Some(parent), path, name);
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    fn insert(&mut self, parent: Option<FolderId>, path: FolderPath, name: &str) -> FolderId {
        let id = FolderId(self.nodes.len());
        self.by_path.entry(path.clone()).or_insert(id);
        self.nodes.push(FolderNode {
            id,
            name: name.to_string(),
            path,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Look up a folder by ID.
    pub fn get(&self, id: FolderId) -> Option<&FolderNode> {
        self.nodes.get(id.0)
    }

    /// Resolve a path to the folder it addresses.
    pub fn find_by_path(&self, path: &FolderPath) -> Option<FolderId> {
        self.by_path.get(path).copied()
    }

    /// Root folders in display order.
    pub fn roots(&self) -> &[FolderId] {
        &self.roots
    }

    /// Total number of folders in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no folders.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in depth-first display order.
    pub fn walk(&self) -> Vec<&FolderNode> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<FolderId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

}

/// Serialized form of a [`FolderTree`]; the path index is rebuilt on load.
#[derive(Deserialize)]
struct StoredTree {
    nodes: Vec<FolderNode>,
    roots: Vec<FolderId>,
}

impl From<StoredTree> for FolderTree {
    fn from(stored: StoredTree) -> Self {
        let mut by_path = HashMap::with_capacity(stored.nodes.len());
        for node in &stored.nodes {
            by_path.entry(node.path.clone()).or_insert(node.id);
        }
        Self {
            nodes: stored.nodes,
            roots: stored.roots,
            by_path,
        }
    }
}
