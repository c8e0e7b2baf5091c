//! The folder tree shown while staging files for a new project.

use std::collections::HashSet;

use tracing::debug;

use smortr_core::config::ProjectConfig;
use smortr_core::types::FileId;
use smortr_entity::file::{FileHandle, StagedFile};
use smortr_entity::folder::{FolderId, FolderPath, FolderTree};
use smortr_entity::project::ProjectDraft;

use super::drag::{DragState, DragTransition};

/// One displayed line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Folder ID.
    pub id: FolderId,
    /// Nesting level (0 for roots).
    pub depth: usize,
    /// Folder name.
    pub name: String,
    /// Whether the folder's children are shown.
    pub expanded: bool,
    /// Number of files staged directly in the folder.
    pub file_count: usize,
}

/// Folder hierarchy plus its display state.
///
/// Staged files are owned by the [`ProjectDraft`]; the tree only decides
/// which path a file is assigned to.
#[derive(Debug, Clone)]
pub struct FileTree {
    folders: FolderTree,
    expanded: HashSet<FolderId>,
    selected: Option<FolderId>,
    drag_over: Option<FolderId>,
    drag: DragState,
    drop_fallback: FolderPath,
}

impl FileTree {
    /// Wrap a folder hierarchy. The first root starts expanded.
    pub fn new(folders: FolderTree, drop_fallback: FolderPath) -> Self {
        let expanded = folders.roots().first().copied().into_iter().collect();
        Self {
            folders,
            expanded,
            selected: None,
            drag_over: None,
            drag: DragState::new(),
            drop_fallback,
        }
    }

    /// The default project template with the configured drop fallback.
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self::new(
            FolderTree::default_template(),
            FolderPath::from_segments(config.drop_fallback_path.iter().cloned()),
        )
    }

    /// The underlying folder hierarchy.
    pub fn folders(&self) -> &FolderTree {
        &self.folders
    }

    /// Whether the folder's children are shown.
    pub fn is_expanded(&self, id: FolderId) -> bool {
        self.expanded.contains(&id)
    }

    /// Flip a folder between expanded and collapsed. Returns the new state.
    pub fn toggle_expand(&mut self, id: FolderId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    /// Toggle a folder and make it the selected one.
    pub fn select(&mut self, id: FolderId) {
        if self.folders.get(id).is_some() {
            self.toggle_expand(id);
            self.selected = Some(id);
        }
    }

    /// The selected folder, if any.
    pub fn selected(&self) -> Option<FolderId> {
        self.selected
    }

    /// Create a folder named `name` under the folder at `parent_path`.
    ///
    /// An empty `parent_path` creates a root. Returns `None` without
    /// changing anything when `name` is blank or the parent does not exist.
    /// Sibling names are not required to be unique.
    pub fn add_folder(&mut self, parent_path: &FolderPath, name: &str) -> Option<FolderId> {
        if name.trim().is_empty() {
            return None;
        }
        let id = if parent_path.is_empty() {
            self.folders.add_root(name)
        } else {
            let parent = self.folders.find_by_path(parent_path)?;
            self.folders.add_child(parent, name)?
        };
        self.expanded.insert(id);
        debug!(folder = %id, parent = %parent_path, name, "Added folder");
        Some(id)
    }

    /// Stage every file in `files` at `target_path`, in order.
    ///
    /// Files with duplicate names are kept as separate entries. Returns
    /// the number of files staged.
    pub fn stage_files(
        &self,
        draft: &mut ProjectDraft,
        files: Vec<FileHandle>,
        target_path: &FolderPath,
    ) -> usize {
        let count = files.len();
        draft.add_files(
            files
                .into_iter()
                .map(|file| StagedFile::new(file, target_path.clone())),
        );
        count
    }

    /// Remove the staged entry for file `id`.
    pub fn unstage_file(&self, draft: &mut ProjectDraft, id: FileId) -> Option<StagedFile> {
        draft.unstage_file(id)
    }

    /// Files staged directly in folder `id`.
    pub fn files_in_folder<'d>(&self, draft: &'d ProjectDraft, id: FolderId) -> Vec<&'d StagedFile> {
        match self.folders.get(id) {
            Some(node) => draft.files_in_folder(&node.path),
            None => Vec::new(),
        }
    }

    /// Drag entered the tree area.
    pub fn drag_enter(&mut self) -> DragTransition {
        self.drag.enter()
    }

    /// Drag left the tree area.
    pub fn drag_leave(&mut self) -> DragTransition {
        self.drag.leave()
    }

    /// Drag moved over folder `id`; collapsed folders expand.
    pub fn drag_enter_folder(&mut self, id: FolderId) {
        if self.folders.get(id).is_none() {
            return;
        }
        self.drag_over = Some(id);
        self.expanded.insert(id);
    }

    /// Drag left the highlighted folder.
    pub fn drag_leave_folder(&mut self) {
        self.drag_over = None;
    }

    /// The folder currently highlighted as a drop target.
    pub fn drag_over(&self) -> Option<FolderId> {
        self.drag_over
    }

    /// Whether the drop overlay is visible.
    pub fn overlay_visible(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Handle a drop of `files` and return the path they were staged at.
    ///
    /// The target is the folder under the pointer, then the highlighted
    /// folder, then the selected folder, then the fallback path. The drag
    /// state is reset regardless of how many leave events were missed.
    pub fn drop_files(
        &mut self,
        draft: &mut ProjectDraft,
        files: Vec<FileHandle>,
        hovered: Option<FolderId>,
    ) -> FolderPath {
        let target = [hovered, self.drag_over, self.selected]
            .into_iter()
            .flatten()
            .find_map(|id| self.folders.get(id))
            .map(|node| node.path.clone())
            .unwrap_or_else(|| self.drop_fallback.clone());

        self.drag.drop_files();
        self.drag_over = None;

        if !files.is_empty() {
            self.stage_files(draft, files, &target);
        }
        target
    }

    /// Rows for every folder whose ancestors are all expanded.
    pub fn visible_rows(&self, draft: &ProjectDraft) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<FolderId> = self.folders.roots().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.folders.get(id) else {
                continue;
            };
            let expanded = self.is_expanded(id);
            rows.push(TreeRow {
                id,
                depth: node.depth(),
                name: node.name.clone(),
                expanded,
                file_count: draft.files_in_folder(&node.path).len(),
            });
            if expanded {
                stack.extend(node.children.iter().rev());
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tree() -> FileTree {
        FileTree::from_config(&ProjectConfig::default())
    }

    fn path(segments: &[&str]) -> FolderPath {
        FolderPath::from_segments(segments.iter().copied())
    }

    fn pdf(name: &str) -> FileHandle {
        FileHandle::new(name, "application/pdf", name.as_bytes().to_vec())
    }

    #[test]
    fn test_first_root_starts_expanded() {
        let tree = tree();
        let root = tree.folders().roots()[0];
        assert!(tree.is_expanded(root));
        let rows = tree.visible_rows(&ProjectDraft::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].name, "Architectural");
    }

    #[test]
    fn test_toggle_expand_hides_children() {
        let mut tree = tree();
        let root = tree.folders().roots()[0];
        assert!(!tree.toggle_expand(root));
        assert_eq!(tree.visible_rows(&ProjectDraft::default()).len(), 1);
        assert!(tree.toggle_expand(root));
    }

    #[test]
    fn test_add_folder_under_existing_parent() {
        let mut tree = tree();
        let parent = path(&["Level 01 - First floor", "Architectural"]);
        let id = tree.add_folder(&parent, "Sections").unwrap();

        let node = tree.folders().get(id).unwrap();
        assert_eq!(node.path, parent.child("Sections"));
        assert!(tree.is_expanded(id));
    }

    #[test]
    fn test_add_folder_noop_cases() {
        let mut tree = tree();
        let before = tree.folders().len();
        assert!(tree.add_folder(&path(&["Missing"]), "X").is_none());
        assert!(tree.add_folder(&path(&["Level 01 - First floor"]), "").is_none());
        assert!(tree.add_folder(&path(&["Level 01 - First floor"]), "  ").is_none());
        assert_eq!(tree.folders().len(), before);
    }

    #[test]
    fn test_add_root_folder() {
        let mut tree = tree();
        let id = tree.add_folder(&FolderPath::root(), "Level 02").unwrap();
        assert_eq!(tree.folders().get(id).unwrap().path, path(&["Level 02"]));
        assert_eq!(tree.folders().roots().len(), 2);
    }

    #[test]
    fn test_sibling_names_may_repeat() {
        let mut tree = tree();
        let parent = path(&["Level 01 - First floor"]);
        let a = tree.add_folder(&parent, "MEP").unwrap();
        let b = tree.add_folder(&parent, "MEP").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stage_files_keeps_order_and_duplicates() {
        let tree = tree();
        let mut draft = ProjectDraft::default();
        let target = path(&["Level 01 - First floor", "Architectural"]);
        let f1 = pdf("plan.pdf");
        let f2 = pdf("plan.pdf");

        let staged = tree.stage_files(&mut draft, vec![f1.clone(), f2.clone()], &target);
        assert_eq!(staged, 2);

        let id = tree.folders().find_by_path(&target).unwrap();
        let members: Vec<_> = tree
            .files_in_folder(&draft, id)
            .into_iter()
            .map(|s| s.file.clone())
            .collect();
        assert_eq!(members, vec![f1, f2]);
    }

    #[test]
    fn test_nested_file_not_in_parent() {
        let tree = tree();
        let mut draft = ProjectDraft::default();
        let child = path(&["Level 01 - First floor", "Architectural"]);
        tree.stage_files(&mut draft, vec![pdf("a.pdf")], &child);

        let root = tree.folders().roots()[0];
        assert!(tree.files_in_folder(&draft, root).is_empty());
    }

    #[test]
    fn test_unstage_removes_exactly_one() {
        let tree = tree();
        let mut draft = ProjectDraft::default();
        let target = path(&["Level 01 - First floor"]);
        let keep = pdf("same.pdf");
        let remove = pdf("same.pdf");
        tree.stage_files(&mut draft, vec![keep.clone(), remove.clone()], &target);

        assert!(tree.unstage_file(&mut draft, remove.id).is_some());
        assert_eq!(draft.files.len(), 1);
        assert_eq!(draft.files[0].file, keep);
    }

    #[test]
    fn test_drop_resolves_hovered_folder_and_resets_drag() {
        let mut tree = tree();
        let mut draft = ProjectDraft::default();
        let target = path(&["Level 01 - First floor", "Structural"]);
        let id = tree.folders().find_by_path(&target).unwrap();

        tree.drag_enter();
        tree.drag_enter();
        tree.drag_enter_folder(id);
        assert!(tree.overlay_visible());

        let dropped_at = tree.drop_files(&mut draft, vec![pdf("s.pdf")], Some(id));
        assert_eq!(dropped_at, target);
        assert!(!tree.overlay_visible());
        assert_eq!(tree.drag_over(), None);
        assert_eq!(draft.files_in_folder(&target).len(), 1);
    }

    #[test]
    fn test_drop_falls_back_to_highlight_then_selection_then_uploads() {
        let mut tree = tree();
        let mut draft = ProjectDraft::default();

        let dropped_at = tree.drop_files(&mut draft, vec![pdf("u.pdf")], None);
        assert_eq!(dropped_at, path(&["uploads"]));

        let arch = tree
            .folders()
            .find_by_path(&path(&["Level 01 - First floor", "Architectural"]))
            .unwrap();
        tree.select(arch);
        let dropped_at = tree.drop_files(&mut draft, vec![pdf("v.pdf")], None);
        assert_eq!(dropped_at, path(&["Level 01 - First floor", "Architectural"]));

        let root = tree.folders().roots()[0];
        tree.drag_enter_folder(root);
        let dropped_at = tree.drop_files(&mut draft, vec![pdf("w.pdf")], None);
        assert_eq!(dropped_at, path(&["Level 01 - First floor"]));
        assert_eq!(draft.files.len(), 3);
    }

    #[test]
    fn test_drag_over_expands_collapsed_folder() {
        let mut tree = tree();
        let root = tree.folders().roots()[0];
        tree.toggle_expand(root);
        tree.drag_enter_folder(root);
        assert!(tree.is_expanded(root));
        tree.drag_leave_folder();
        assert_eq!(tree.drag_over(), None);
    }

    proptest! {
        #[test]
        fn prop_added_paths_extend_parent(
            picks in prop::collection::vec((any::<prop::sample::Index>(), "[A-Za-z0-9 ]{1,12}"), 1..30)
        ) {
            let mut tree = tree();
            for (pick, name) in picks {
                let nodes = tree.folders().walk();
                let parent = nodes[pick.index(nodes.len())].path.clone();
                tree.add_folder(&parent, &name);
            }
            for node in tree.folders().walk() {
                match node.parent {
                    Some(parent) => {
                        let parent = tree.folders().get(parent).unwrap();
                        prop_assert_eq!(&node.path, &parent.path.child(&node.name));
                    }
                    None => prop_assert_eq!(node.path.len(), 1),
                }
            }
        }
    }
}
