//! In-memory file tree with per-node selection and expansion flags.
//!
//! Nodes are shared through `Arc`; every mutation copies the nodes on the
//! path it edits (`Arc::make_mut`), so a clone of the tree taken earlier is a
//! stable snapshot. Path-addressed operations validate the path before they
//! touch anything, so a failed call leaves the tree as it was.

mod node;

pub use node::{FileNode, NodeKind, SelectionState};

use crate::context::types::ScannedFile;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Directory segments that mark everything beneath them as test code.
const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "spec"];
/// File-name fragments that mark a test file.
const TEST_INFIXES: &[&str] = &[".test.", ".spec.", "_test."];

/// Whether `path` names a test file by directory or file-name convention.
pub fn is_test_path(path: &str) -> bool {
    let mut segments: Vec<&str> = path.split('/').collect();
    let Some(name) = segments.pop() else {
        return false;
    };
    segments.iter().any(|s| TEST_DIRS.contains(s))
        || TEST_INFIXES.iter().any(|m| name.contains(m))
        || name.starts_with("test_")
}

#[derive(Default)]
struct Builder {
    dirs: BTreeMap<String, Builder>,
    files: BTreeMap<String, ScannedFile>,
}

impl Builder {
    fn insert(
        &mut self,
        file: ScannedFile,
    ) {
        let parts: Vec<String> = file
            .path
            .split('/')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        let Some((name, dirs)) = parts.split_last() else {
            return;
        };
        let mut node = self;
        for dir in dirs {
            node = node.dirs.entry(dir.clone()).or_default();
        }
        node.files.insert(name.clone(), file);
    }

    fn into_nodes(
        self,
        prefix: &str,
        top_level: bool,
    ) -> Vec<Arc<FileNode>> {
        let mut nodes = Vec::with_capacity(self.dirs.len() + self.files.len());
        for (name, sub) in self.dirs {
            let path = join(prefix, &name);
            let children = sub.into_nodes(&path, false);
            nodes.push(Arc::new(FileNode::dir(name, path, children, top_level)));
        }
        for (name, file) in self.files {
            nodes.push(Arc::new(FileNode::leaf(name, file)));
        }
        nodes
    }
}

fn join(
    prefix: &str,
    name: &str,
) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

fn parent_of(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

fn find_in<'a>(
    nodes: &'a [Arc<FileNode>],
    segments: &[&str],
) -> Option<&'a FileNode> {
    let (first, rest) = segments.split_first()?;
    let node = nodes.iter().find(|n| n.name == *first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        find_in(node.children(), rest)
    }
}

fn find_in_mut<'a>(
    nodes: &'a mut [Arc<FileNode>],
    segments: &[&str],
) -> Option<&'a mut FileNode> {
    let (first, rest) = segments.split_first()?;
    let node = Arc::make_mut(nodes.iter_mut().find(|n| n.name == *first)?);
    if rest.is_empty() {
        return Some(node);
    }
    find_in_mut(node.children_mut()?, rest)
}

/// The selection forest. `Clone` is cheap and yields an independent snapshot.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    roots: Vec<Arc<FileNode>>,
}

impl FileTree {
    /// Builds the forest: directories before files, each alphabetical; every
    /// node selected; top-level directories expanded.
    pub fn from_files(files: Vec<ScannedFile>) -> Self {
        let mut builder = Builder::default();
        for file in files {
            builder.insert(file);
        }
        FileTree {
            roots: builder.into_nodes("", true),
        }
    }

    pub fn roots(&self) -> &[Arc<FileNode>] {
        &self.roots
    }

    pub fn get(
        &self,
        path: &str,
    ) -> Option<&FileNode> {
        let segments: Vec<&str> = path.split('/').collect();
        find_in(&self.roots, &segments)
    }

    /// Copy-on-write access to the node at `path`, after checking it exists.
    fn node_mut(
        &mut self,
        path: &str,
    ) -> Result<&mut FileNode> {
        if self.get(path).is_none() {
            return Err(Error::PathNotFound(path.to_string()));
        }
        let segments: Vec<&str> = path.split('/').collect();
        find_in_mut(&mut self.roots, &segments)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))
    }

    fn for_each_root(
        &mut self,
        mut f: impl FnMut(&mut FileNode),
    ) {
        for root in &mut self.roots {
            f(Arc::make_mut(root));
        }
    }

    /// Leaf: flips its flag. Directory: selects everything beneath it unless
    /// every leaf is already selected, in which case it clears everything.
    pub fn toggle_selection(
        &mut self,
        path: &str,
    ) -> Result<()> {
        let node = self.node_mut(path)?;
        if node.is_dir() {
            let next = !node.all_leaves_selected();
            node.set_selected_deep(next);
        } else {
            node.selected = !node.selected;
        }
        Ok(())
    }

    pub fn select_all(&mut self) {
        self.for_each_root(|n| n.set_selected_deep(true));
    }

    pub fn deselect_all(&mut self) {
        self.for_each_root(|n| n.set_selected_deep(false));
    }

    /// Flips every leaf; directory flags are left alone.
    pub fn invert_selection(&mut self) {
        self.for_each_root(|n| {
            n.for_each_leaf_mut(&mut |leaf: &mut FileNode| leaf.selected = !leaf.selected)
        });
    }

    /// Directories only; toggling a leaf does nothing.
    pub fn toggle_expand(
        &mut self,
        path: &str,
    ) -> Result<()> {
        let node = self.node_mut(path)?;
        if node.is_dir() {
            node.expanded = !node.expanded;
        }
        Ok(())
    }

    pub fn expand_all(&mut self) {
        self.for_each_root(|n| n.set_expanded_deep(true));
    }

    pub fn collapse_all(&mut self) {
        self.for_each_root(|n| n.set_expanded_deep(false));
    }

    /// Toggles the directory at `path`, or the directory containing the leaf
    /// at `path`, as a unit of its direct children: if any child is selected
    /// (a child directory counts when any leaf beneath it is), the directory
    /// and its children are cleared, otherwise they are all set. Grandchildren
    /// keep their flags.
    pub fn toggle_current_directory(
        &mut self,
        path: &str,
    ) -> Result<()> {
        let node = self
            .get(path)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        let dir_path = if node.is_dir() {
            path.to_string()
        } else {
            parent_of(path)
                .ok_or_else(|| Error::NotADirectory(path.to_string()))?
                .to_string()
        };

        let dir = self.node_mut(&dir_path)?;
        // flags of direct children only, the same flags written below
        let any_selected = dir.children().iter().any(|c| c.selected);
        let next = !any_selected;
        dir.selected = next;
        if let Some(children) = dir.children_mut() {
            for child in children {
                Arc::make_mut(child).selected = next;
            }
        }
        Ok(())
    }

    /// Flips every leaf that looks like a test file.
    pub fn toggle_test_files(&mut self) {
        self.for_each_root(|n| {
            n.for_each_leaf_mut(&mut |leaf: &mut FileNode| {
                if is_test_path(&leaf.path) {
                    leaf.selected = !leaf.selected;
                }
            })
        });
    }

    /// Visible rows in pre-order with their depth; children of collapsed
    /// directories are skipped.
    pub fn flatten(&self) -> Vec<(&FileNode, usize)> {
        fn walk<'a>(
            nodes: &'a [Arc<FileNode>],
            depth: usize,
            out: &mut Vec<(&'a FileNode, usize)>,
        ) {
            for node in nodes {
                out.push((node, depth));
                if node.is_dir() && node.expanded {
                    walk(node.children(), depth + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, 0, &mut out);
        out
    }

    /// A leaf's flag, or for a directory whether all of its leaves are
    /// selected.
    pub fn is_selected(
        &self,
        path: &str,
    ) -> Result<bool> {
        self.get(path)
            .map(FileNode::all_leaves_selected)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))
    }

    pub fn selected_count(&self) -> usize {
        self.roots.iter().map(|r| r.selected_leaves()).sum()
    }

    pub fn selected_tokens(&self) -> usize {
        self.roots.iter().map(|r| r.selected_tokens()).sum()
    }

    pub fn leaf_count(&self) -> usize {
        self.roots.iter().map(|r| r.file_count()).sum()
    }

    pub fn total_tokens(&self) -> usize {
        self.roots.iter().map(|r| r.tokens()).sum()
    }

    /// Selected leaves' files in tree order.
    pub fn selected_files(&self) -> Vec<ScannedFile> {
        fn collect(
            nodes: &[Arc<FileNode>],
            out: &mut Vec<ScannedFile>,
        ) {
            for node in nodes {
                match &node.kind {
                    NodeKind::File { file } if node.selected => out.push(ScannedFile::clone(file)),
                    NodeKind::File { .. } => {}
                    NodeKind::Dir { children } => collect(children, out),
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.roots, &mut out);
        out
    }

    /// A new tree with the leaves matching `keep` and the directories that
    /// lead to them, all expanded. Flags are carried over.
    pub fn filtered(
        &self,
        keep: impl Fn(&FileNode) -> bool,
    ) -> FileTree {
        fn prune(
            nodes: &[Arc<FileNode>],
            keep: &dyn Fn(&FileNode) -> bool,
        ) -> Vec<Arc<FileNode>> {
            let mut out = Vec::new();
            for node in nodes {
                match &node.kind {
                    NodeKind::File { .. } => {
                        if keep(node) {
                            out.push(Arc::clone(node));
                        }
                    }
                    NodeKind::Dir { children } => {
                        let kept = prune(children, keep);
                        if !kept.is_empty() {
                            let mut dir = FileNode::clone(node);
                            dir.kind = NodeKind::Dir { children: kept };
                            dir.expanded = true;
                            out.push(Arc::new(dir));
                        }
                    }
                }
            }
            out
        }
        FileTree {
            roots: prune(&self.roots, &keep),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(paths: &[(&str, usize)]) -> FileTree {
        FileTree::from_files(
            paths
                .iter()
                .map(|(p, t)| ScannedFile::with_tokens(*p, "", *t))
                .collect(),
        )
    }

    fn sample() -> FileTree {
        tree(&[
            ("src/main.ts", 10),
            ("src/util/math.ts", 5),
            ("src/util/math.test.ts", 3),
            ("tests/e2e.ts", 7),
            ("README.md", 2),
        ])
    }

    fn rows(tree: &FileTree) -> Vec<String> {
        tree.flatten()
            .into_iter()
            .map(|(n, depth)| format!("{}{}", "  ".repeat(depth), n.name))
            .collect()
    }

    #[test]
    fn builds_sorted_forest_all_selected() {
        let tree = sample();
        assert_eq!(
            rows(&tree),
            ["src", "  util", "  main.ts", "tests", "  e2e.ts", "README.md"]
        );
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.selected_count(), 5);
        assert_eq!(tree.selected_tokens(), 27);
        assert_eq!(tree.get("src/util").unwrap().path, "src/util");
        assert!(!tree.get("src/util").unwrap().expanded);
    }

    #[test]
    fn toggle_leaf_and_directory() {
        let mut tree = sample();
        tree.toggle_selection("src/main.ts").unwrap();
        assert!(!tree.is_selected("src/main.ts").unwrap());
        assert!(!tree.is_selected("src").unwrap());
        assert_eq!(tree.get("src").unwrap().selection_state(), SelectionState::Partial);

        // partially selected directory becomes fully selected
        tree.toggle_selection("src").unwrap();
        assert!(tree.is_selected("src").unwrap());
        tree.toggle_selection("src").unwrap();
        assert_eq!(tree.get("src").unwrap().selection_state(), SelectionState::None);
        assert_eq!(tree.selected_count(), 2);
    }

    #[test]
    fn unknown_path_leaves_tree_untouched() {
        let mut tree = sample();
        let before = tree.clone();
        assert!(matches!(
            tree.toggle_selection("src/nope.ts"),
            Err(Error::PathNotFound(p)) if p == "src/nope.ts"
        ));
        assert!(tree.toggle_expand("nope").is_err());
        assert!(tree.is_selected("src/main.ts/x").is_err());
        assert_eq!(rows(&tree), rows(&before));
        assert_eq!(tree.selected_count(), before.selected_count());
    }

    #[test]
    fn toggle_current_directory_flips_direct_children() {
        let mut tree = tree(&[("src/a.ts", 1), ("src/b.ts", 1)]);
        tree.toggle_selection("src/b.ts").unwrap();

        tree.toggle_current_directory("src/a.ts").unwrap();
        assert!(!tree.is_selected("src/a.ts").unwrap());
        assert!(!tree.is_selected("src/b.ts").unwrap());

        tree.toggle_current_directory("src/a.ts").unwrap();
        assert!(tree.is_selected("src/a.ts").unwrap());
        assert!(tree.is_selected("src/b.ts").unwrap());
    }

    #[test]
    fn toggle_current_directory_keeps_grandchildren() {
        let mut tree = sample();
        tree.toggle_current_directory("src").unwrap();
        assert!(!tree.is_selected("src/main.ts").unwrap());
        assert!(!tree.get("src/util").unwrap().selected);
        // leaves under src/util are not direct children
        assert!(tree.is_selected("src/util/math.ts").unwrap());
        assert!(matches!(
            tree.toggle_current_directory("README.md"),
            Err(Error::NotADirectory(_))
        ));
    }

    #[test]
    fn toggle_current_directory_round_trips_over_subdirectories() {
        let mut tree = tree(&[("pkg/sub/x.ts", 1)]);
        tree.toggle_current_directory("pkg").unwrap();
        assert!(!tree.get("pkg").unwrap().selected);
        assert!(!tree.get("pkg/sub").unwrap().selected);

        tree.toggle_current_directory("pkg").unwrap();
        assert!(tree.get("pkg").unwrap().selected);
        assert!(tree.get("pkg/sub").unwrap().selected);

        tree.toggle_current_directory("pkg").unwrap();
        assert!(!tree.get("pkg/sub").unwrap().selected);
        // the leaf is a grandchild and keeps its flag
        assert_eq!(tree.selected_count(), 1);
    }

    #[test]
    fn invert_twice_restores_selection() {
        let mut tree = sample();
        tree.toggle_selection("tests/e2e.ts").unwrap();
        let before: Vec<bool> = tree.flatten().iter().map(|(n, _)| n.selected).collect();
        tree.invert_selection();
        assert_eq!(tree.selected_count(), 1);
        tree.invert_selection();
        let after: Vec<bool> = tree.flatten().iter().map(|(n, _)| n.selected).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn bulk_selection() {
        let mut tree = sample();
        tree.deselect_all();
        assert_eq!(tree.selected_count(), 0);
        assert!(tree.flatten().iter().all(|(n, _)| !n.selected));
        tree.select_all();
        assert_eq!(tree.selected_count(), 5);
    }

    #[test]
    fn toggles_test_files() {
        let mut tree = sample();
        tree.toggle_test_files();
        let selected: Vec<String> = tree.selected_files().into_iter().map(|f| f.path).collect();
        assert_eq!(selected, ["src/util/math.ts", "src/main.ts", "README.md"]);
    }

    #[test]
    fn test_markers() {
        assert!(is_test_path("pkg/__tests__/a.js"));
        assert!(is_test_path("spec/models/user.rb"));
        assert!(is_test_path("app/b.spec.ts"));
        assert!(is_test_path("store_test.go"));
        assert!(is_test_path("test_io.py"));
        assert!(!is_test_path("src/testing.rs"));
        assert!(!is_test_path("latest.ts"));
    }

    #[test]
    fn expansion() {
        let mut tree = sample();
        tree.toggle_expand("src/util").unwrap();
        assert!(rows(&tree).contains(&"    math.test.ts".to_string()));
        tree.toggle_expand("src/main.ts").unwrap();
        tree.collapse_all();
        assert_eq!(rows(&tree), ["src", "tests", "README.md"]);
        tree.expand_all();
        assert_eq!(tree.flatten().len(), 8);
    }

    #[test]
    fn clones_are_snapshots() {
        let mut tree = sample();
        let snapshot = tree.clone();
        tree.toggle_selection("src/util/math.ts").unwrap();
        // only the edited path is copied
        assert!(!Arc::ptr_eq(&tree.roots[0], &snapshot.roots[0]));
        assert!(Arc::ptr_eq(&tree.roots[1], &snapshot.roots[1]));

        tree.collapse_all();
        assert!(snapshot.is_selected("src/util/math.ts").unwrap());
        assert!(snapshot.get("src").unwrap().expanded);
        assert_eq!(snapshot.selected_count(), 5);
    }

    #[test]
    fn filtered_keeps_ancestors_expanded() {
        let mut tree = sample();
        tree.toggle_selection("src/util/math.ts").unwrap();
        let found = tree.filtered(|n| n.name.contains("math"));
        assert_eq!(
            rows(&found),
            ["src", "  util", "    math.test.ts", "    math.ts"]
        );
        assert!(!found.is_selected("src/util/math.ts").unwrap());
        assert_eq!(found.leaf_count(), 2);
    }

    #[test]
    fn selection_state_reports_leaves() {
        let mut tree = sample();
        assert_eq!(tree.get("tests").unwrap().selection_state(), SelectionState::All);
        tree.toggle_selection("tests/e2e.ts").unwrap();
        assert_eq!(tree.get("tests").unwrap().selection_state(), SelectionState::None);
        assert_eq!(tree.get("src").unwrap().file_count(), 3);
        assert_eq!(tree.get("src").unwrap().total_tokens(), 18);
    }
}
