use crate::context::types::ScannedFile;
use std::sync::Arc;

/// Aggregate mark of a node, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    All,
    Partial,
    None,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Dir { children: Vec<Arc<FileNode>> },
    File { file: Arc<ScannedFile> },
}

/// One entry of the selection tree.
///
/// A leaf's `selected` flag is authoritative. A directory's own flag is only
/// written by bulk operations; ask [`FileNode::selection_state`] for what its
/// leaves actually say.
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    /// Slash-joined chain of names from the top level; unique in a tree.
    pub path: String,
    pub kind: NodeKind,
    pub selected: bool,
    pub expanded: bool,
}

impl FileNode {
    pub(crate) fn dir(
        name: String,
        path: String,
        children: Vec<Arc<FileNode>>,
        expanded: bool,
    ) -> Self {
        FileNode {
            name,
            path,
            kind: NodeKind::Dir { children },
            selected: true,
            expanded,
        }
    }

    pub(crate) fn leaf(
        name: String,
        file: ScannedFile,
    ) -> Self {
        FileNode {
            name,
            path: file.path.clone(),
            kind: NodeKind::File {
                file: Arc::new(file),
            },
            selected: true,
            expanded: false,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Dir { .. })
    }

    pub fn children(&self) -> &[Arc<FileNode>] {
        match &self.kind {
            NodeKind::Dir { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Arc<FileNode>>> {
        match &mut self.kind {
            NodeKind::Dir { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub fn file(&self) -> Option<&ScannedFile> {
        match &self.kind {
            NodeKind::File { file } => Some(file),
            NodeKind::Dir { .. } => None,
        }
    }

    /// Leaf token count, or the sum over every leaf beneath a directory.
    pub fn tokens(&self) -> usize {
        match &self.kind {
            NodeKind::File { file } => file.tokens(),
            NodeKind::Dir { children } => children.iter().map(|c| c.tokens()).sum(),
        }
    }

    pub fn total_tokens(&self) -> usize {
        self.tokens()
    }

    /// Leaves at or below this node.
    pub fn file_count(&self) -> usize {
        match &self.kind {
            NodeKind::File { .. } => 1,
            NodeKind::Dir { children } => children.iter().map(|c| c.file_count()).sum(),
        }
    }

    pub(crate) fn selected_leaves(&self) -> usize {
        match &self.kind {
            NodeKind::File { .. } => usize::from(self.selected),
            NodeKind::Dir { children } => children.iter().map(|c| c.selected_leaves()).sum(),
        }
    }

    pub(crate) fn selected_tokens(&self) -> usize {
        match &self.kind {
            NodeKind::File { file } if self.selected => file.tokens(),
            NodeKind::File { .. } => 0,
            NodeKind::Dir { children } => children.iter().map(|c| c.selected_tokens()).sum(),
        }
    }

    /// A leaf's own flag; for a directory, whether every leaf beneath it is
    /// selected (vacuously true when it has none).
    pub fn all_leaves_selected(&self) -> bool {
        match &self.kind {
            NodeKind::File { .. } => self.selected,
            NodeKind::Dir { children } => children.iter().all(|c| c.all_leaves_selected()),
        }
    }

    pub fn selection_state(&self) -> SelectionState {
        let selected = self.selected_leaves();
        if selected == 0 {
            // an empty directory reports its own flag
            if self.file_count() == 0 && self.selected {
                return SelectionState::All;
            }
            SelectionState::None
        } else if selected == self.file_count() {
            SelectionState::All
        } else {
            SelectionState::Partial
        }
    }

    /// Writes `selected` on this node and every descendant.
    pub(crate) fn set_selected_deep(
        &mut self,
        selected: bool,
    ) {
        self.selected = selected;
        if let NodeKind::Dir { children } = &mut self.kind {
            for child in children {
                Arc::make_mut(child).set_selected_deep(selected);
            }
        }
    }

    /// Applies `f` to every leaf at or below this node.
    pub(crate) fn for_each_leaf_mut(
        &mut self,
        f: &mut impl FnMut(&mut FileNode),
    ) {
        if !self.is_dir() {
            f(self);
            return;
        }
        if let NodeKind::Dir { children } = &mut self.kind {
            for child in children {
                Arc::make_mut(child).for_each_leaf_mut(f);
            }
        }
    }

    pub(crate) fn set_expanded_deep(
        &mut self,
        expanded: bool,
    ) {
        if let NodeKind::Dir { children } = &mut self.kind {
            self.expanded = expanded;
            for child in children {
                Arc::make_mut(child).set_expanded_deep(expanded);
            }
        }
    }
}
