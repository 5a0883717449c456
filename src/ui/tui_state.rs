use crate::selection::{FileNode, FileTree};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Shared UI state for the file selection viewport.
pub struct UiState {
    /// Authoritative selection; every edit lands here.
    pub tree: FileTree,
    /// What the list shows: `tree` itself, or its fuzzy-filtered projection.
    pub view: FileTree,
    pub search_input: String,
    /// Keystrokes go to the search bar.
    pub searching: bool,
    pub selected_idx: usize,
    pub scroll_offset: usize,
}

impl UiState {
    pub fn new(tree: FileTree) -> Self {
        UiState {
            view: tree.clone(),
            tree,
            search_input: String::new(),
            searching: false,
            selected_idx: 0,
            scroll_offset: 0,
        }
    }

    /// Visible rows of the current view.
    pub fn rows(&self) -> Vec<(&FileNode, usize)> {
        self.view.flatten()
    }

    /// Path of the highlighted row.
    pub fn current_path(&self) -> Option<String> {
        self.rows()
            .get(self.selected_idx)
            .map(|(node, _)| node.path.clone())
    }

    /// Rebuilds `view` after `tree` or the search input changed, keeping the
    /// cursor in range.
    pub fn refresh(&mut self) {
        self.view = if self.search_input.is_empty() {
            self.tree.clone()
        } else {
            let matcher = SkimMatcherV2::default();
            let query = self.search_input.as_str();
            self.tree
                .filtered(|node| matcher.fuzzy_match(&node.path, query).is_some())
        };
        let len = self.rows().len();
        if self.selected_idx >= len {
            self.selected_idx = len.saturating_sub(1);
        }
    }

    pub fn move_up(&mut self) {
        self.selected_idx = self.selected_idx.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_idx + 1 < self.rows().len() {
            self.selected_idx += 1;
        }
    }
}

/// Adjust scroll offset and compute visible range
pub fn adjust_scroll_and_slice(
    selected_idx: &mut usize,
    scroll_offset: &mut usize,
    max_lines: usize,
    data_len: usize,
) -> (usize, usize) {
    if *selected_idx < *scroll_offset {
        *scroll_offset = *selected_idx;
    } else if *selected_idx >= *scroll_offset + max_lines {
        *scroll_offset = selected_idx.saturating_sub(max_lines).saturating_add(1);
    }
    let end_idx = (*scroll_offset + max_lines).min(data_len);
    (*scroll_offset, end_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::types::ScannedFile;

    fn state() -> UiState {
        UiState::new(FileTree::from_files(vec![
            ScannedFile::with_tokens("src/app.ts", "", 4),
            ScannedFile::with_tokens("src/db/pool.ts", "", 4),
            ScannedFile::with_tokens("README.md", "", 1),
        ]))
    }

    #[test]
    fn search_filters_view_not_tree() {
        let mut s = state();
        s.search_input = "pool".into();
        s.refresh();
        let paths: Vec<&str> = s.rows().iter().map(|(n, _)| n.path.as_str()).collect();
        assert_eq!(paths, ["src", "src/db", "src/db/pool.ts"]);
        assert_eq!(s.tree.leaf_count(), 3);
    }

    #[test]
    fn cursor_clamped_after_refresh() {
        let mut s = state();
        s.selected_idx = 3;
        s.search_input = "readme".into();
        s.refresh();
        assert_eq!(s.selected_idx, 0);
        assert_eq!(s.current_path().as_deref(), Some("README.md"));
    }

    #[test]
    fn scroll_window_follows_cursor() {
        let (mut idx, mut off) = (7, 0);
        assert_eq!(adjust_scroll_and_slice(&mut idx, &mut off, 5, 20), (3, 8));
        idx = 1;
        assert_eq!(adjust_scroll_and_slice(&mut idx, &mut off, 5, 20), (1, 6));
        assert_eq!(adjust_scroll_and_slice(&mut idx, &mut off, 5, 3), (1, 3));
    }
}
