use crate::error::Result;
use crate::selection::FileTree;
use crate::ui::tui_state::UiState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Outcome of a key press that ends the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMsg {
    Quit,
    Submit,
}

/// Runs a path-addressed tree operation on the highlighted row.
fn on_current(
    state: &mut UiState,
    op: impl FnOnce(&mut FileTree, &str) -> Result<()>,
) {
    let Some(path) = state.current_path() else {
        return;
    };
    if let Err(e) = op(&mut state.tree, &path) {
        tracing::debug!("ignored key on {path}: {e}");
    }
}

fn current_is_dir(state: &UiState) -> Option<(bool, bool)> {
    state
        .rows()
        .get(state.selected_idx)
        .map(|(node, _)| (node.is_dir(), node.expanded))
}

/// Applies one key press to `state`. Pure apart from the state it is given,
/// so it can be driven without a terminal.
pub fn handle_key(
    state: &mut UiState,
    key: KeyEvent,
) -> Option<UiMsg> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiMsg::Quit);
    }

    match key.code {
        KeyCode::Up => state.move_up(),
        KeyCode::Down => state.move_down(),
        _ if state.searching => match key.code {
            KeyCode::Char(c) => {
                state.search_input.push(c);
                state.selected_idx = 0;
            }
            KeyCode::Backspace => {
                state.search_input.pop();
            }
            KeyCode::Enter => state.searching = false,
            KeyCode::Esc => {
                state.searching = false;
                state.search_input.clear();
            }
            _ => {}
        },
        KeyCode::Enter => return Some(UiMsg::Submit),
        KeyCode::Esc | KeyCode::Char('q') => return Some(UiMsg::Quit),
        KeyCode::Char(' ') => on_current(state, |tree, path| tree.toggle_selection(path)),
        KeyCode::Char('d') => on_current(state, |tree, path| tree.toggle_current_directory(path)),
        KeyCode::Char('a') => state.tree.select_all(),
        KeyCode::Char('n') => state.tree.deselect_all(),
        KeyCode::Char('i') => state.tree.invert_selection(),
        KeyCode::Char('t') => state.tree.toggle_test_files(),
        KeyCode::Char('e') => state.tree.expand_all(),
        KeyCode::Char('c') => state.tree.collapse_all(),
        KeyCode::Char('/') => state.searching = true,
        KeyCode::Left => {
            if current_is_dir(state) == Some((true, true)) {
                on_current(state, |tree, path| tree.toggle_expand(path));
            }
        }
        KeyCode::Right => {
            if current_is_dir(state) == Some((true, false)) {
                on_current(state, |tree, path| tree.toggle_expand(path));
            }
        }
        _ => return None,
    }
    state.refresh();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::types::ScannedFile;

    fn press(
        state: &mut UiState,
        code: KeyCode,
    ) -> Option<UiMsg> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn state() -> UiState {
        UiState::new(FileTree::from_files(vec![
            ScannedFile::with_tokens("src/a.ts", "", 3),
            ScannedFile::with_tokens("src/b.test.ts", "", 2),
            ScannedFile::with_tokens("notes.md", "", 1),
        ]))
    }

    #[test]
    fn space_toggles_highlighted_row() {
        let mut s = state();
        press(&mut s, KeyCode::Down);
        assert_eq!(s.current_path().as_deref(), Some("src/a.ts"));
        press(&mut s, KeyCode::Char(' '));
        assert!(!s.tree.is_selected("src/a.ts").unwrap());
        assert_eq!(s.tree.selected_count(), 2);
    }

    #[test]
    fn bulk_keys() {
        let mut s = state();
        press(&mut s, KeyCode::Char('n'));
        assert_eq!(s.tree.selected_count(), 0);
        press(&mut s, KeyCode::Char('i'));
        assert_eq!(s.tree.selected_count(), 3);
        press(&mut s, KeyCode::Char('t'));
        assert!(!s.tree.is_selected("src/b.test.ts").unwrap());
        press(&mut s, KeyCode::Char('a'));
        assert_eq!(s.tree.selected_count(), 3);
    }

    #[test]
    fn directory_key_on_leaf_uses_parent() {
        let mut s = state();
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Char('d'));
        assert_eq!(s.tree.selected_count(), 1);
        assert!(s.tree.is_selected("notes.md").unwrap());
    }

    #[test]
    fn arrows_fold_directories() {
        let mut s = state();
        assert_eq!(s.rows().len(), 4);
        press(&mut s, KeyCode::Left);
        assert_eq!(s.rows().len(), 2);
        press(&mut s, KeyCode::Right);
        assert_eq!(s.rows().len(), 4);
        press(&mut s, KeyCode::Char('c'));
        assert_eq!(s.rows().len(), 2);
    }

    #[test]
    fn search_mode_captures_letters() {
        let mut s = state();
        press(&mut s, KeyCode::Char('/'));
        for c in "notes".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        // 'n' went to the search bar, not to deselect-all
        assert_eq!(s.tree.selected_count(), 3);
        assert_eq!(s.rows().len(), 1);
        press(&mut s, KeyCode::Enter);
        assert!(!s.searching);
        assert_eq!(press(&mut s, KeyCode::Enter), Some(UiMsg::Submit));
    }

    #[test]
    fn escape_clears_search_then_quits() {
        let mut s = state();
        press(&mut s, KeyCode::Char('/'));
        press(&mut s, KeyCode::Char('z'));
        assert_eq!(press(&mut s, KeyCode::Esc), None);
        assert_eq!(s.rows().len(), 4);
        assert_eq!(press(&mut s, KeyCode::Char('q')), Some(UiMsg::Quit));
    }
}
