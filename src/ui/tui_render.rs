use crate::selection::{FileNode, SelectionState};
use crate::tokenizer::{ColorTier, color_tier, format_tokens};
use crate::ui::locale::Messages;
use crate::ui::tui_state::{UiState, adjust_scroll_and_slice};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

fn mark(node: &FileNode) -> &'static str {
    match node.selection_state() {
        SelectionState::All => "[x]",
        SelectionState::Partial => "[~]",
        SelectionState::None => "[ ]",
    }
}

fn tier_color(tier: ColorTier) -> Color {
    match tier {
        ColorTier::Low => Color::Green,
        ColorTier::Mid => Color::Yellow,
        ColorTier::High => Color::Red,
    }
}

fn row<'a>(
    node: &'a FileNode,
    depth: usize,
    total_tokens: usize,
) -> ListItem<'a> {
    let tokens = node.tokens();
    let name = if node.is_dir() {
        let arrow = if node.expanded { "▾ " } else { "▸ " };
        format!("{arrow}{}/", node.name)
    } else {
        format!("  {}", node.name)
    };
    ListItem::new(Line::from(vec![
        Span::raw("  ".repeat(depth)),
        Span::styled(mark(node), Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::raw(name),
        Span::raw("  "),
        Span::styled(
            format_tokens(tokens),
            Style::default().fg(tier_color(color_tier(tokens, total_tokens))),
        ),
    ]))
}

/// Draws search bar, file list and status/help lines, updating the scroll
/// offset to keep the cursor visible.
pub fn render(
    frame: &mut Frame<'_>,
    state: &mut UiState,
    messages: &Messages,
) {
    // Layout: search bar (3 lines), list area, then status and help bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let search_style = if state.searching {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.search_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(messages.search_title),
    );
    frame.render_widget(search, chunks[0]);

    let area = chunks[1];
    let max_lines = area.height.saturating_sub(2) as usize;
    let total_tokens = state.tree.total_tokens();
    let mut selected_idx = state.selected_idx;
    let mut scroll_offset = state.scroll_offset;

    let rows = state.rows();
    let (offset, end) =
        adjust_scroll_and_slice(&mut selected_idx, &mut scroll_offset, max_lines, rows.len());
    let items: Vec<ListItem> = rows[offset..end]
        .iter()
        .map(|(node, depth)| row(node, *depth, total_tokens))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected_idx.saturating_sub(offset)));
    let widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(messages.files_title))
        .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(widget, area, &mut list_state);

    let status = messages.status(
        state.tree.selected_count(),
        state.tree.leaf_count(),
        &format_tokens(state.tree.selected_tokens()),
    );
    frame.render_widget(Paragraph::new(status), chunks[2]);

    let help: Vec<Span> = messages
        .help
        .iter()
        .flat_map(|(key, what)| {
            [
                Span::styled(*key, Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {what}  ")),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(help)), chunks[3]);

    state.scroll_offset = scroll_offset;
}
