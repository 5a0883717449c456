use std::{io, panic};

use crate::selection::FileTree;
use crate::ui::locale::Messages;
use crate::ui::{tui_events, tui_render, tui_state};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn restore(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Lets the user edit the selection of `tree`. Returns the edited tree on
/// submit and `None` when the user quits.
pub fn select_files_tui(
    tree: FileTree,
    messages: &Messages,
) -> Result<Option<FileTree>> {
    // Setup panic hook to restore terminal state on panic
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    let mut state = tui_state::UiState::new(tree);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let outcome = run_loop(&mut terminal, &mut state, messages);
    restore(&mut terminal)?;
    let _ = panic::take_hook();

    Ok(match outcome? {
        tui_events::UiMsg::Submit => Some(state.tree),
        tui_events::UiMsg::Quit => None,
    })
}

fn run_loop(
    terminal: &mut Term,
    state: &mut tui_state::UiState,
    messages: &Messages,
) -> Result<tui_events::UiMsg> {
    loop {
        terminal.draw(|f| tui_render::render(f, state, messages))?;
        if let Event::Key(key) = event::read()?
            && let Some(msg) = tui_events::handle_key(state, key)
        {
            return Ok(msg);
        }
    }
}
