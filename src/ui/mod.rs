pub mod interactive;
pub mod locale;
pub mod tui_events;
pub mod tui_render;
pub mod tui_state;

// Re-export the TUI entrypoint function
pub use interactive::select_files_tui;
pub use locale::{Lang, Messages};
