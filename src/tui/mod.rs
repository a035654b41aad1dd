//! Interactive terminal frontend
//!
//! Event-driven: all state transitions happen on the event loop thread, in
//! reaction to key presses or the completion of a background search.

pub mod app;
pub mod colors;
pub mod input;
pub mod table;
pub mod ui;

pub use app::App;

use crate::github::GitHubClient;

/// Set up the terminal, run the app until it quits, restore the terminal.
pub fn run(client: GitHubClient) -> crate::Result<()> {
    let mut terminal = ratatui::init();
    let mut app = App::new(client);
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
