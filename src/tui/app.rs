use crate::controller::{IssuedSearch, SearchController};
use crate::error::ApiError;
use crate::github::{GitHubClient, Repo, SearchResults};
use crate::tui::input::TopicInput;
use crate::tui::table::TableState;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};
use ratatui::prelude::*;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Messages from background request threads
pub enum BgMessage {
    SearchDone {
        seq: u64,
        outcome: Result<SearchResults, ApiError>,
    },
}

/// Which screen is showing. A detail view always carries the summary it
/// displays, so "detail without a repository" cannot be represented and
/// the view falls back to search by construction.
pub enum View {
    Search,
    Detail(Box<Repo>),
}

/// Language filter options offered by the UI. `None` means no filter.
pub const LANGUAGES: [Option<&str>; 5] = [
    None,
    Some("r"),
    Some("c"),
    Some("python"),
    Some("javascript"),
];

/// Next option in the language cycle, wrapping after the last.
pub fn next_language(current: Option<&str>) -> Option<&'static str> {
    let index = LANGUAGES
        .iter()
        .position(|l| *l == current)
        .unwrap_or(0);
    LANGUAGES[(index + 1) % LANGUAGES.len()]
}

pub struct App {
    pub controller: SearchController,
    pub input: TopicInput,
    pub table: TableState,
    pub view: View,

    // History dropdown
    pub show_history: bool,
    pub history_selected: Option<usize>,

    pub status_message: String,
    pub should_quit: bool,

    client: Arc<GitHubClient>,
    bg_sender: Sender<BgMessage>,
    bg_receiver: Receiver<BgMessage>,
}

impl App {
    pub fn new(client: GitHubClient) -> Self {
        let (tx, rx) = channel();

        Self {
            controller: SearchController::new(),
            input: TopicInput::default(),
            table: TableState::default(),
            view: View::Search,
            show_history: false,
            history_selected: None,
            status_message: "Type a topic and press Enter".to_string(),
            should_quit: false,
            client: Arc::new(client),
            bg_sender: tx,
            bg_receiver: rx,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> crate::Result<()>
    where
        crate::error::RepoHubError: From<B::Error>,
    {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    self.handle_key(key);
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Run one issued search on a background thread. The outcome comes back
    /// through the channel tagged with its sequence number; a superseded
    /// request is never cancelled, its outcome just gets discarded.
    fn dispatch(&self, issued: IssuedSearch) {
        let client = Arc::clone(&self.client);
        let tx = self.bg_sender.clone();

        thread::spawn(move || {
            let outcome = client.search(&issued.query);
            let _ = tx.send(BgMessage::SearchDone {
                seq: issued.seq,
                outcome,
            });
        });
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.bg_receiver.try_recv() {
            match msg {
                BgMessage::SearchDone { seq, outcome } => {
                    self.controller.apply(seq, outcome);
                    if !self.controller.loading {
                        self.refresh_after_response();
                    }
                }
            }
        }
    }

    fn refresh_after_response(&mut self) {
        self.table.reset(self.controller.items.len());

        if !self.controller.has_error {
            self.status_message = format!(
                "{} repositories",
                crate::format_count(self.controller.total_count)
            );
        } else if let Some(msg) = &self.controller.error_message {
            self.status_message = format!("GitHub: {}", msg);
        } else {
            self.status_message = format!("No matches for '{}'", self.controller.topic);
        }
    }

    fn submit_search(&mut self) {
        let topic = self.input.text.trim().to_string();
        if topic.is_empty() {
            return;
        }

        self.controller.topic = topic;
        let issued = self.controller.submit();
        self.status_message = format!("Searching '{}'...", self.controller.topic);
        self.show_history = false;
        self.history_selected = None;
        self.dispatch(issued);
    }

    fn fire(&mut self, issued: Option<IssuedSearch>) {
        if let Some(issued) = issued {
            self.status_message = format!("Searching '{}'...", issued.query.topic);
            self.dispatch(issued);
        } else {
            debug!("filter action ignored while a search is in flight");
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        if matches!(self.view, View::Detail(_)) {
            self.handle_detail_key(key);
            return;
        }

        if key.code == KeyCode::Esc {
            if self.show_history {
                self.show_history = false;
                self.history_selected = None;
            } else if self.input.focused && !self.input.text.is_empty() {
                self.input.clear();
            } else if self.input.focused {
                self.input.focused = false;
            } else {
                self.should_quit = true;
            }
            return;
        }

        if self.input.focused {
            self.handle_input_key(key);
        } else {
            self.handle_results_key(key);
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(c);
                self.history_selected = None;
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => {
                // Deletes the highlighted history entry when the dropdown
                // selection is active, otherwise edits the input.
                if let Some(index) = self.history_selected {
                    self.remove_history_entry(index);
                } else {
                    self.input.delete();
                }
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Down => {
                if self.show_history && !self.controller.history.is_empty() {
                    let last = self.controller.history.len() - 1;
                    self.history_selected = Some(match self.history_selected {
                        Some(i) => (i + 1).min(last),
                        None => 0,
                    });
                } else {
                    self.input.focused = false;
                }
            }
            KeyCode::Up => {
                self.history_selected = match self.history_selected {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
            }
            KeyCode::Enter => {
                if let Some(index) = self.history_selected {
                    // Selection only fills the topic field; it does not
                    // fire a search.
                    if self.controller.select_history(index) {
                        let topic = self.controller.topic.clone();
                        self.input.set_text(&topic);
                    }
                    self.history_selected = None;
                } else {
                    self.submit_search();
                }
            }
            KeyCode::Tab => {
                self.input.focused = false;
                self.show_history = false;
                self.history_selected = None;
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        let total = self.controller.items.len();

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::Home | KeyCode::Char('g') => self.table.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.table.select_last(total),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.input.focused = true;
                self.show_history = true;
                self.history_selected = None;
            }

            KeyCode::Enter => {
                if let Some(repo) = self
                    .table
                    .selected
                    .and_then(|i| self.controller.items.get(i))
                {
                    info!("opening detail view for {}", repo.name);
                    self.view = View::Detail(Box::new(repo.clone()));
                }
            }

            KeyCode::Char('s') => {
                let issued = self.controller.toggle_sort();
                self.fire(issued);
            }
            KeyCode::Char('o') => {
                let issued = self.controller.toggle_order();
                self.fire(issued);
            }
            KeyCode::Char('l') => {
                let next = next_language(self.controller.language.as_deref());
                let issued = self.controller.set_language(next.map(String::from));
                self.fire(issued);
            }

            KeyCode::Char('n') | KeyCode::Right => self.change_page(1),
            KeyCode::Char('p') | KeyCode::Left => self.change_page(-1),

            KeyCode::Char('q') => self.should_quit = true,

            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let url = match &self.view {
            View::Detail(repo) => repo.html_url.clone(),
            View::Search => return,
        };

        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                self.view = View::Search;
            }
            KeyCode::Char('o') => self.open_in_browser(&url),
            KeyCode::Char('y') => self.copy_to_clipboard(&url),
            _ => {}
        }
    }

    fn change_page(&mut self, delta: i64) {
        if !self.controller.show_pagination() {
            return;
        }

        let target = self.controller.page as i64 + delta;
        if target < 1 || target > self.controller.page_count() as i64 {
            return;
        }

        let issued = self.controller.set_page(target as u32);
        self.fire(issued);
    }

    fn remove_history_entry(&mut self, index: usize) {
        self.controller.history.remove(index);

        let remaining = self.controller.history.len();
        self.history_selected = if remaining == 0 {
            self.show_history = false;
            None
        } else {
            Some(index.min(remaining - 1))
        };
    }

    fn open_in_browser(&mut self, url: &str) {
        match open::that(url) {
            Ok(()) => {
                info!("opened {} in browser", url);
                self.status_message = format!("Opened {}", url);
            }
            Err(e) => self.status_message = format!("Failed to open browser: {}", e),
        }
    }

    fn copy_to_clipboard(&mut self, url: &str) {
        let copied = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.to_string()));
        match copied {
            Ok(()) => self.status_message = format!("Copied {}", url),
            Err(e) => self.status_message = format!("Clipboard error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::SearchResults;

    fn test_app() -> App {
        App::new(GitHubClient::new().unwrap())
    }

    #[test]
    fn language_cycle_wraps_through_all_options() {
        let mut current: Option<&str> = None;
        let mut seen = Vec::new();
        for _ in 0..LANGUAGES.len() {
            current = next_language(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            [Some("r"), Some("c"), Some("python"), Some("javascript"), None]
        );
    }

    #[test]
    fn history_enter_fills_topic_without_firing() {
        let mut app = test_app();
        app.controller.topic = "react".to_string();
        let issued = app.controller.submit();
        app.controller.apply(
            issued.seq,
            Ok(SearchResults {
                total_count: 20,
                items: vec![Repo {
                    id: 1,
                    name: "react".to_string(),
                    language: None,
                    description: None,
                    forks: 0,
                    stargazers_count: 1,
                    html_url: "https://github.com/facebook/react".to_string(),
                    owner: None,
                }],
            }),
        );

        app.input.set_text("something else");
        app.show_history = true;
        app.history_selected = Some(0);
        app.handle_key(KeyEvent::from(KeyCode::Enter));

        assert_eq!(app.input.text, "react");
        assert!(!app.controller.loading);
        assert_eq!(app.history_selected, None);
    }

    #[test]
    fn deleting_last_history_entry_closes_dropdown() {
        let mut app = test_app();
        app.controller.history.record("react");
        app.show_history = true;
        app.history_selected = Some(0);

        app.handle_key(KeyEvent::from(KeyCode::Delete));

        assert!(app.controller.history.is_empty());
        assert!(!app.show_history);
        assert_eq!(app.history_selected, None);
    }

    #[test]
    fn esc_cascade_closes_dropdown_before_clearing_input() {
        let mut app = test_app();
        app.input.set_text("react");
        app.show_history = true;

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(!app.show_history);
        assert_eq!(app.input.text, "react");

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(app.input.text.is_empty());

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(!app.input.focused);

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
