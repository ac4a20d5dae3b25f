use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::config::ViewConfig;
use crate::fetch::FetchError;
use crate::models::Story;
use crate::tui::ui;
use crate::view::{self, FetchState, Page, SearchState};

/// Messages from the background fetch task.
pub enum BgMessage {
    Fetched(Result<Vec<Story>, FetchError>),
}

pub struct App {
    pub search: SearchState,
    pub fetch: FetchState,
    pub view: ViewConfig,
    /// Index into the currently filtered cards.
    pub selected: usize,
    /// Shown in the status bar while loading.
    pub source_label: String,
    pub status_message: String,

    /// Dropped once the fetch has resolved.
    bg_receiver: Option<UnboundedReceiver<BgMessage>>,
    /// Set by the first fetch result; later results are ignored.
    resolved: bool,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        view: ViewConfig,
        source_label: String,
        bg_receiver: UnboundedReceiver<BgMessage>,
    ) -> Self {
        Self {
            search: SearchState::default(),
            fetch: FetchState::Loading,
            view,
            selected: 0,
            status_message: format!("Fetching {}...", source_label),
            source_label,
            bg_receiver: Some(bg_receiver),
            resolved: false,
            should_quit: false,
        }
    }

    /// The page as it should look right now.
    pub fn page(&self) -> Page {
        view::render(&self.search, &self.fetch, &self.view)
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(50);

        loop {
            let page = self.page();
            terminal.draw(|frame| ui::draw(frame, self, &page))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.process_messages();

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn process_messages(&mut self) {
        let rx = match self.bg_receiver.as_mut() {
            Some(rx) => rx,
            None => return,
        };

        let mut received = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            received.push(msg);
        }

        for msg in received {
            match msg {
                BgMessage::Fetched(result) => self.apply_fetch(result),
            }
        }
    }

    /// Apply the fetch outcome. Only the first resolution counts.
    pub fn apply_fetch(&mut self, result: Result<Vec<Story>, FetchError>) {
        if self.resolved {
            debug!("ignoring duplicate fetch resolution");
            return;
        }
        self.resolved = true;
        self.bg_receiver = None;

        self.status_message = match &result {
            Ok(stories) => format!("{} stories from {}", stories.len(), self.source_label),
            Err(e) => format!("Fetch failed: {}", e),
        };
        self.fetch = result.into();
        self.clamp_selection();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => {
                if self.search.clear() {
                    self.on_search_changed();
                }
            }
            KeyCode::Esc => {
                if !self.search.clear() {
                    self.should_quit = true;
                } else {
                    self.on_search_changed();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                self.search.insert(c);
                self.on_search_changed();
            }
            KeyCode::Backspace => {
                if self.search.backspace() {
                    self.on_search_changed();
                }
            }
            KeyCode::Delete => {
                if self.search.delete() {
                    self.on_search_changed();
                }
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.home(),
            KeyCode::End => self.search.end(),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                self.selected += 1;
                self.clamp_selection();
            }
            KeyCode::PageUp => self.selected = self.selected.saturating_sub(10),
            KeyCode::PageDown => {
                self.selected += 10;
                self.clamp_selection();
            }
            KeyCode::Enter => self.open_selected(),
            _ => {}
        }
    }

    /// Link of the highlighted card, if it has one.
    pub fn selected_link(&self) -> Option<String> {
        self.page()
            .cards()
            .get(self.selected)
            .and_then(|c| c.link.clone())
    }

    fn open_selected(&mut self) {
        match self.selected_link() {
            Some(link) => {
                self.status_message = match open::that_detached(&link) {
                    Ok(()) => format!("Opened {}", link),
                    Err(e) => {
                        warn!(error = %e, %link, "failed to open browser");
                        format!("Could not open {}: {}", link, e)
                    }
                };
            }
            None => self.status_message = "Story has no link".to_string(),
        }
    }

    fn on_search_changed(&mut self) {
        self.selected = 0;
    }

    fn clamp_selection(&mut self) {
        let count = self.page().cards().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}
