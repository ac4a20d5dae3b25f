//! Interactive terminal view (`hnf browse`).
//!
//! The fetch runs once on a tokio task and reports back through a channel;
//! the UI loop runs on a blocking thread, owns the search and fetch state,
//! and redraws the page from them on every turn. Quitting before the fetch
//! resolves simply drops the result.

pub mod app;
pub mod ui;

use anyhow::Context;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::fetch::StorySource;
use app::{App, BgMessage};

pub async fn run(
    config: &Config,
    source: Arc<dyn StorySource>,
    initial_search: Option<String>,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();

    let fetch_source = Arc::clone(&source);
    tokio::spawn(async move {
        let result = fetch_source.fetch().await;
        let _ = tx.send(BgMessage::Fetched(result));
    });

    let mut app = App::new(config.view.clone(), source.describe(), rx);
    if let Some(query) = initial_search {
        app.search.set(query);
    }

    tokio::task::spawn_blocking(move || {
        let mut terminal = match ratatui::try_init() {
            Ok(terminal) => terminal,
            Err(e) => {
                ratatui::restore();
                return Err(e).context("failed to initialise terminal");
            }
        };
        let result = app.run(&mut terminal);
        ratatui::restore();
        result
    })
    .await?
}
