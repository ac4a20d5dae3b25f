//! One-shot listing (`hnf list`).
//!
//! Fetches once, renders the filtered page once and prints it to stdout.
//! A failed fetch is part of the page (`Error: ...`), not a process error.

use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, ViewConfig};
use crate::fetch::{HnClient, StorySource};
use crate::progress::{FetchProgressEvent, FetchProgressReporter, ProgressMode};
use crate::render::Format;
use crate::view::{self, FetchState, Page, SearchState};

/// Fetch from `source` and render the page for `search`.
pub async fn fetch_page(
    source: &dyn StorySource,
    search: &str,
    view_config: &ViewConfig,
    progress: &dyn FetchProgressReporter,
) -> Page {
    progress.report(FetchProgressEvent::Started {
        source: source.describe(),
    });

    let result = source.fetch().await;
    progress.report(match &result {
        Ok(stories) => FetchProgressEvent::Finished {
            stories: stories.len(),
        },
        Err(e) => FetchProgressEvent::Failed {
            message: e.message.clone(),
        },
    });

    let fetch = FetchState::from(result);
    view::render(&SearchState::new(search), &fetch, view_config)
}

/// CLI entry point — fetches, renders and prints.
pub async fn run_list(
    config: &Config,
    search: Option<String>,
    format: Format,
    progress: Option<ProgressMode>,
) -> Result<()> {
    let source: Arc<dyn StorySource> = Arc::new(HnClient::from_config(&config.api)?);
    let reporter = progress
        .unwrap_or_else(ProgressMode::default_for_tty)
        .reporter();

    let page = fetch_page(
        source.as_ref(),
        search.as_deref().unwrap_or(""),
        &config.view,
        reporter.as_ref(),
    )
    .await;

    print!("{}", format.render(&page)?);
    Ok(())
}
