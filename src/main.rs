//! # hn-front CLI (`hnf`)
//!
//! Shows the Hacker News front page, filtered by title.
//!
//! ## Usage
//!
//! ```bash
//! hnf [--config ./hnf.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `hnf list` | Fetch once and print the (filtered) front page |
//! | `hnf browse` | Interactive terminal view; filter as you type |
//! | `hnf serve` | Serve the view as an HTML page |
//!
//! ## Examples
//!
//! ```bash
//! # Stories mentioning Rust, as text
//! hnf list --search rust
//!
//! # Whole front page as JSON, no progress chatter
//! hnf list --format json --progress off
//!
//! # Browse with an initial filter
//! hnf browse --search "show hn"
//!
//! # Serve on the address from the config file
//! hnf serve --config ./hnf.toml
//! ```

use clap::{Parser, Subcommand};
use hn_front::fetch::{HnClient, StorySource};
use hn_front::progress::ProgressMode;
use hn_front::render::Format;
use hn_front::logging::{self, LogTarget};
use hn_front::{config, list, server, tui};
use std::path::PathBuf;
use std::sync::Arc;

/// hn-front — the Hacker News front page, filtered by title.
///
/// Every command accepts an optional `--config` flag pointing to a TOML
/// file; without it built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "hnf",
    about = "hn-front — the Hacker News front page, filtered by title",
    version,
    long_about = "hn-front fetches the current Hacker News front page from the Algolia search API, \
    filters it by a case-insensitive title substring and renders each story with its link and \
    upvote count, as text, as an interactive terminal view, or as an HTML page."
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch the front page once and print it.
    ///
    /// A failed fetch is printed as `Error: <message>` in place of the list.
    List {
        /// Only show stories whose title contains this text (case-insensitive).
        #[arg(long, short)]
        search: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: Format,

        /// Progress on stderr. Defaults to `human` on a TTY, otherwise `off`.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Interactive terminal view.
    ///
    /// Type to filter titles, arrows to select, Enter to open the story in
    /// the browser, Esc to clear the search or quit.
    Browse {
        /// Initial search text.
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Serve the view as an HTML page.
    ///
    /// Binds to `[server].bind`. `GET /?q=<text>` renders the page,
    /// `GET /api/stories?q=<text>` returns JSON.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The terminal UI owns the screen; it logs to a file, and only on request.
    match cli.command {
        Commands::Browse { .. } => {
            if std::env::var_os("RUST_LOG").is_some() {
                logging::init(LogTarget::File(logging::browse_log_path()))?;
            }
        }
        _ => logging::init(LogTarget::Stderr)?,
    }

    let cfg = config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::List {
            search,
            format,
            progress,
        } => {
            list::run_list(&cfg, search, format, progress).await?;
        }
        Commands::Browse { search } => {
            let source: Arc<dyn StorySource> = Arc::new(HnClient::from_config(&cfg.api)?);
            tui::run(&cfg, source, search).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
