//! # hn-front
//!
//! A Hacker News front page viewer with live title filtering.
//!
//! The crate fetches the current front page from the Algolia search API once,
//! filters it by a case-insensitive title substring, and renders each story
//! as a card with its link and upvote count. The same view model is drawn
//! three ways: as text on stdout, as an interactive terminal UI, and as an
//! HTML page served over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Fetcher    │──▶│  FetchState  │──▶│    render    │──▶ Page
//! │  (reqwest)   │   │ + SearchState│   │ (pure, sync) │
//! └─────────────┘   └──────────────┘   └──────┬───────┘
//!                                             │
//!                  ┌──────────────┬───────────┼────────────┐
//!                  ▼              ▼           ▼            ▼
//!             ┌────────┐    ┌──────────┐ ┌────────┐  ┌─────────┐
//!             │  text  │    │   json   │ │  html  │  │   tui   │
//!             │ (list) │    │  (list)  │ │ (serve)│  │(browse) │
//!             └────────┘    └──────────┘ └────────┘  └─────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! hnf list                       # print the front page
//! hnf list --search rust         # only titles containing "rust"
//! hnf browse                     # interactive, filter as you type
//! hnf serve                      # http://127.0.0.1:7340/?q=rust
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Story records decoded from the API |
//! | [`fetch`] | The story source seam and its HTTP client |
//! | [`view`] | Search/fetch state and the pure page renderer |
//! | [`render`] | Text, JSON and HTML front ends |
//! | [`tui`] | Interactive terminal front end |
//! | [`cache`] | Stale-while-revalidate cache for the server |
//! | [`server`] | HTTP server |
//! | [`list`] | One-shot listing |
//! | [`progress`] | Fetch progress on stderr |
//! | [`logging`] | Tracing subscriber setup |

pub mod cache;
pub mod config;
pub mod fetch;
pub mod list;
pub mod logging;
pub mod models;
pub mod progress;
pub mod render;
pub mod server;
pub mod tui;
pub mod view;
