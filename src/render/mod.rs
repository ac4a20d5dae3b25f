//! Front ends for a rendered [`Page`](crate::view::Page).
//!
//! | Module | Output |
//! |--------|--------|
//! | [`text`] | plain text for `hnf list` |
//! | [`html`] | a standalone HTML document for `hnf serve` and `hnf list --format html` |
//! | [`json`] | machine-readable cards for `--format json` and `/api/stories` |
//!
//! The terminal UI draws the same page with ratatui in [`crate::tui`].

pub mod html;
pub mod json;
pub mod text;

/// Relative widths of the three bars that make up a skeleton card:
/// title, points line, "read more" line.
pub const SKELETON_BARS: [f32; 3] = [0.75, 0.25, 0.2];

/// Output format for `hnf list`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
    Html,
}

impl Format {
    pub fn render(&self, page: &crate::view::Page) -> anyhow::Result<String> {
        Ok(match self {
            Format::Text => text::render(page),
            Format::Json => json::render(page)?,
            Format::Html => html::render(page),
        })
    }
}
