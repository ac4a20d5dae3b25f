//! Plain-text rendering.

use std::fmt::Write;

use super::SKELETON_BARS;
use crate::view::{Body, Page, StoryCard};

const SKELETON_WIDTH: usize = 40;

pub fn render(page: &Page) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page.heading);
    let _ = writeln!(out, "Search: {}", page.search);
    out.push('\n');

    match &page.body {
        Body::Skeleton(n) => {
            for _ in 0..*n {
                for width in SKELETON_BARS {
                    let len = (SKELETON_WIDTH as f32 * width).round() as usize;
                    let _ = writeln!(out, "  {}", "░".repeat(len));
                }
                out.push('\n');
            }
        }
        Body::Error(message) => {
            let _ = writeln!(out, "{}", Page::error_line(message));
        }
        Body::Stories(cards) => {
            for card in cards {
                write_card(&mut out, card);
            }
        }
    }

    out
}

fn write_card(out: &mut String, card: &StoryCard) {
    let _ = writeln!(out, "{}", card.title);
    if let Some(ref link) = card.link {
        let _ = writeln!(out, "  {}", link);
    }
    let _ = writeln!(out, "  {}", card.points_label());
    if let Some(ref link) = card.link {
        let _ = writeln!(out, "  Read more: {}", link);
    }
    out.push('\n');
}
