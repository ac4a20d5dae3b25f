//! HTML rendering.
//!
//! Produces a complete, self-contained document: inline styles, no scripts.
//! The search box is a plain `GET` form on `q`, so submitting it re-renders
//! the page with the new filter. While the fetch is outstanding the page
//! asks the browser to refresh itself after a second.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::SKELETON_BARS;
use crate::view::{Body, Page, StoryCard};

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:48rem;margin:0 auto;padding:2rem 1rem}\
h1{font-size:1.875rem;margin-bottom:1rem}\
input{width:100%;max-width:28rem;padding:.5rem;font-size:1rem}\
.card{border:1px solid #e5e7eb;border-radius:.5rem;padding:1rem;margin-bottom:1rem}\
.card h2{font-size:1.125rem;margin:0 0 .5rem}\
.card a{color:inherit;text-decoration:none}\
.card a:hover{text-decoration:underline}\
.points{font-size:.875rem;color:#6b7280;margin:0 0 .25rem}\
.more{color:#3b82f6}\
.error{color:#ef4444}\
.bar{height:1rem;background:#e5e7eb;border-radius:.25rem;margin-bottom:.5rem}";

pub fn render(page: &Page) -> String {
    let mut out = page_markup(page).into_string();
    out.push('\n');
    out
}

/// The whole document. All text and attribute values are escaped by maud.
pub fn page_markup(page: &Page) -> Markup {
    let loading = matches!(page.body, Body::Skeleton(_));
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                @if loading {
                    meta http-equiv="refresh" content="1";
                }
                title { (page.heading) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h1 { (page.heading) }
                    form method="get" action="/" {
                        input type="text" name="q" placeholder="Search stories..." value=(page.search);
                    }
                }
                main {
                    @match &page.body {
                        Body::Skeleton(n) => {
                            @for _ in 0..*n {
                                (skeleton_card())
                            }
                        }
                        Body::Error(message) => {
                            p class="error" { (Page::error_line(message)) }
                        }
                        Body::Stories(cards) => {
                            @for card in cards {
                                (story_card(card))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn skeleton_card() -> Markup {
    html! {
        div class="card" aria-hidden="true" {
            @for width in SKELETON_BARS {
                div class="bar" style={ "width:" ((width * 100.0).round() as u32) "%" } {}
            }
        }
    }
}

fn story_card(card: &StoryCard) -> Markup {
    html! {
        article class="card" data-key=(card.key.0) {
            h2 {
                @if let Some(link) = &card.link {
                    a href=(link) target="_blank" rel="noopener noreferrer" { (card.title) }
                } @else {
                    (card.title)
                }
            }
            p class="points" { (card.points_label()) }
            @if let Some(link) = &card.link {
                a class="more" href=(link) target="_blank" rel="noopener noreferrer" { "Read more" }
            }
        }
    }
}
