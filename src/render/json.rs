//! JSON rendering, shared by `hnf list --format json` and `GET /api/stories`.

use serde::Serialize;

use crate::view::{Body, Page, StoryCard};

/// Wire shape of a rendered page, externally tagged by body kind:
/// `{"loading": {"skeletons": 5}}`, `{"error": {"message": "..."}}` or
/// `{"stories": [...]}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageBody<'a> {
    Loading { skeletons: usize },
    Error { message: &'a str },
    Stories(&'a [StoryCard]),
}

impl<'a> From<&'a Page> for PageBody<'a> {
    fn from(page: &'a Page) -> Self {
        match &page.body {
            Body::Skeleton(n) => PageBody::Loading { skeletons: *n },
            Body::Error(message) => PageBody::Error {
                message: message.as_str(),
            },
            Body::Stories(cards) => PageBody::Stories(cards),
        }
    }
}

pub fn to_value(page: &Page) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(PageBody::from(page))
}

pub fn render(page: &Page) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(&PageBody::from(page))?;
    out.push('\n');
    Ok(out)
}
