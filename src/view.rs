//! The filtered view model.
//!
//! The page is a pure function of two inputs: the user's [`SearchState`] and
//! the [`FetchState`] of the single request. [`render`] turns them into a
//! [`Page`], which every front end (text, HTML, terminal UI) draws without
//! consulting anything else. Nothing here caches between renders; filtering
//! borrows the fetched stories and never reorders or mutates them.

use serde::Serialize;

use crate::config::ViewConfig;
use crate::fetch::FetchError;
use crate::models::{Story, StoryId};

/// Lifecycle of the one fetch a view performs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Loading,
    Error(String),
    Success(Vec<Story>),
}

impl From<Result<Vec<Story>, FetchError>> for FetchState {
    fn from(result: Result<Vec<Story>, FetchError>) -> Self {
        match result {
            Ok(stories) => FetchState::Success(stories),
            Err(e) => FetchState::Error(e.message),
        }
    }
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

/// Search box contents. The cursor is a char index into `query`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub cursor: usize,
}

impl SearchState {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let cursor = query.chars().count();
        Self { query, cursor }
    }

    /// Replace the whole value, as a form input's change event does.
    pub fn set(&mut self, query: impl Into<String>) {
        *self = Self::new(query);
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the char before the cursor. Returns whether anything changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.query.remove(at);
        true
    }

    /// Delete the char under the cursor. Returns whether anything changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.query.chars().count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.query.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.query.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.query.chars().count();
    }

    /// Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        if self.query.is_empty() {
            return false;
        }
        self.set(String::new());
        true
    }

    /// The part of the query left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.query[..self.byte_offset(self.cursor)]
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }
}

/// Case-insensitive substring match on the title. An empty query matches
/// everything.
pub fn matches(story: &Story, query: &str) -> bool {
    story.title.to_lowercase().contains(&query.to_lowercase())
}

/// Stories whose title contains `query`, in source order.
pub fn filter_stories<'a>(stories: &'a [Story], query: &str) -> Vec<&'a Story> {
    stories.iter().filter(|s| matches(s, query)).collect()
}

/// One rendered story.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryCard {
    pub key: StoryId,
    pub title: String,
    /// Shared by the title and the "Read more" link. `None` renders the title
    /// as plain text and drops the secondary link.
    pub link: Option<String>,
    pub points: Option<i64>,
}

impl StoryCard {
    pub fn from_story(story: &Story) -> Self {
        Self {
            key: story.object_id.clone(),
            title: story.title.clone(),
            link: story.link().map(str::to_string),
            points: story.points,
        }
    }

    /// `Upvotes: N`, blank when the source sent no points.
    pub fn points_label(&self) -> String {
        match self.points {
            Some(p) => format!("Upvotes: {}", p),
            None => "Upvotes: ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Number of placeholder cards to draw.
    Skeleton(usize),
    Error(String),
    Stories(Vec<StoryCard>),
}

/// Everything a front end needs to draw the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub heading: String,
    pub search: String,
    pub body: Body,
}

impl Page {
    /// The single error line, exactly as displayed.
    pub fn error_line(message: &str) -> String {
        format!("Error: {}", message)
    }

    pub fn cards(&self) -> &[StoryCard] {
        match &self.body {
            Body::Stories(cards) => cards,
            _ => &[],
        }
    }
}

pub fn render(search: &SearchState, fetch: &FetchState, config: &ViewConfig) -> Page {
    let body = match fetch {
        FetchState::Loading => Body::Skeleton(config.skeleton_count),
        FetchState::Error(message) => Body::Error(message.clone()),
        FetchState::Success(stories) => Body::Stories(
            filter_stories(stories, &search.query)
                .into_iter()
                .map(StoryCard::from_story)
                .collect(),
        ),
    };

    Page {
        heading: config.heading.clone(),
        search: search.query.clone(),
        body,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    pub(crate) fn story(id: &str, title: &str, points: i64, url: Option<&str>) -> Story {
        Story {
            object_id: StoryId::from(id),
            title: title.to_string(),
            url: url.map(str::to_string),
            points: Some(points),
        }
    }

    pub(crate) fn sample() -> Vec<Story> {
        vec![
            story("1", "Rust is great", 120, Some("http://a")),
            story("2", "Go vs Java", 80, Some("http://b")),
        ]
    }

    fn titles(page: &Page) -> Vec<&str> {
        page.cards().iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let page = render(
            &SearchState::new("go"),
            &FetchState::Success(sample()),
            &ViewConfig::default(),
        );
        assert_eq!(titles(&page), vec!["Go vs Java"]);
        assert_eq!(page.cards()[0].points, Some(80));
        assert_eq!(page.cards()[0].points_label(), "Upvotes: 80");
    }

    #[test]
    fn empty_search_keeps_everything_in_order() {
        let page = render(
            &SearchState::default(),
            &FetchState::Success(sample()),
            &ViewConfig::default(),
        );
        assert_eq!(titles(&page), vec!["Rust is great", "Go vs Java"]);
    }

    #[test]
    fn filter_matches_predicate_and_preserves_order() {
        let stories = vec![
            story("a", "Show HN: a parser", 1, None),
            story("b", "Ask HN: parsers?", 2, None),
            story("c", "Unrelated", 3, None),
            story("d", "PARSER combinators", 4, None),
        ];
        for query in ["", "parser", "PARS", "hn", "zzz", "er c"] {
            let got: Vec<&str> = filter_stories(&stories, query)
                .iter()
                .map(|s| s.object_id.0.as_str())
                .collect();
            let needle = query.to_lowercase();
            let want: Vec<&str> = stories
                .iter()
                .filter(|s| s.title.to_lowercase().contains(&needle))
                .map(|s| s.object_id.0.as_str())
                .collect();
            assert_eq!(got, want, "query {:?}", query);
        }
        let ids: Vec<&str> = filter_stories(&stories, "parser")
            .iter()
            .map(|s| s.object_id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
    }

    #[test]
    fn filtering_does_not_touch_the_fetched_list() {
        let fetch = FetchState::Success(sample());
        let before = fetch.clone();
        let _ = render(&SearchState::new("rust"), &fetch, &ViewConfig::default());
        assert_eq!(fetch, before);
    }

    #[test]
    fn loading_renders_five_skeletons_whatever_the_search() {
        for query in ["", "go", "anything"] {
            let page = render(
                &SearchState::new(query),
                &FetchState::Loading,
                &ViewConfig::default(),
            );
            assert_eq!(page.body, Body::Skeleton(5));
            assert!(page.cards().is_empty());
        }
    }

    #[test]
    fn error_replaces_the_list() {
        let page = render(
            &SearchState::default(),
            &FetchState::Error("Network response was not ok".to_string()),
            &ViewConfig::default(),
        );
        assert!(page.cards().is_empty());
        match &page.body {
            Body::Error(msg) => assert_eq!(
                Page::error_line(msg),
                "Error: Network response was not ok"
            ),
            other => panic!("expected error body, got {:?}", other),
        }
    }

    #[test]
    fn keys_are_story_ids_even_when_titles_collide() {
        let stories = vec![
            story("10", "Same title", 1, None),
            story("11", "Same title", 2, None),
        ];
        let page = render(
            &SearchState::default(),
            &FetchState::Success(stories),
            &ViewConfig::default(),
        );
        let keys: Vec<&str> = page.cards().iter().map(|c| c.key.0.as_str()).collect();
        assert_eq!(keys, vec!["10", "11"]);
        let unique: HashSet<&str> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn card_without_url_has_no_link() {
        let card = StoryCard::from_story(&story("1", "Ask HN: anything", 5, None));
        assert_eq!(card.link, None);
        let card = StoryCard::from_story(&story("2", "t", 5, Some("https://x.dev")));
        assert_eq!(card.link.as_deref(), Some("https://x.dev"));
    }

    #[test]
    fn fetch_result_converts_to_state() {
        let ok: FetchState = Ok(sample()).into();
        assert!(matches!(ok, FetchState::Success(ref s) if s.len() == 2));
        let err: FetchState = Err(FetchError::new("boom")).into();
        assert_eq!(err, FetchState::Error("boom".to_string()));
    }

    #[test]
    fn search_state_editing() {
        let mut s = SearchState::default();
        for c in "gö".chars() {
            s.insert(c);
        }
        assert_eq!(s.query, "gö");
        s.move_left();
        s.insert('x');
        assert_eq!(s.query, "gxö");
        assert!(s.backspace());
        assert_eq!(s.query, "gö");
        s.home();
        assert!(!s.backspace());
        assert!(s.delete());
        assert_eq!(s.query, "ö");
        s.end();
        assert!(!s.delete());
        assert!(s.clear());
        assert!(!s.clear());
        assert_eq!(s.cursor, 0);
    }
}
