//! Data types decoded from the search API.
//!
//! Only the fields the view needs are kept. Records are never validated: a
//! story whose fields are missing, null or of the wrong JSON type still
//! decodes and renders with blanks, and one odd record never rejects the
//! rest of the response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Source-assigned story identifier. The API sends strings, but numeric ids
/// are accepted too and kept in their textual form. Anything else decodes as
/// an empty id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct StoryId(pub String);

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(s: &str) -> Self {
        StoryId(s.to_string())
    }
}

impl<'de> Deserialize<'de> for StoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => StoryId(s),
            Value::Number(n) => StoryId(n.to_string()),
            _ => StoryId::default(),
        })
    }
}

/// One front-page item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(rename = "objectID", default)]
    pub object_id: StoryId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_url")]
    pub url: Option<String>,
    /// Integers, integral floats and numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient_points")]
    pub points: Option<i64>,
}

impl Story {
    /// Link target, with empty strings treated as absent.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Decode one hit. A hit that is not even an object becomes a blank story.
    pub fn from_value(value: Value) -> Self {
        Story::deserialize(value).unwrap_or_default()
    }
}

/// Top-level search response. Everything except `hits` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_hits")]
    pub hits: Vec<Story>,
}

fn lenient_hits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Story>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(Story::from_value).collect(),
        _ => Vec::new(),
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
