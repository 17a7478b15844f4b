//! Show records and identifiers

use std::fmt;

use chrono::DateTime;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// Opaque identifier of a show.
///
/// The API hands out numeric ids, but route parameters arrive as text, so the
/// id is kept as a string and only turned back into a number on the wire.
///
/// # Examples
///
/// ```
/// use showtix_lib::model::ShowId;
///
/// let id = ShowId::from(42);
/// assert_eq!(id.as_str(), "42");
/// assert_eq!(serde_json::to_string(&id).unwrap(), "42");
///
/// let slug = ShowId::new("summer-gala");
/// assert_eq!(serde_json::to_string(&slug).unwrap(), "\"summer-gala\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShowId(String);

impl ShowId {
    /// Creates an id from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Returns the textual form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id as a number, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShowId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<i64> for ShowId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for ShowId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number().filter(|n| n.to_string() == self.0) {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ShowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from(n),
            Raw::Text(s) => Self::new(s),
        })
    }
}

/// A show as returned by the shows endpoint.
///
/// Only the fields the storefront displays are kept. Older API builds use
/// `ShowTitle`/`Filename`, which are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Show {
    #[serde(rename = "ShowID", alias = "ShowId", default)]
    pub show_id: Option<ShowId>,
    #[serde(rename = "Title", alias = "ShowTitle", default)]
    pub title: String,
    #[serde(rename = "FileName", alias = "Filename", default)]
    pub file_name: Option<String>,
    #[serde(rename = "VenueName", default)]
    pub venue_name: Option<String>,
    #[serde(rename = "ShowTime", default, deserialize_with = "deserialize_show_time")]
    pub show_time: Option<NaiveDateTime>,
    #[serde(rename = "CategoryName", default)]
    pub category_name: Option<String>,
}

impl Show {
    /// Creates a show with just an id and title.
    pub fn new(show_id: impl Into<ShowId>, title: impl Into<String>) -> Self {
        Self {
            show_id: Some(show_id.into()),
            title: title.into(),
            file_name: None,
            venue_name: None,
            show_time: None,
            category_name: None,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_name = Some(category.into());
        self
    }

    /// Sets the image file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Builds the full image URL from the image host's base URL.
    pub fn image_url(&self, base_url: &str) -> Option<String> {
        self.file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| format!("{}/{}", base_url.trim_end_matches('/'), name))
    }

    /// Human-readable show time, e.g. "Saturday, March 1, 2025 at 7:30 PM".
    pub fn display_time(&self) -> Option<String> {
        self.show_time
            .map(|t| t.format("%A, %B %-d, %Y at %-I:%M %p").to_string())
    }
}

/// Parses an ISO 8601 show time, with or without an offset.
///
/// Times with an offset keep their local wall-clock value.
pub fn parse_show_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn deserialize_show_time<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_show_time))
}
