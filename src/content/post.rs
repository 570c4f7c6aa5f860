//! Post metadata and loaded post models

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut tags = Vec::new();
            while let Some(tag) = seq.next_element::<String>()? {
                tags.push(tag);
            }
            Ok(tags)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Structured fields describing a post
///
/// Appears both in the manifest (JSON, `coverImage`) and at the top of each
/// post file (YAML).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frontmatter {
    pub title: String,
    /// ISO date string, e.g. `2024-06-01`
    pub date: String,
    pub author: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl Frontmatter {
    /// Parse the date field
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.date)
    }

    /// Long, human readable date ("June 1, 2024")
    ///
    /// Falls back to the raw string when the date does not parse.
    pub fn display_date(&self, format: &str) -> String {
        match self.parsed_date() {
            Some(date) => date.format(format).to_string(),
            None => self.date.clone(),
        }
    }

    /// First character of the author name, used for avatars
    pub fn author_initial(&self) -> Option<char> {
        self.author.trim().chars().next()
    }
}

/// Manifest entry for one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    /// Routing key, unique within the manifest
    pub slug: String,
    /// File name of the body under the posts directory
    pub filename: String,
    #[serde(default)]
    pub frontmatter: Frontmatter,
}

/// A post as handed to the detail view
///
/// `content` is only present when the body was retrieved successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub metadata: PostMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Post {
    /// A post whose body could not be retrieved
    pub fn metadata_only(metadata: PostMetadata) -> Self {
        Self {
            metadata,
            content: None,
        }
    }

    /// A post with its raw markdown body attached
    pub fn with_content(metadata: PostMetadata, content: String) -> Self {
        Self {
            metadata,
            content: Some(content),
        }
    }

    pub fn slug(&self) -> &str {
        &self.metadata.slug
    }

    pub fn frontmatter(&self) -> &Frontmatter {
        &self.metadata.frontmatter
    }
}

/// Parse a date string in the formats posts use
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
