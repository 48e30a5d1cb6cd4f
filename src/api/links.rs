//! Plain HAL-style `_links` assembly.
//!
//! Responses carry structured data plus an explicit link map; handlers
//! build the map themselves, so the core services never know about
//! hypermedia.
use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
            media_type: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// Link map keyed by relation, serialized as the `_links` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Links(BTreeMap<&'static str, Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, rel: &'static str, link: Link) -> Self {
        self.0.insert(rel, link);
        self
    }
}
