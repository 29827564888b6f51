use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Author shown when a publication carries none.
pub const DEFAULT_AUTHOR: &str = "Superform";

/// A content item handed to a plugin for publishing.
///
/// Owned by the host; plugins only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Publication {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_link(mut self, link_url: impl Into<String>) -> Self {
        self.link_url = Some(link_url.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Author name, or [`DEFAULT_AUTHOR`] when unset or blank.
    pub fn author(&self) -> &str {
        self.author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(DEFAULT_AUTHOR)
    }

    /// Link URL, treating an empty string as absent.
    pub fn link(&self) -> Option<&str> {
        self.link_url.as_deref().filter(|l| !l.is_empty())
    }

    /// Image URL, treating an empty string as absent.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|i| !i.is_empty())
    }
}

/// Per-channel configuration stored by the host as a JSON object of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelConfig {
    values: HashMap<String, String>,
}

impl ChannelConfig {
    /// Decode the host's stored config string.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| Error::ConfigDecode { source })
    }

    /// Decode the config string straight into a plugin-specific shape.
    pub fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
        serde_json::from_str(raw).map_err(|source| Error::ConfigDecode { source })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::missing_key(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.values).map_err(|source| Error::ConfigDecode { source })
    }
}

/// The host's channel record, passed through to configuration views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub module: String,
    #[serde(default = "empty_config")]
    pub config: String,
}

fn empty_config() -> String {
    "{}".into()
}

/// One field of a channel's configuration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ConfigField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}
