use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A single story as confirmed by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller supplies before the server assigns an id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}

impl Story {
    /// Authority of the story url: host plus the port when one is given explicitly.
    pub fn host_name(&self) -> AppResult<String> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", self.url, e)))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| AppError::InvalidUrl(format!("{}: url has no host", self.url)))?;

        Ok(match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }
}
