use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::{Show, User};

/// A single episode of a show
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub episode_id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub show_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<Box<Show>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    pub author_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_original_url: Option<String>,
    /// Length in milliseconds
    pub duration: u64,
    pub plays_count: u64,
    pub likes_count: u64,
    pub messages_count: u64,
    pub download_enabled: bool,
    pub explicit: bool,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl Episode {
    /// Duration as `M:SS`, or `H:MM:SS` from one hour up
    pub fn duration_formatted(&self) -> String {
        let total_seconds = self.duration / 1000;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else {
            format!("{minutes}:{seconds:02}")
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EpisodeResponse {
    pub episode: Episode,
}
