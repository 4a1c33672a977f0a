use serde::{Deserialize, Serialize};

/// A chapter marker inside an episode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub chapter_id: u64,
    /// Offset from the start of the episode in milliseconds
    pub starts_at: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_original_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChapterResponse {
    pub chapter: Chapter,
}
