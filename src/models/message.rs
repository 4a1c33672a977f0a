use serde::{Deserialize, Serialize};

/// A listener message left on an episode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub message_id: u64,
    pub episode_id: u64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub author_id: u64,
    pub author_username: String,
    pub author_fullname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_site_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_image_original_url: Option<String>,
    pub author_is_owner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_url: Option<String>,
}
