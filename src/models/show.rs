use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::{Category, User};

/// A podcast show
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Show {
    pub show_id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_original_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    pub author_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub episodes_count: u64,
    pub followers_count: u64,
    pub plays_count: u64,
    pub likes_count: u64,
    pub explicit: bool,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub last_episode_at: Option<NaiveDateTime>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShowResponse {
    pub show: Show,
}
