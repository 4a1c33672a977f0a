use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Episode, Show, User};

/// Statistics payloads all arrive under a `statistics` key
#[derive(Debug, Deserialize)]
pub(crate) struct StatisticsResponse<T> {
    pub statistics: T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserOverallStatistics {
    pub plays_count: u64,
    pub plays_ondemand_count: u64,
    pub plays_live_count: u64,
    pub shows_count: u64,
    pub episodes_count: u64,
    pub likes_count: u64,
    pub downloads_count: u64,
    pub followers_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowOverallStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub plays_count: u64,
    pub plays_ondemand_count: u64,
    pub plays_live_count: u64,
    pub episodes_count: u64,
    pub downloads_count: u64,
    pub likes_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<Show>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeOverallStatistics {
    pub plays_count: u64,
    pub plays_ondemand_count: u64,
    pub plays_live_count: u64,
    pub chapters_count: u64,
    pub messages_count: u64,
    pub likes_count: u64,
    pub downloads_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<Episode>,
}

/// One day (or group bucket) of play counts; `date` is `YYYY-MM-DD`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayStatistics {
    pub date: String,
    pub plays_count: u64,
    pub plays_live_count: u64,
    pub plays_ondemand_count: u64,
    pub downloads_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowPlayTotals {
    pub show_id: u64,
    pub title: String,
    pub is_deleted: bool,
    pub is_transferred: bool,
    pub plays_count: u64,
    pub plays_live_count: u64,
    pub plays_ondemand_count: u64,
    pub downloads_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodePlayTotals {
    pub episode_id: u64,
    pub title: String,
    pub is_deleted: bool,
    pub is_transferred: bool,
    pub plays_count: u64,
    pub plays_live_count: u64,
    pub plays_ondemand_count: u64,
    pub downloads_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikesStatistics {
    pub date: String,
    pub likes_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowersStatistics {
    pub date: String,
    pub followers_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenersStatistics {
    pub date: String,
    pub listeners_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOverall {
    pub name: String,
    pub plays_count: u64,
    pub percentage: f64,
}

/// Play sources; `details` rows have no fixed shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesStatistics {
    pub overall: Vec<SourceOverall>,
    pub details: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceStatistics {
    pub name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsStatistics {
    pub name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsStatisticsBreakdown {
    pub desktop: Vec<OsStatistics>,
    pub mobile: Vec<OsStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoStatistics {
    pub name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeographicStatistics {
    pub country: Vec<GeoStatistics>,
    pub city: Vec<GeoStatistics>,
}
