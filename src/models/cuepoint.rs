use serde::{Deserialize, Serialize};

/// An ad insertion point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cuepoint {
    /// Position in milliseconds
    pub timecode: u64,
    pub ads_max_count: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CuepointsResponse {
    #[serde(default)]
    pub cuepoints: Vec<Cuepoint>,
}
