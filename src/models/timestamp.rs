//! Serde adapter for API timestamps in `YYYY-MM-DD HH:MM:SS` form.
//!
//! Use with `#[serde(default, with = "timestamp")]` on an
//! `Option<NaiveDateTime>` field. `null`, an empty string and a missing
//! field all become `None`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(datetime) => serializer.serialize_str(&datetime.format(FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => NaiveDateTime::parse_from_str(text, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
