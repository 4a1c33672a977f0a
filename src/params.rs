// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::Display;

use url::form_urlencoded;

/// Ordered string parameters, used both as query string and as form fields
///
/// Keys are unique: `set` replaces an existing value in place so the
/// original insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Set `key` only when a value is present
    pub fn set_opt<V: Display>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(key, value.to_string());
        }
    }

    /// Set `key` to "true"/"false" only when a value is present
    pub fn set_flag(&mut self, key: &str, value: Option<bool>) {
        self.set_opt(key, value.map(|v| if v { "true" } else { "false" }));
    }

    /// Overlay `other` on top of these params
    pub fn merge(mut self, other: &Params) -> Self {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

/// Page size, offset and continuation cursor for list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Query taken from a previous page's `next_url`, overlaid last
    pub cursor: Params,
}

impl PaginationParams {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Only non-zero values are sent
    pub fn to_params(self) -> Params {
        let mut params = Params::new();
        params.set_opt("limit", self.limit.filter(|l| *l > 0));
        params.set_opt("offset", self.offset.filter(|o| *o > 0));
        params.merge(&self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut params = Params::new().with("q", "first").with("type", "shows");
        params.set("q", "second");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("q", "second"), ("type", "shows")]);
    }

    #[test]
    fn encode_escapes_reserved_characters() {
        let params = Params::new().with("q", "rock & roll/jazz?").with("c", "it_IT");
        assert_eq!(params.encode(), "q=rock+%26+roll%2Fjazz%3F&c=it_IT");
    }

    #[test]
    fn optional_values_are_only_set_when_present() {
        let mut params = Params::new();
        params.set_opt("title", None::<String>);
        params.set_opt("category_id", Some(12));
        params.set_flag("explicit", Some(false));
        params.set_flag("hidden", None);

        assert_eq!(params.get("title"), None);
        assert_eq!(params.get("category_id"), Some("12"));
        assert_eq!(params.get("explicit"), Some("false"));
        assert_eq!(params.get("hidden"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn merge_overlays_values() {
        let base = Params::new().with("limit", "20").with("q", "news");
        let overlay = Params::new().with("limit", "50").with("last_id", "42");

        let merged = base.merge(&overlay);
        assert_eq!(merged.get("limit"), Some("50"));
        assert_eq!(merged.get("q"), Some("news"));
        assert_eq!(merged.get("last_id"), Some("42"));
    }

    #[test]
    fn pagination_skips_zero_values() {
        let params = PaginationParams {
            limit: Some(0),
            offset: Some(40),
            ..Default::default()
        }
        .to_params();

        assert_eq!(params.get("limit"), None);
        assert_eq!(params.get("offset"), Some("40"));
        assert!(PaginationParams::default().to_params().is_empty());
    }

    #[test]
    fn cursor_overlays_limit() {
        let params = PaginationParams {
            limit: Some(20),
            offset: None,
            cursor: Params::new().with("limit", "20").with("last_id", "99"),
        }
        .to_params();

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("limit", "20"), ("last_id", "99")]);
    }
}
