// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::params::Params;

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Full URL of the next page, as sent by the API
    pub next_url: Option<String>,
    /// True iff `next_url` is a non-empty string
    pub has_more: bool,
}

/// Wire shape of a list payload
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct RawPage<T> {
    /// `null` or missing means an empty page
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_url: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> From<RawPage<T>> for Page<T> {
    fn from(raw: RawPage<T>) -> Self {
        let next_url = raw.next_url.filter(|url| !url.is_empty());
        Self {
            items: raw.items,
            has_more: next_url.is_some(),
            next_url,
        }
    }
}

impl<T> Page<T> {
    /// Query parameters carried by `next_url` (e.g. `last_id`)
    ///
    /// Returns `None` on the last page or when `next_url` is not a valid URL.
    pub fn continuation(&self) -> Option<Params> {
        let next_url = self.next_url.as_deref()?;
        let url = Url::parse(next_url).ok()?;

        Some(
            url.query_pairs()
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the items, keeping the cursor
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_url: self.next_url,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    fn parse(json: &str) -> Page<Item> {
        serde_json::from_str::<RawPage<Item>>(json).unwrap().into()
    }

    #[test]
    fn empty_next_url_ends_pagination() {
        let page = parse(r#"{"items":[{"id":1},{"id":2}],"next_url":""}"#);

        assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert!(!page.has_more);
        assert_eq!(page.next_url, None);
        assert_eq!(page.continuation(), None);
    }

    #[test]
    fn missing_or_null_next_url_ends_pagination() {
        assert!(!parse(r#"{"items":[]}"#).has_more);
        assert!(!parse(r#"{"items":[],"next_url":null}"#).has_more);
    }

    #[test]
    fn null_or_missing_items_is_an_empty_page() {
        let page = parse(r#"{"items":null,"next_url":""}"#);
        assert!(page.is_empty());
        assert!(!page.has_more);

        assert!(parse(r#"{"next_url":null}"#).is_empty());
    }

    #[test]
    fn non_empty_next_url_has_more() {
        let page = parse(
            r#"{
                "items": [{"id": 3}],
                "next_url": "https://api.spreaker.com/v2/shows/1/episodes?limit=1&last_id=42"
            }"#,
        );

        assert!(page.has_more);
        let continuation = page.continuation().unwrap();
        assert_eq!(continuation.get("last_id"), Some("42"));
        assert_eq!(continuation.get("limit"), Some("1"));
    }

    #[test]
    fn unparseable_next_url_still_has_more() {
        let page = parse(r#"{"items":[],"next_url":"not a url"}"#);

        assert!(page.has_more);
        assert_eq!(page.continuation(), None);
    }

    #[test]
    fn map_keeps_cursor() {
        let page = parse(r#"{"items":[{"id":5}],"next_url":"https://x.test/?last_id=5"}"#);
        let ids = page.map(|item| item.id);

        assert_eq!(ids.items, vec![5]);
        assert!(ids.has_more);
    }
}
