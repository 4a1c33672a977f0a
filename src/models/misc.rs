use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A show category; `level` 1 is top-level, 2 a subcategory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub category_id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GooglePlayCategory {
    pub category_id: u64,
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// A show as listed by the explore endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreShow {
    pub show_id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_original_url: Option<String>,
    pub author_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GooglePlayCategoriesResponse {
    #[serde(default)]
    pub googleplay_categories: Vec<GooglePlayCategory>,
}

/// Languages come back as a `code -> name` object
#[derive(Debug, Deserialize)]
pub(crate) struct LanguagesResponse {
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
}

impl LanguagesResponse {
    /// Languages ordered by code
    pub fn into_sorted(self) -> Vec<Language> {
        self.languages
            .into_iter()
            .map(|(code, name)| Language { code, name })
            .collect()
    }
}
