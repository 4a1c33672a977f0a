use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{Episode, Show};
use crate::pagination::Page;
use crate::params::{PaginationParams, Params};

use super::with_pagination;

/// Free-text query plus an optional `filter` ("listenable" or "editable")
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub filter: Option<String>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter: None,
        }
    }

    /// Query for `kind` ("shows" or "episodes"), without pagination
    pub fn to_query(&self, kind: &str) -> Params {
        let mut params = Params::new().with("type", kind);
        if !self.query.is_empty() {
            params.set("q", self.query.as_str());
        }
        params.set_opt("filter", self.filter.as_deref());
        params
    }

    fn to_params(&self, kind: &str, pagination: PaginationParams) -> Params {
        with_pagination(self.to_query(kind), pagination)
    }
}

impl<C: HttpClient> Client<C> {
    pub async fn search_shows(
        &self,
        search: &SearchParams,
        pagination: PaginationParams,
    ) -> Result<Page<Show>, ClientError> {
        self.get_page("/search", &search.to_params("shows", pagination))
            .await
    }

    /// Shows owned by `user_id` matching the query
    pub async fn search_user_shows(
        &self,
        user_id: u64,
        search: &SearchParams,
        pagination: PaginationParams,
    ) -> Result<Page<Show>, ClientError> {
        self.get_page(
            &format!("/search/users/{user_id}"),
            &search.to_params("shows", pagination),
        )
        .await
    }

    pub async fn search_episodes(
        &self,
        search: &SearchParams,
        pagination: PaginationParams,
    ) -> Result<Page<Episode>, ClientError> {
        self.get_page("/search", &search.to_params("episodes", pagination))
            .await
    }

    pub async fn search_user_episodes(
        &self,
        user_id: u64,
        search: &SearchParams,
        pagination: PaginationParams,
    ) -> Result<Page<Episode>, ClientError> {
        self.get_page(
            &format!("/search/users/{user_id}"),
            &search.to_params("episodes", pagination),
        )
        .await
    }

    pub async fn search_show_episodes(
        &self,
        show_id: u64,
        search: &SearchParams,
        pagination: PaginationParams,
    ) -> Result<Page<Episode>, ClientError> {
        self.get_page(
            &format!("/search/shows/{show_id}"),
            &search.to_params("episodes", pagination),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client_with;

    const EMPTY_PAGE: &str = r#"{"response":{"items":[],"next_url":""}}"#;

    #[tokio::test]
    async fn search_shows_encodes_query() {
        let client = client_with("", vec![(200, EMPTY_PAGE)]);
        let search = SearchParams {
            query: "rock & roll".to_string(),
            filter: Some("listenable".to_string()),
        };

        client
            .search_shows(&search, PaginationParams::limit(5))
            .await
            .unwrap();

        let url = &client.http().requests()[0].url;
        assert_eq!(
            url.strip_prefix("https://api.spreaker.com/v2"),
            Some("/search?type=shows&q=rock+%26+roll&filter=listenable&limit=5")
        );
    }

    #[tokio::test]
    async fn scoped_searches_hit_scoped_paths() {
        let client = client_with("", vec![(200, EMPTY_PAGE), (200, EMPTY_PAGE)]);
        let search = SearchParams::new("news");

        client
            .search_user_episodes(3, &search, PaginationParams::default())
            .await
            .unwrap();
        client
            .search_show_episodes(8, &search, PaginationParams::default())
            .await
            .unwrap();

        let urls: Vec<_> = client.http().requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.spreaker.com/v2/search/users/3?type=episodes&q=news".to_string(),
                "https://api.spreaker.com/v2/search/shows/8?type=episodes&q=news".to_string(),
            ]
        );
    }
}
