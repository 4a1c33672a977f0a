use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{Episode, Show, ShowResponse};
use crate::pagination::Page;
use crate::params::{PaginationParams, Params};

use super::require_non_empty;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateShowParams {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<u64>,
    pub language: Option<String>,
    pub explicit: Option<bool>,
}

impl CreateShowParams {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new().with("title", self.title.as_str());
        params.set_opt("description", self.description.as_deref());
        params.set_opt("category_id", self.category_id);
        params.set_opt("language", self.language.as_deref());
        params.set_flag("explicit", self.explicit);
        params
    }
}

/// Show fields to change; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateShowParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<u64>,
    pub language: Option<String>,
    pub explicit: Option<bool>,
}

impl UpdateShowParams {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("title", self.title.as_deref());
        params.set_opt("description", self.description.as_deref());
        params.set_opt("category_id", self.category_id);
        params.set_opt("language", self.language.as_deref());
        params.set_flag("explicit", self.explicit);
        params
    }
}

impl<C: HttpClient> Client<C> {
    pub async fn get_show(&self, show_id: u64) -> Result<Show, ClientError> {
        let response: ShowResponse = self.get(&format!("/shows/{show_id}"), &Params::new()).await?;
        Ok(response.show)
    }

    pub async fn create_show(&self, show: &CreateShowParams) -> Result<Show, ClientError> {
        self.require_auth()?;
        require_non_empty("title", &show.title)?;
        let response: ShowResponse = self.post_form("/shows", &show.to_params()).await?;
        Ok(response.show)
    }

    pub async fn update_show(
        &self,
        show_id: u64,
        update: &UpdateShowParams,
    ) -> Result<Show, ClientError> {
        self.require_auth()?;
        let response: ShowResponse = self
            .post_form(&format!("/shows/{show_id}"), &update.to_params())
            .await?;
        Ok(response.show)
    }

    pub async fn delete_show(&self, show_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/shows/{show_id}")).await
    }

    pub async fn get_show_episodes(
        &self,
        show_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<Episode>, ClientError> {
        self.get_page(&format!("/shows/{show_id}/episodes"), &pagination.to_params())
            .await
    }

    pub async fn add_show_to_favorites(
        &self,
        user_id: u64,
        show_id: u64,
    ) -> Result<(), ClientError> {
        self.require_auth()?;
        self.put_no_content(&format!("/users/{user_id}/favorites/{show_id}"))
            .await
    }

    pub async fn remove_show_from_favorites(
        &self,
        user_id: u64,
        show_id: u64,
    ) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/users/{user_id}/favorites/{show_id}"))
            .await
    }

    pub async fn get_favorite_shows(
        &self,
        user_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<Show>, ClientError> {
        self.get_page(&format!("/users/{user_id}/favorites"), &pagination.to_params())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client_with;
    use crate::http::{Method, RequestBody};

    #[tokio::test]
    async fn get_show_unwraps_show_key() {
        let client = client_with(
            "",
            vec![(200, r#"{"response":{"show":{"show_id":123,"title":"Foo"}}}"#)],
        );

        let show = client.get_show(123).await.unwrap();

        assert_eq!(show.show_id, 123);
        assert_eq!(show.title, "Foo");
    }

    #[tokio::test]
    async fn create_show_requires_title() {
        let client = client_with("tok", vec![]);

        let err = client.create_show(&CreateShowParams::new("  ")).await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidArgument(_)));
        assert_eq!(client.http().call_count(), 0);
    }

    #[tokio::test]
    async fn create_show_posts_form() {
        let client = client_with(
            "tok",
            vec![(200, r#"{"response":{"show":{"show_id":1,"title":"New"}}}"#)],
        );
        let show = CreateShowParams {
            category_id: Some(12),
            explicit: Some(true),
            ..CreateShowParams::new("New")
        };

        client.create_show(&show).await.unwrap();

        let request = &client.http().requests()[0];
        assert_eq!(request.url, "https://api.spreaker.com/v2/shows");
        assert_eq!(
            request.body,
            RequestBody::Multipart {
                fields: vec![
                    ("title".to_string(), "New".to_string()),
                    ("category_id".to_string(), "12".to_string()),
                    ("explicit".to_string(), "true".to_string()),
                ],
                file: None,
            }
        );
    }

    #[tokio::test]
    async fn update_with_no_fields_sends_empty_form() {
        let client = client_with(
            "tok",
            vec![(200, r#"{"response":{"show":{"show_id":4}}}"#)],
        );

        client.update_show(4, &UpdateShowParams::default()).await.unwrap();

        assert_eq!(
            client.http().requests()[0].body,
            RequestBody::Multipart {
                fields: vec![],
                file: None
            }
        );
    }

    #[tokio::test]
    async fn delete_show_surfaces_not_found() {
        let client = client_with(
            "tok",
            vec![(404, r#"{"response":{"error":{"code":404,"messages":["Show not found"]}}}"#)],
        );

        let err = client.delete_show(4).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(client.http().requests()[0].method, Method::Delete);
    }

    #[tokio::test]
    async fn favorites_require_token() {
        let client = client_with("", vec![]);

        assert!(matches!(
            client.add_show_to_favorites(1, 2).await,
            Err(ClientError::AuthRequired)
        ));
        assert!(matches!(
            client.remove_show_from_favorites(1, 2).await,
            Err(ClientError::AuthRequired)
        ));
        assert_eq!(client.http().call_count(), 0);
    }
}
