use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::Message;
use crate::pagination::Page;
use crate::params::{PaginationParams, Params};

pub const MAX_MESSAGE_LENGTH: usize = 4000;

impl<C: HttpClient> Client<C> {
    pub async fn get_episode_messages(
        &self,
        episode_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<Message>, ClientError> {
        self.get_page(&format!("/episodes/{episode_id}/messages"), &pagination.to_params())
            .await
    }

    pub async fn create_message(&self, episode_id: u64, text: &str) -> Result<(), ClientError> {
        self.require_auth()?;
        if text.is_empty() {
            return Err(ClientError::InvalidArgument("text is required".to_string()));
        }
        if text.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ClientError::InvalidArgument(format!(
                "text exceeds maximum length of {MAX_MESSAGE_LENGTH} characters"
            )));
        }

        let fields = Params::new().with("text", text);
        self.post_form_no_content(&format!("/episodes/{episode_id}/messages"), &fields)
            .await
    }

    pub async fn delete_message(
        &self,
        episode_id: u64,
        message_id: u64,
    ) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/episodes/{episode_id}/messages/{message_id}"))
            .await
    }

    pub async fn report_message_abuse(
        &self,
        episode_id: u64,
        message_id: u64,
    ) -> Result<(), ClientError> {
        self.require_auth()?;
        self.post_json_no_content(
            &format!("/episodes/{episode_id}/messages/{message_id}/report-abuse"),
            None::<&()>,
        )
        .await
    }
}
