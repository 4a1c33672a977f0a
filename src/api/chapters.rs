use std::path::PathBuf;

use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{Chapter, ChapterResponse};
use crate::pagination::Page;
use crate::params::{PaginationParams, Params};

/// Chapter fields; adding a chapter needs `starts_at` and `title`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterParams {
    /// Offset in milliseconds
    pub starts_at: Option<u64>,
    pub title: Option<String>,
    pub external_url: Option<String>,
    /// Local image uploaded as the `image_file` part
    pub image_file: Option<PathBuf>,
    pub image_crop: Option<String>,
}

impl ChapterParams {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("starts_at", self.starts_at);
        params.set_opt("title", self.title.as_deref());
        params.set_opt("external_url", self.external_url.as_deref());
        params.set_opt("image_crop", self.image_crop.as_deref());
        params
    }
}

impl<C: HttpClient> Client<C> {
    pub async fn get_episode_chapters(
        &self,
        episode_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<Chapter>, ClientError> {
        self.get_page(&format!("/episodes/{episode_id}/chapters"), &pagination.to_params())
            .await
    }

    pub async fn add_chapter(
        &self,
        episode_id: u64,
        chapter: &ChapterParams,
    ) -> Result<Chapter, ClientError> {
        self.require_auth()?;
        if chapter.starts_at.is_none() {
            return Err(ClientError::InvalidArgument("starts_at is required".to_string()));
        }
        if chapter.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(ClientError::InvalidArgument("title is required".to_string()));
        }

        self.send_chapter(&format!("/episodes/{episode_id}/chapters"), chapter)
            .await
    }

    pub async fn update_chapter(
        &self,
        episode_id: u64,
        chapter_id: u64,
        chapter: &ChapterParams,
    ) -> Result<Chapter, ClientError> {
        self.require_auth()?;
        self.send_chapter(&format!("/episodes/{episode_id}/chapters/{chapter_id}"), chapter)
            .await
    }

    pub async fn delete_chapter(
        &self,
        episode_id: u64,
        chapter_id: u64,
    ) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/episodes/{episode_id}/chapters/{chapter_id}"))
            .await
    }

    pub async fn delete_all_chapters(&self, episode_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/episodes/{episode_id}/chapters"))
            .await
    }

    async fn send_chapter(
        &self,
        path: &str,
        chapter: &ChapterParams,
    ) -> Result<Chapter, ClientError> {
        let fields = chapter.to_params();
        let response: ChapterResponse = match &chapter.image_file {
            Some(image) => self.post_form_with_file(path, &fields, "image_file", image).await?,
            None => self.post_form(path, &fields).await?,
        };
        Ok(response.chapter)
    }
}
