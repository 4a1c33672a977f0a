use std::path::PathBuf;

use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{Episode, EpisodeResponse, User};
use crate::pagination::Page;
use crate::params::{PaginationParams, Params};

use super::{join_tags, require_non_empty};

/// A new episode together with its audio file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadEpisodeParams {
    pub title: String,
    pub media_file: PathBuf,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub explicit: Option<bool>,
    pub download_enabled: Option<bool>,
    pub hidden: Option<bool>,
    /// Scheduled publish time, `YYYY-MM-DD HH:MM:SS`
    pub auto_published_at: Option<String>,
}

impl UploadEpisodeParams {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new().with("title", self.title.as_str());
        params.set_opt("description", self.description.as_deref());
        if !self.tags.is_empty() {
            params.set("tags", join_tags(&self.tags));
        }
        params.set_flag("explicit", self.explicit);
        params.set_flag("download_enabled", self.download_enabled);
        params.set_flag("hidden", self.hidden);
        params.set_opt("auto_published_at", self.auto_published_at.as_deref());
        params
    }
}

/// An episode without audio, to be completed later
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDraftEpisodeParams {
    pub title: String,
    pub show_id: u64,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub explicit: Option<bool>,
    pub download_enabled: Option<bool>,
    pub hidden: Option<bool>,
}

impl CreateDraftEpisodeParams {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("title", self.title.as_str())
            .with("show_id", self.show_id.to_string());
        params.set_opt("description", self.description.as_deref());
        if !self.tags.is_empty() {
            params.set("tags", join_tags(&self.tags));
        }
        params.set_flag("explicit", self.explicit);
        params.set_flag("download_enabled", self.download_enabled);
        params.set_flag("hidden", self.hidden);
        params
    }
}

/// Episode fields to change; `None` leaves a field untouched
///
/// `tags: Some(vec![])` clears the tags. `auto_published_at: Some("")`
/// removes a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEpisodeParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub explicit: Option<bool>,
    pub download_enabled: Option<bool>,
    pub hidden: Option<bool>,
    /// Move the episode to another show
    pub show_id: Option<u64>,
    pub auto_published_at: Option<String>,
}

impl UpdateEpisodeParams {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("title", self.title.as_deref());
        params.set_opt("description", self.description.as_deref());
        params.set_opt("tags", self.tags.as_deref().map(join_tags));
        params.set_flag("explicit", self.explicit);
        params.set_flag("download_enabled", self.download_enabled);
        params.set_flag("hidden", self.hidden);
        params.set_opt("show_id", self.show_id);
        params.set_opt("auto_published_at", self.auto_published_at.as_deref());
        params
    }
}

#[derive(Deserialize)]
struct PlayUrl {
    url: String,
}

impl<C: HttpClient> Client<C> {
    pub async fn get_episode(&self, episode_id: u64) -> Result<Episode, ClientError> {
        let response: EpisodeResponse = self
            .get(&format!("/episodes/{episode_id}"), &Params::new())
            .await?;
        Ok(response.episode)
    }

    /// Upload a new episode to `show_id` as a multipart `media_file`
    pub async fn upload_episode(
        &self,
        show_id: u64,
        upload: &UploadEpisodeParams,
    ) -> Result<Episode, ClientError> {
        self.require_auth()?;
        require_non_empty("title", &upload.title)?;
        if upload.media_file.as_os_str().is_empty() {
            return Err(ClientError::InvalidArgument("media_file is required".to_string()));
        }

        let response: EpisodeResponse = self
            .post_form_with_file(
                &format!("/shows/{show_id}/episodes"),
                &upload.to_params(),
                "media_file",
                &upload.media_file,
            )
            .await?;
        Ok(response.episode)
    }

    pub async fn create_draft_episode(
        &self,
        draft: &CreateDraftEpisodeParams,
    ) -> Result<Episode, ClientError> {
        self.require_auth()?;
        require_non_empty("title", &draft.title)?;
        if draft.show_id == 0 {
            return Err(ClientError::InvalidArgument("show_id is required".to_string()));
        }

        let response: EpisodeResponse = self
            .post_form("/episodes/drafts", &draft.to_params())
            .await?;
        Ok(response.episode)
    }

    pub async fn update_episode(
        &self,
        episode_id: u64,
        update: &UpdateEpisodeParams,
    ) -> Result<Episode, ClientError> {
        self.require_auth()?;
        let response: EpisodeResponse = self
            .post_form(&format!("/episodes/{episode_id}"), &update.to_params())
            .await?;
        Ok(response.episode)
    }

    pub async fn delete_episode(&self, episode_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/episodes/{episode_id}")).await
    }

    pub async fn like_episode(&self, user_id: u64, episode_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.put_no_content(&format!("/users/{user_id}/likes/{episode_id}"))
            .await
    }

    pub async fn unlike_episode(&self, user_id: u64, episode_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/users/{user_id}/likes/{episode_id}"))
            .await
    }

    /// Whether `user_id` likes `episode_id`; a 404 means no
    pub async fn user_likes_episode(
        &self,
        user_id: u64,
        episode_id: u64,
    ) -> Result<bool, ClientError> {
        let result: Result<IgnoredAny, _> = self
            .get(&format!("/users/{user_id}/likes/{episode_id}"), &Params::new())
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Users who liked an episode
    pub async fn get_episode_likes(
        &self,
        episode_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<User>, ClientError> {
        self.get_page(&format!("/episodes/{episode_id}/likes"), &pagination.to_params())
            .await
    }

    pub async fn get_liked_episodes(
        &self,
        user_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<Episode>, ClientError> {
        self.get_page(&format!("/users/{user_id}/likes"), &pagination.to_params())
            .await
    }

    pub async fn bookmark_episode(&self, user_id: u64, episode_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.put_no_content(&format!("/users/{user_id}/bookmarks/{episode_id}"))
            .await
    }

    pub async fn unbookmark_episode(
        &self,
        user_id: u64,
        episode_id: u64,
    ) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/users/{user_id}/bookmarks/{episode_id}"))
            .await
    }

    /// Direct media URL behind the episode's download redirect
    pub async fn get_episode_download_url(&self, episode_id: u64) -> Result<String, ClientError> {
        self.resolve_redirect(&format!("/episodes/{episode_id}/download"))
            .await
    }

    pub async fn get_episode_play_url(&self, episode_id: u64) -> Result<String, ClientError> {
        let response: PlayUrl = self
            .get(&format!("/episodes/{episode_id}/play"), &Params::new())
            .await?;
        Ok(response.url)
    }
}
