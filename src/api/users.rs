use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{Episode, Show, User, UserResponse};
use crate::pagination::Page;
use crate::params::{PaginationParams, Params};

/// Profile fields to change; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateUserParams {
    pub fullname: Option<String>,
    pub description: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub show_age: Option<bool>,
    pub location: Option<String>,
    pub location_latitude: Option<f64>,
    pub location_longitude: Option<f64>,
    pub content_languages: Option<String>,
    pub username: Option<String>,
    pub contact_email: Option<String>,
}

impl UpdateUserParams {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("fullname", self.fullname.as_deref());
        params.set_opt("description", self.description.as_deref());
        params.set_opt("gender", self.gender.as_deref());
        params.set_opt("birthday", self.birthday.as_deref());
        params.set_flag("show_age", self.show_age);
        params.set_opt("location", self.location.as_deref());
        params.set_opt("location_latitude", self.location_latitude);
        params.set_opt("location_longitude", self.location_longitude);
        params.set_opt("content_languages", self.content_languages.as_deref());
        params.set_opt("username", self.username.as_deref());
        params.set_opt("contact_email", self.contact_email.as_deref());
        params
    }
}

impl<C: HttpClient> Client<C> {
    /// The authenticated user
    pub async fn get_me(&self) -> Result<User, ClientError> {
        self.require_auth()?;
        let response: UserResponse = self.get("/me", &Params::new()).await?;
        Ok(response.user)
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User, ClientError> {
        let response: UserResponse = self.get(&format!("/users/{user_id}"), &Params::new()).await?;
        Ok(response.user)
    }

    pub async fn get_user_shows(
        &self,
        user_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<Show>, ClientError> {
        self.get_page(&format!("/users/{user_id}/shows"), &pagination.to_params())
            .await
    }

    /// Shows of the authenticated user; resolves the user id through `/me`
    pub async fn get_my_shows(
        &self,
        pagination: PaginationParams,
    ) -> Result<Page<Show>, ClientError> {
        let me = self.get_me().await?;
        self.get_user_shows(me.user_id, pagination).await
    }

    pub async fn get_user_followers(
        &self,
        user_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<User>, ClientError> {
        self.get_page(&format!("/users/{user_id}/followers"), &pagination.to_params())
            .await
    }

    pub async fn get_user_followings(
        &self,
        user_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<User>, ClientError> {
        self.get_page(&format!("/users/{user_id}/followings"), &pagination.to_params())
            .await
    }

    /// Make `user_id` follow `following_id`
    pub async fn follow_user(&self, user_id: u64, following_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.put_no_content(&format!("/users/{user_id}/followings/{following_id}"))
            .await
    }

    pub async fn unfollow_user(&self, user_id: u64, following_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/users/{user_id}/followings/{following_id}"))
            .await
    }

    pub async fn get_user_episodes(
        &self,
        user_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<Episode>, ClientError> {
        self.get_page(&format!("/users/{user_id}/episodes"), &pagination.to_params())
            .await
    }

    pub async fn update_user(
        &self,
        user_id: u64,
        update: &UpdateUserParams,
    ) -> Result<User, ClientError> {
        self.require_auth()?;
        let response: UserResponse = self
            .post_form(&format!("/users/{user_id}"), &update.to_params())
            .await?;
        Ok(response.user)
    }

    pub async fn get_user_blocks(
        &self,
        user_id: u64,
        pagination: PaginationParams,
    ) -> Result<Page<User>, ClientError> {
        self.require_auth()?;
        self.get_page(&format!("/users/{user_id}/blocks"), &pagination.to_params())
            .await
    }

    pub async fn block_user(&self, user_id: u64, blocked_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.put_no_content(&format!("/users/{user_id}/blocks/{blocked_id}"))
            .await
    }

    pub async fn unblock_user(&self, user_id: u64, blocked_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/users/{user_id}/blocks/{blocked_id}"))
            .await
    }
}
