use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{Cuepoint, CuepointsResponse};
use crate::params::Params;

impl<C: HttpClient> Client<C> {
    pub async fn get_episode_cuepoints(
        &self,
        episode_id: u64,
    ) -> Result<Vec<Cuepoint>, ClientError> {
        self.require_auth()?;
        let response: CuepointsResponse = self
            .get(&format!("/episodes/{episode_id}/cuepoints"), &Params::new())
            .await?;
        Ok(response.cuepoints)
    }

    /// Replace every cuepoint of an episode
    ///
    /// The list travels JSON-encoded inside the `cuepoints` form field.
    pub async fn update_episode_cuepoints(
        &self,
        episode_id: u64,
        cuepoints: &[Cuepoint],
    ) -> Result<(), ClientError> {
        self.require_auth()?;
        let encoded = serde_json::to_string(cuepoints).map_err(ClientError::Serialize)?;
        let fields = Params::new().with("cuepoints", encoded);
        self.post_form_no_content(&format!("/episodes/{episode_id}/cuepoints"), &fields)
            .await
    }

    pub async fn delete_episode_cuepoints(&self, episode_id: u64) -> Result<(), ClientError> {
        self.require_auth()?;
        self.delete_no_content(&format!("/episodes/{episode_id}/cuepoints"))
            .await
    }
}
