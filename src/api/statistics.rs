use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::models::{
    DeviceStatistics, EpisodeOverallStatistics, EpisodePlayTotals, FollowersStatistics,
    GeographicStatistics, LikesStatistics, ListenersStatistics, OsStatisticsBreakdown,
    PlayStatistics, ShowOverallStatistics, ShowPlayTotals, SourcesStatistics, StatisticsResponse,
    UserOverallStatistics,
};
use crate::pagination::Page;
use crate::params::{PaginationParams, Params};

use super::with_pagination;

/// Date range and grouping for time-series statistics
///
/// Dates are `YYYY-MM-DD`; `group` is one of "day", "week", "month".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub group: Option<String>,
    pub precision: Option<u32>,
}

impl StatisticsParams {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("from", self.from.as_deref());
        params.set_opt("to", self.to.as_deref());
        params.set_opt("group", self.group.as_deref());
        params.set_opt("precision", self.precision.filter(|p| *p > 0));
        params
    }
}

/// The resource a statistics query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    User(u64),
    Show(u64),
    Episode(u64),
}

impl StatsScope {
    fn path(self, suffix: &str) -> String {
        match self {
            Self::User(id) => format!("/users/{id}/statistics{suffix}"),
            Self::Show(id) => format!("/shows/{id}/statistics{suffix}"),
            Self::Episode(id) => format!("/episodes/{id}/statistics{suffix}"),
        }
    }
}

impl<C: HttpClient> Client<C> {
    async fn get_statistics<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Params,
    ) -> Result<T, ClientError> {
        self.require_auth()?;
        let response: StatisticsResponse<T> = self.get(path, query).await?;
        Ok(response.statistics)
    }

    pub async fn get_user_statistics(
        &self,
        user_id: u64,
    ) -> Result<UserOverallStatistics, ClientError> {
        self.get_statistics(&StatsScope::User(user_id).path(""), &Params::new())
            .await
    }

    pub async fn get_show_statistics(
        &self,
        show_id: u64,
    ) -> Result<ShowOverallStatistics, ClientError> {
        self.get_statistics(&StatsScope::Show(show_id).path(""), &Params::new())
            .await
    }

    pub async fn get_episode_statistics(
        &self,
        episode_id: u64,
    ) -> Result<EpisodeOverallStatistics, ClientError> {
        self.get_statistics(&StatsScope::Episode(episode_id).path(""), &Params::new())
            .await
    }

    pub async fn get_play_statistics(
        &self,
        scope: StatsScope,
        params: &StatisticsParams,
    ) -> Result<Vec<PlayStatistics>, ClientError> {
        self.get_statistics(&scope.path("/plays"), &params.to_params())
            .await
    }

    pub async fn get_likes_statistics(
        &self,
        scope: StatsScope,
        params: &StatisticsParams,
    ) -> Result<Vec<LikesStatistics>, ClientError> {
        self.get_statistics(&scope.path("/likes"), &params.to_params())
            .await
    }

    pub async fn get_sources_statistics(
        &self,
        scope: StatsScope,
        params: &StatisticsParams,
    ) -> Result<SourcesStatistics, ClientError> {
        self.get_statistics(&scope.path("/sources"), &params.to_params())
            .await
    }

    pub async fn get_devices_statistics(
        &self,
        scope: StatsScope,
        params: &StatisticsParams,
    ) -> Result<Vec<DeviceStatistics>, ClientError> {
        self.get_statistics(&scope.path("/devices"), &params.to_params())
            .await
    }

    pub async fn get_os_statistics(
        &self,
        scope: StatsScope,
        params: &StatisticsParams,
    ) -> Result<OsStatisticsBreakdown, ClientError> {
        self.get_statistics(&scope.path("/os"), &params.to_params())
            .await
    }

    /// Country and city breakdown; not available per episode
    pub async fn get_geographic_statistics(
        &self,
        scope: StatsScope,
        params: &StatisticsParams,
    ) -> Result<GeographicStatistics, ClientError> {
        if let StatsScope::Episode(_) = scope {
            return Err(ClientError::InvalidArgument(
                "geographic statistics are only available for users and shows".to_string(),
            ));
        }
        self.get_statistics(&scope.path("/geographics"), &params.to_params())
            .await
    }

    pub async fn get_user_followers_statistics(
        &self,
        user_id: u64,
        params: &StatisticsParams,
    ) -> Result<Vec<FollowersStatistics>, ClientError> {
        self.get_statistics(&StatsScope::User(user_id).path("/followers"), &params.to_params())
            .await
    }

    pub async fn get_show_listeners_statistics(
        &self,
        show_id: u64,
        params: &StatisticsParams,
    ) -> Result<Vec<ListenersStatistics>, ClientError> {
        self.get_statistics(&StatsScope::Show(show_id).path("/listeners"), &params.to_params())
            .await
    }

    /// Play totals for every show of a user
    pub async fn get_user_shows_play_totals(
        &self,
        user_id: u64,
        params: &StatisticsParams,
        pagination: PaginationParams,
    ) -> Result<Page<ShowPlayTotals>, ClientError> {
        self.require_auth()?;
        self.get_page(
            &format!("/users/{user_id}/shows/statistics/plays/totals"),
            &with_pagination(params.to_params(), pagination),
        )
        .await
    }

    /// Play totals for every episode of a show
    pub async fn get_show_episodes_play_totals(
        &self,
        show_id: u64,
        params: &StatisticsParams,
        pagination: PaginationParams,
    ) -> Result<Page<EpisodePlayTotals>, ClientError> {
        self.require_auth()?;
        self.get_page(
            &format!("/shows/{show_id}/episodes/statistics/plays/totals"),
            &with_pagination(params.to_params(), pagination),
        )
        .await
    }
}
