// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod chapter;
mod cuepoint;
mod episode;
mod message;
mod misc;
mod show;
mod statistics;
pub mod timestamp;
mod user;

pub use chapter::Chapter;
pub use cuepoint::Cuepoint;
pub use episode::Episode;
pub use message::Message;
pub use misc::{Category, ExploreShow, GooglePlayCategory, Language};
pub use show::Show;
pub use statistics::{
    DeviceStatistics, EpisodeOverallStatistics, EpisodePlayTotals, FollowersStatistics,
    GeoStatistics, GeographicStatistics, LikesStatistics, ListenersStatistics, OsStatistics,
    OsStatisticsBreakdown, PlayStatistics, ShowOverallStatistics, ShowPlayTotals, SourceOverall,
    SourcesStatistics, UserOverallStatistics,
};
pub use user::User;

pub(crate) use chapter::ChapterResponse;
pub(crate) use cuepoint::CuepointsResponse;
pub(crate) use episode::EpisodeResponse;
pub(crate) use misc::{CategoriesResponse, GooglePlayCategoriesResponse, LanguagesResponse};
pub(crate) use show::ShowResponse;
pub(crate) use statistics::StatisticsResponse;
pub(crate) use user::UserResponse;
