// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint wrappers, one `impl Client` block per resource.
//!
//! Endpoints that need a token check for it before sending anything and
//! fail with [`ClientError::AuthRequired`](crate::ClientError::AuthRequired).
//! Public reads go straight to the server.

mod chapters;
mod cuepoints;
mod episodes;
mod messages;
mod misc;
mod search;
mod shows;
mod statistics;
mod users;

pub use chapters::ChapterParams;
pub use episodes::{CreateDraftEpisodeParams, UpdateEpisodeParams, UploadEpisodeParams};
pub use messages::MAX_MESSAGE_LENGTH;
pub use search::SearchParams;
pub use shows::{CreateShowParams, UpdateShowParams};
pub use statistics::{StatisticsParams, StatsScope};
pub use users::UpdateUserParams;

use crate::error::ClientError;
use crate::params::{PaginationParams, Params};

/// Comma-joined tag list as the API expects it
pub(crate) fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

/// Query params with pagination overlaid
pub(crate) fn with_pagination(params: Params, pagination: PaginationParams) -> Params {
    params.merge(&pagination.to_params())
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidArgument(format!("{field} is required")));
    }
    Ok(())
}
