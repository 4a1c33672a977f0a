pub mod api;
pub mod client;
pub mod config;
pub mod download;
pub mod envelope;
pub mod error;
pub mod filename;
pub mod http;
pub mod models;
pub mod pagination;
pub mod params;
pub mod progress;
pub mod transport;

// Re-export main types for convenience
pub use api::{
    ChapterParams, CreateDraftEpisodeParams, CreateShowParams, MAX_MESSAGE_LENGTH, SearchParams,
    StatisticsParams, StatsScope, UpdateEpisodeParams, UpdateShowParams, UpdateUserParams,
    UploadEpisodeParams,
};
pub use client::Client;
pub use config::ClientConfig;
pub use download::{DownloadResult, download_episode};
pub use envelope::{Payload, decode_error, decode_into, decode_success};
pub use error::{ApiError, ClientError, DownloadError};
pub use filename::episode_filename;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use pagination::Page;
pub use params::{PaginationParams, Params};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
