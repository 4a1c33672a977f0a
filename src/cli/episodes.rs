use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use spreaker::{
    Client, CreateDraftEpisodeParams, NoopReporter, SharedProgressReporter, UpdateEpisodeParams,
    UploadEpisodeParams, download_episode, episode_filename,
};

use super::progress::IndicatifReporter;
use super::{DOWNLOAD, ListArgs, cancelled, confirm, list, print_json, success};

#[derive(Subcommand, Debug)]
pub enum EpisodesCommand {
    /// Show details of an episode
    Get { episode_id: u64 },

    /// Upload a new episode with its audio file
    Upload {
        show_id: u64,
        media_file: PathBuf,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long)]
        explicit: Option<bool>,
        #[arg(long)]
        downloadable: Option<bool>,
        #[arg(long)]
        hidden: Option<bool>,
        /// Publish later, "YYYY-MM-DD HH:MM:SS"
        #[arg(long)]
        publish_at: Option<String>,
    },

    /// Create a draft episode without audio
    Draft {
        show_id: u64,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long)]
        explicit: Option<bool>,
        #[arg(long)]
        downloadable: Option<bool>,
        #[arg(long)]
        hidden: Option<bool>,
    },

    /// Update an episode; only the given fields change
    Update {
        episode_id: u64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Comma-separated tags; an empty value clears them
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        explicit: Option<bool>,
        #[arg(long)]
        downloadable: Option<bool>,
        #[arg(long)]
        hidden: Option<bool>,
        /// Move the episode to another show
        #[arg(long)]
        show_id: Option<u64>,
        /// Reschedule; an empty value removes the schedule
        #[arg(long)]
        publish_at: Option<String>,
    },

    /// Delete an episode
    Delete {
        episode_id: u64,
        #[arg(short, long)]
        force: bool,
    },

    /// Like an episode
    Like { episode_id: u64 },

    /// Remove your like from an episode
    Unlike { episode_id: u64 },

    /// Check whether a user likes an episode (you, by default)
    Liked {
        episode_id: u64,
        #[arg(long)]
        user: Option<u64>,
    },

    /// List the users who liked an episode
    Likes {
        episode_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },

    /// Bookmark an episode
    Bookmark { episode_id: u64 },

    /// Remove a bookmark
    Unbookmark { episode_id: u64 },

    /// Download the episode audio
    Download {
        episode_id: u64,
        /// Output file (default: date and title of the episode)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
        /// Only print the resolved download URL
        #[arg(short, long)]
        url_only: bool,
    },

    /// Print the streaming URL of an episode
    PlayUrl { episode_id: u64 },
}

fn tags_from_flag(tags: Option<String>) -> Option<Vec<String>> {
    tags.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    })
}

pub async fn run(client: &Client, command: EpisodesCommand, quiet: bool) -> Result<()> {
    match command {
        EpisodesCommand::Get { episode_id } => {
            let episode = client
                .get_episode(episode_id)
                .await
                .with_context(|| format!("Failed to get episode {episode_id}"))?;
            print_json(&episode)
        }
        EpisodesCommand::Upload {
            show_id,
            media_file,
            title,
            description,
            tags,
            explicit,
            downloadable,
            hidden,
            publish_at,
        } => {
            let upload = UploadEpisodeParams {
                title,
                media_file,
                description,
                tags,
                explicit,
                download_enabled: downloadable,
                hidden,
                auto_published_at: publish_at,
            };
            if !quiet {
                eprintln!(
                    "{DOWNLOAD}Uploading {}",
                    upload.media_file.display().to_string().cyan()
                );
            }
            let episode = client
                .upload_episode(show_id, &upload)
                .await
                .context("Failed to upload episode")?;
            success(format!("Uploaded episode {}", episode.episode_id));
            print_json(&episode)
        }
        EpisodesCommand::Draft {
            show_id,
            title,
            description,
            tags,
            explicit,
            downloadable,
            hidden,
        } => {
            let draft = CreateDraftEpisodeParams {
                title,
                show_id,
                description,
                tags,
                explicit,
                download_enabled: downloadable,
                hidden,
            };
            let episode = client
                .create_draft_episode(&draft)
                .await
                .context("Failed to create draft episode")?;
            success(format!("Created draft episode {}", episode.episode_id));
            print_json(&episode)
        }
        EpisodesCommand::Update {
            episode_id,
            title,
            description,
            tags,
            explicit,
            downloadable,
            hidden,
            show_id,
            publish_at,
        } => {
            let update = UpdateEpisodeParams {
                title,
                description,
                tags: tags_from_flag(tags),
                explicit,
                download_enabled: downloadable,
                hidden,
                show_id,
                auto_published_at: publish_at,
            };
            if update == UpdateEpisodeParams::default() {
                anyhow::bail!("Nothing to update, pass at least one field");
            }
            let episode = client
                .update_episode(episode_id, &update)
                .await
                .with_context(|| format!("Failed to update episode {episode_id}"))?;
            success(format!("Updated episode {episode_id}"));
            print_json(&episode)
        }
        EpisodesCommand::Delete { episode_id, force } => {
            if !confirm(&format!("Delete episode {episode_id}?"), force)? {
                return cancelled();
            }
            client
                .delete_episode(episode_id)
                .await
                .with_context(|| format!("Failed to delete episode {episode_id}"))?;
            success(format!("Deleted episode {episode_id}"));
            Ok(())
        }
        EpisodesCommand::Like { episode_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .like_episode(me.user_id, episode_id)
                .await
                .with_context(|| format!("Failed to like episode {episode_id}"))?;
            success(format!("Liked episode {episode_id}"));
            Ok(())
        }
        EpisodesCommand::Unlike { episode_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .unlike_episode(me.user_id, episode_id)
                .await
                .with_context(|| format!("Failed to unlike episode {episode_id}"))?;
            success(format!("Removed like from episode {episode_id}"));
            Ok(())
        }
        EpisodesCommand::Liked { episode_id, user } => {
            let user_id = match user {
                Some(id) => id,
                None => client.get_me().await.context("Failed to load your profile")?.user_id,
            };
            let liked = client
                .user_likes_episode(user_id, episode_id)
                .await
                .context("Failed to check like")?;
            print_json(&serde_json::json!({
                "user_id": user_id,
                "episode_id": episode_id,
                "liked": liked,
            }))
        }
        EpisodesCommand::Likes { episode_id, list: args } => {
            list(client, &args, |p| client.get_episode_likes(episode_id, p)).await
        }
        EpisodesCommand::Bookmark { episode_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .bookmark_episode(me.user_id, episode_id)
                .await
                .with_context(|| format!("Failed to bookmark episode {episode_id}"))?;
            success(format!("Bookmarked episode {episode_id}"));
            Ok(())
        }
        EpisodesCommand::Unbookmark { episode_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .unbookmark_episode(me.user_id, episode_id)
                .await
                .with_context(|| format!("Failed to remove bookmark from episode {episode_id}"))?;
            success(format!("Removed bookmark from episode {episode_id}"));
            Ok(())
        }
        EpisodesCommand::Download {
            episode_id,
            output,
            url_only,
        } => {
            let url = client
                .get_episode_download_url(episode_id)
                .await
                .with_context(|| {
                    format!("Failed to resolve download URL for episode {episode_id}")
                })?;

            if url_only {
                println!("{url}");
                return Ok(());
            }

            let episode = client
                .get_episode(episode_id)
                .await
                .with_context(|| format!("Failed to get episode {episode_id}"))?;
            let output = output.unwrap_or_else(|| PathBuf::from(episode_filename(&episode, &url)));

            let reporter: SharedProgressReporter = if quiet {
                NoopReporter::shared()
            } else {
                Arc::new(IndicatifReporter::new())
            };

            let result = download_episode(client, &url, &output, &episode.title, &reporter)
                .await
                .with_context(|| format!("Failed to download episode {episode_id}"))?;

            if !quiet {
                eprintln!("Saved to {}", result.path.display().to_string().cyan());
            }
            Ok(())
        }
        EpisodesCommand::PlayUrl { episode_id } => {
            let url = client
                .get_episode_play_url(episode_id)
                .await
                .with_context(|| format!("Failed to get play URL for episode {episode_id}"))?;
            println!("{url}");
            Ok(())
        }
    }
}
