use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use spreaker::{ChapterParams, Client};

use super::{ListArgs, cancelled, confirm, list, print_json, success};

#[derive(Args, Debug, Clone, Default)]
pub struct ChapterFields {
    /// Start position in milliseconds
    #[arg(long)]
    pub starts_at: Option<u64>,
    #[arg(short, long)]
    pub title: Option<String>,
    /// Link shown with the chapter
    #[arg(long)]
    pub url: Option<String>,
    /// Local image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Crop rectangle for the image, "x1,y1,x2,y2"
    #[arg(long, requires = "image")]
    pub image_crop: Option<String>,
}

impl From<ChapterFields> for ChapterParams {
    fn from(fields: ChapterFields) -> Self {
        Self {
            starts_at: fields.starts_at,
            title: fields.title,
            external_url: fields.url,
            image_file: fields.image,
            image_crop: fields.image_crop,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ChaptersCommand {
    /// List the chapters of an episode
    List {
        episode_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add a chapter; needs --starts-at and --title
    Add {
        episode_id: u64,
        #[command(flatten)]
        fields: ChapterFields,
    },
    /// Change some fields of a chapter
    Update {
        episode_id: u64,
        chapter_id: u64,
        #[command(flatten)]
        fields: ChapterFields,
    },
    /// Delete one chapter
    Delete {
        episode_id: u64,
        chapter_id: u64,
        #[arg(short, long)]
        force: bool,
    },
    /// Delete every chapter of an episode
    DeleteAll {
        episode_id: u64,
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(client: &Client, command: ChaptersCommand) -> Result<()> {
    match command {
        ChaptersCommand::List {
            episode_id,
            list: args,
        } => {
            list(client, &args, |p| {
                client.get_episode_chapters(episode_id, p)
            })
            .await
        }
        ChaptersCommand::Add { episode_id, fields } => {
            let chapter = client
                .add_chapter(episode_id, &fields.into())
                .await
                .with_context(|| format!("Failed to add chapter to episode {episode_id}"))?;
            success(format!("Added chapter {}", chapter.chapter_id));
            print_json(&chapter)
        }
        ChaptersCommand::Update {
            episode_id,
            chapter_id,
            fields,
        } => {
            let update = ChapterParams::from(fields);
            if update == ChapterParams::default() {
                bail!("Nothing to update, pass at least one field");
            }
            let chapter = client
                .update_chapter(episode_id, chapter_id, &update)
                .await
                .with_context(|| format!("Failed to update chapter {chapter_id}"))?;
            success(format!("Updated chapter {chapter_id}"));
            print_json(&chapter)
        }
        ChaptersCommand::Delete {
            episode_id,
            chapter_id,
            force,
        } => {
            if !confirm(&format!("Delete chapter {chapter_id}?"), force)? {
                return cancelled();
            }
            client
                .delete_chapter(episode_id, chapter_id)
                .await
                .with_context(|| format!("Failed to delete chapter {chapter_id}"))?;
            success(format!("Deleted chapter {chapter_id}"));
            Ok(())
        }
        ChaptersCommand::DeleteAll { episode_id, force } => {
            if !confirm(
                &format!("Delete all chapters of episode {episode_id}?"),
                force,
            )? {
                return cancelled();
            }
            client
                .delete_all_chapters(episode_id)
                .await
                .with_context(|| format!("Failed to delete chapters of episode {episode_id}"))?;
            success(format!("Deleted all chapters of episode {episode_id}"));
            Ok(())
        }
    }
}
