use anyhow::{Context, Result};
use clap::Subcommand;

use spreaker::{Client, CreateShowParams, UpdateShowParams};

use super::{ListArgs, cancelled, confirm, list, print_json, print_page, success};

#[derive(Subcommand, Debug)]
pub enum ShowsCommand {
    /// List your shows
    List(ListArgs),

    /// Show details of a show
    Get { show_id: u64 },

    /// List the episodes of a show
    Episodes {
        show_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },

    /// Create a new show
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Language code, e.g. en, it, es
        #[arg(long)]
        language: Option<String>,
        /// Category id (see `misc categories`)
        #[arg(long)]
        category: Option<u64>,
        #[arg(long)]
        explicit: bool,
    },

    /// Update a show; only the given fields change
    Update {
        show_id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        category: Option<u64>,
        #[arg(long)]
        explicit: Option<bool>,
    },

    /// Delete a show
    Delete {
        show_id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Add a show to your favorites
    Favorite { show_id: u64 },

    /// Remove a show from your favorites
    Unfavorite { show_id: u64 },
}

pub async fn run(client: &Client, command: ShowsCommand) -> Result<()> {
    match command {
        ShowsCommand::List(args) if !args.all => {
            let page = client
                .get_my_shows(args.pagination())
                .await
                .context("Failed to list your shows")?;
            print_page(&page)
        }
        ShowsCommand::List(args) => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            let id = me.user_id;
            list(client, &args, |p| client.get_user_shows(id, p)).await
        }
        ShowsCommand::Get { show_id } => {
            let show = client
                .get_show(show_id)
                .await
                .with_context(|| format!("Failed to get show {show_id}"))?;
            print_json(&show)
        }
        ShowsCommand::Episodes { show_id, list: args } => {
            list(client, &args, |p| client.get_show_episodes(show_id, p)).await
        }
        ShowsCommand::Create {
            title,
            description,
            language,
            category,
            explicit,
        } => {
            let params = CreateShowParams {
                title,
                description,
                category_id: category,
                language,
                explicit: explicit.then_some(true),
            };
            let show = client.create_show(&params).await.context("Failed to create show")?;
            success(format!("Created show {}", show.show_id));
            print_json(&show)
        }
        ShowsCommand::Update {
            show_id,
            title,
            description,
            language,
            category,
            explicit,
        } => {
            let update = UpdateShowParams {
                title,
                description,
                category_id: category,
                language,
                explicit,
            };
            if update == UpdateShowParams::default() {
                anyhow::bail!("Nothing to update, pass at least one field");
            }
            let show = client
                .update_show(show_id, &update)
                .await
                .with_context(|| format!("Failed to update show {show_id}"))?;
            success(format!("Updated show {show_id}"));
            print_json(&show)
        }
        ShowsCommand::Delete { show_id, force } => {
            if !confirm(&format!("Delete show {show_id} and all its episodes?"), force)? {
                return cancelled();
            }
            client
                .delete_show(show_id)
                .await
                .with_context(|| format!("Failed to delete show {show_id}"))?;
            success(format!("Deleted show {show_id}"));
            Ok(())
        }
        ShowsCommand::Favorite { show_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .add_show_to_favorites(me.user_id, show_id)
                .await
                .with_context(|| format!("Failed to favorite show {show_id}"))?;
            success(format!("Added show {show_id} to favorites"));
            Ok(())
        }
        ShowsCommand::Unfavorite { show_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .remove_show_from_favorites(me.user_id, show_id)
                .await
                .with_context(|| format!("Failed to unfavorite show {show_id}"))?;
            success(format!("Removed show {show_id} from favorites"));
            Ok(())
        }
    }
}
