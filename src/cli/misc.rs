use anyhow::{Context, Result};
use clap::Subcommand;

use spreaker::Client;

use super::{ListArgs, list, print_json};

#[derive(Subcommand, Debug)]
pub enum MiscCommand {
    /// Show categories
    Categories {
        /// Locale for category names, e.g. "en_US"
        #[arg(long)]
        locale: Option<String>,
    },
    /// Google Play podcast categories
    GoogleplayCategories,
    /// Languages a show can be published in
    Languages {
        #[arg(long)]
        locale: Option<String>,
    },
}

pub async fn run(client: &Client, command: MiscCommand) -> Result<()> {
    match command {
        MiscCommand::Categories { locale } => {
            let categories = client
                .get_show_categories(locale.as_deref())
                .await
                .context("Failed to get categories")?;
            print_json(&categories)
        }
        MiscCommand::GoogleplayCategories => {
            let categories = client
                .get_googleplay_categories()
                .await
                .context("Failed to get Google Play categories")?;
            print_json(&categories)
        }
        MiscCommand::Languages { locale } => {
            let languages = client
                .get_show_languages(locale.as_deref())
                .await
                .context("Failed to get languages")?;
            print_json(&languages)
        }
    }
}

/// Shows featured in an explore category
pub async fn explore(client: &Client, category_id: u64, args: &ListArgs) -> Result<()> {
    list(client, args, |p| client.get_category_shows(category_id, p)).await
}

/// Episodes carrying a tag
pub async fn tag_episodes(client: &Client, tag: &str, args: &ListArgs) -> Result<()> {
    list(client, args, |p| client.get_episodes_by_tag(tag, p)).await
}
