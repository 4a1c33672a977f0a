use anyhow::Result;
use clap::{Args, Subcommand};

use spreaker::{Client, SearchParams};

use super::{ListArgs, list};

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Words to search for
    pub query: String,

    /// Narrow results, e.g. "listenable" or "editable"
    #[arg(long)]
    pub filter: Option<String>,
}

impl From<QueryArgs> for SearchParams {
    fn from(args: QueryArgs) -> Self {
        Self {
            query: args.query,
            filter: args.filter,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SearchCommand {
    /// Search all shows
    Shows {
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Search all episodes
    Episodes {
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Search the shows of one user
    UserShows {
        user_id: u64,
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Search the episodes of one user
    UserEpisodes {
        user_id: u64,
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Search the episodes of one show
    ShowEpisodes {
        show_id: u64,
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        list: ListArgs,
    },
}

pub async fn run(client: &Client, command: SearchCommand) -> Result<()> {
    match command {
        SearchCommand::Shows { query, list: args } => {
            let search = SearchParams::from(query);
            list(client, &args, |p| client.search_shows(&search, p)).await
        }
        SearchCommand::Episodes { query, list: args } => {
            let search = SearchParams::from(query);
            list(client, &args, |p| client.search_episodes(&search, p)).await
        }
        SearchCommand::UserShows {
            user_id,
            query,
            list: args,
        } => {
            let search = SearchParams::from(query);
            list(client, &args, |p| {
                client.search_user_shows(user_id, &search, p)
            })
            .await
        }
        SearchCommand::UserEpisodes {
            user_id,
            query,
            list: args,
        } => {
            let search = SearchParams::from(query);
            list(client, &args, |p| {
                client.search_user_episodes(user_id, &search, p)
            })
            .await
        }
        SearchCommand::ShowEpisodes {
            show_id,
            query,
            list: args,
        } => {
            let search = SearchParams::from(query);
            list(client, &args, |p| {
                client.search_show_episodes(show_id, &search, p)
            })
            .await
        }
    }
}
