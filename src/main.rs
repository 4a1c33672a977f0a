use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use spreaker::config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use spreaker::{Client, ClientConfig};

mod cli;

use cli::chapters::ChaptersCommand;
use cli::ListArgs;
use cli::cuepoints::CuepointsCommand;
use cli::episodes::EpisodesCommand;
use cli::messages::MessagesCommand;
use cli::misc::MiscCommand;
use cli::search::SearchCommand;
use cli::shows::ShowsCommand;
use cli::stats::StatsCommand;
use cli::users::{MeCommand, UsersCommand};

/// Command-line client for the Spreaker podcast API
#[derive(Parser, Debug)]
#[command(name = "spreaker")]
#[command(about = "Command-line client for the Spreaker podcast API")]
#[command(version)]
struct Args {
    /// OAuth2 bearer token
    #[arg(long, env = "SPREAKER_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// API host
    #[arg(long, env = "SPREAKER_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    api_url: String,

    /// API version segment
    #[arg(long, default_value = DEFAULT_API_VERSION, global = true)]
    api_version: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    timeout: u64,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode - suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Your own profile, shows and lists
    Me {
        #[command(subcommand)]
        command: Option<MeCommand>,
    },
    /// Users, followers and blocks
    #[command(subcommand)]
    Users(UsersCommand),
    /// Shows and favorites
    #[command(subcommand)]
    Shows(ShowsCommand),
    /// Episodes: upload, edit, like, download
    #[command(subcommand)]
    Episodes(EpisodesCommand),
    /// Listening statistics
    #[command(subcommand)]
    Stats(StatsCommand),
    /// Full-text search
    #[command(subcommand)]
    Search(SearchCommand),
    /// Shows featured in an explore category
    Explore {
        category_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Episodes carrying a tag
    Tags {
        tag: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Episode chapters
    #[command(subcommand)]
    Chapters(ChaptersCommand),
    /// Ad cuepoints
    #[command(subcommand)]
    Cuepoints(CuepointsCommand),
    /// Episode messages
    #[command(subcommand)]
    Messages(MessagesCommand),
    /// Categories and languages
    #[command(subcommand)]
    Misc(MiscCommand),
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,spreaker=debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.token.clone().unwrap_or_default())
            .with_base_url(self.api_url.as_str())
            .with_api_version(self.api_version.as_str())
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let client = Client::new(args.client_config()).context("Failed to set up HTTP client")?;

    let outcome = match args.command {
        Command::Me { command } => cli::users::run_me(&client, command).await,
        Command::Users(command) => cli::users::run(&client, command).await,
        Command::Shows(command) => cli::shows::run(&client, command).await,
        Command::Episodes(command) => cli::episodes::run(&client, command, args.quiet).await,
        Command::Stats(command) => cli::stats::run(&client, command).await,
        Command::Search(command) => cli::search::run(&client, command).await,
        Command::Explore { category_id, list } => {
            cli::misc::explore(&client, category_id, &list).await
        }
        Command::Tags { tag, list } => cli::misc::tag_episodes(&client, &tag, &list).await,
        Command::Chapters(command) => cli::chapters::run(&client, command).await,
        Command::Cuepoints(command) => cli::cuepoints::run(&client, command).await,
        Command::Messages(command) => cli::messages::run(&client, command).await,
        Command::Misc(command) => cli::misc::run(&client, command).await,
    };

    if let Err(err) = outcome {
        eprintln!("{}{} {err:#}", cli::FAILURE, "Error:".red().bold());
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn verbosity_selects_filter() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "warn,spreaker=debug");
        assert_eq!(default_filter(3), "trace");
    }

    #[test]
    fn global_flags_build_config() {
        let args = Args::try_parse_from([
            "spreaker",
            "--token",
            "abc",
            "--api-url",
            "http://localhost:9000/",
            "--timeout",
            "5",
            "misc",
            "languages",
        ])
        .unwrap();
        let config = args.client_config();

        assert_eq!(config.token, "abc");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
