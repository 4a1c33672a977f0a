use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use spreaker::{Client, StatisticsParams, StatsScope};

use super::{ListArgs, list, print_json};

/// Which resource to query; exactly one must be given
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct ScopeArgs {
    #[arg(long)]
    pub user: Option<u64>,
    #[arg(long)]
    pub show: Option<u64>,
    #[arg(long)]
    pub episode: Option<u64>,
}

impl ScopeArgs {
    fn scope(&self) -> Result<StatsScope> {
        match (self.user, self.show, self.episode) {
            (Some(id), None, None) => Ok(StatsScope::User(id)),
            (None, Some(id), None) => Ok(StatsScope::Show(id)),
            (None, None, Some(id)) => Ok(StatsScope::Episode(id)),
            _ => bail!("Pass exactly one of --user, --show or --episode"),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,
    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,
    /// Bucket size: day, week or month
    #[arg(long)]
    pub group: Option<String>,
    #[arg(long)]
    pub precision: Option<u32>,
}

impl From<RangeArgs> for StatisticsParams {
    fn from(args: RangeArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            group: args.group,
            precision: args.precision,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// Overall totals of a user, show or episode
    Overall {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Plays over time
    Plays {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Likes over time
    Likes {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Where plays come from
    Sources {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Plays by device type
    Devices {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Plays by operating system
    Os {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Plays by country and city (users and shows only)
    Geo {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Follower counts over time
    Followers {
        user_id: u64,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Listener counts of a show over time
    Listeners {
        show_id: u64,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Play totals for each show of a user
    ShowTotals {
        user_id: u64,
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Play totals for each episode of a show
    EpisodeTotals {
        show_id: u64,
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        list: ListArgs,
    },
}

pub async fn run(client: &Client, command: StatsCommand) -> Result<()> {
    match command {
        StatsCommand::Overall { scope } => match scope.scope()? {
            StatsScope::User(id) => print_json(
                &client
                    .get_user_statistics(id)
                    .await
                    .with_context(|| format!("Failed to get statistics of user {id}"))?,
            ),
            StatsScope::Show(id) => print_json(
                &client
                    .get_show_statistics(id)
                    .await
                    .with_context(|| format!("Failed to get statistics of show {id}"))?,
            ),
            StatsScope::Episode(id) => print_json(
                &client
                    .get_episode_statistics(id)
                    .await
                    .with_context(|| format!("Failed to get statistics of episode {id}"))?,
            ),
        },
        StatsCommand::Plays { scope, range } => {
            let stats = client
                .get_play_statistics(scope.scope()?, &range.into())
                .await
                .context("Failed to get play statistics")?;
            print_json(&stats)
        }
        StatsCommand::Likes { scope, range } => {
            let stats = client
                .get_likes_statistics(scope.scope()?, &range.into())
                .await
                .context("Failed to get likes statistics")?;
            print_json(&stats)
        }
        StatsCommand::Sources { scope, range } => {
            let stats = client
                .get_sources_statistics(scope.scope()?, &range.into())
                .await
                .context("Failed to get sources statistics")?;
            print_json(&stats)
        }
        StatsCommand::Devices { scope, range } => {
            let stats = client
                .get_devices_statistics(scope.scope()?, &range.into())
                .await
                .context("Failed to get devices statistics")?;
            print_json(&stats)
        }
        StatsCommand::Os { scope, range } => {
            let stats = client
                .get_os_statistics(scope.scope()?, &range.into())
                .await
                .context("Failed to get OS statistics")?;
            print_json(&stats)
        }
        StatsCommand::Geo { scope, range } => {
            let stats = client
                .get_geographic_statistics(scope.scope()?, &range.into())
                .await
                .context("Failed to get geographic statistics")?;
            print_json(&stats)
        }
        StatsCommand::Followers { user_id, range } => {
            let stats = client
                .get_user_followers_statistics(user_id, &range.into())
                .await
                .with_context(|| format!("Failed to get follower statistics of user {user_id}"))?;
            print_json(&stats)
        }
        StatsCommand::Listeners { show_id, range } => {
            let stats = client
                .get_show_listeners_statistics(show_id, &range.into())
                .await
                .with_context(|| format!("Failed to get listener statistics of show {show_id}"))?;
            print_json(&stats)
        }
        StatsCommand::ShowTotals {
            user_id,
            range,
            list: args,
        } => {
            let params = StatisticsParams::from(range);
            list(client, &args, |p| {
                client.get_user_shows_play_totals(user_id, &params, p)
            })
            .await
        }
        StatsCommand::EpisodeTotals {
            show_id,
            range,
            list: args,
        } => {
            let params = StatisticsParams::from(range);
            list(client, &args, |p| {
                client.get_show_episodes_play_totals(show_id, &params, p)
            })
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_requires_exactly_one_target() {
        let scope = ScopeArgs {
            user: None,
            show: Some(9),
            episode: None,
        };
        assert_eq!(scope.scope().unwrap(), StatsScope::Show(9));

        let both = ScopeArgs {
            user: Some(1),
            show: Some(2),
            episode: None,
        };
        assert!(both.scope().is_err());
    }

    #[test]
    fn range_maps_to_statistics_params() {
        let params = StatisticsParams::from(RangeArgs {
            from: Some("2024-01-01".to_string()),
            group: Some("week".to_string()),
            ..Default::default()
        });
        assert_eq!(params.from.as_deref(), Some("2024-01-01"));
        assert_eq!(params.to, None);
        assert_eq!(params.group.as_deref(), Some("week"));
    }
}
