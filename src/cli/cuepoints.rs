use anyhow::{Context, Result, anyhow};
use clap::Subcommand;

use spreaker::Client;
use spreaker::models::Cuepoint;

use super::{cancelled, confirm, print_json, success};

#[derive(Subcommand, Debug)]
pub enum CuepointsCommand {
    /// List the ad cuepoints of an episode
    List { episode_id: u64 },
    /// Replace all cuepoints of an episode
    Set {
        episode_id: u64,
        /// Cuepoints as TIMECODE_MS:MAX_ADS, e.g. 30000:2
        #[arg(required = true, value_parser = parse_cuepoint)]
        cuepoints: Vec<Cuepoint>,
    },
    /// Remove all cuepoints of an episode
    Delete {
        episode_id: u64,
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_cuepoint(raw: &str) -> Result<Cuepoint> {
    let (timecode, ads) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("expected TIMECODE_MS:MAX_ADS, got {raw:?}"))?;

    Ok(Cuepoint {
        timecode: timecode
            .trim()
            .parse()
            .with_context(|| format!("invalid timecode {timecode:?}"))?,
        ads_max_count: ads
            .trim()
            .parse()
            .with_context(|| format!("invalid ad count {ads:?}"))?,
    })
}

pub async fn run(client: &Client, command: CuepointsCommand) -> Result<()> {
    match command {
        CuepointsCommand::List { episode_id } => {
            let cuepoints = client
                .get_episode_cuepoints(episode_id)
                .await
                .with_context(|| format!("Failed to get cuepoints of episode {episode_id}"))?;
            print_json(&cuepoints)
        }
        CuepointsCommand::Set {
            episode_id,
            cuepoints,
        } => {
            client
                .update_episode_cuepoints(episode_id, &cuepoints)
                .await
                .with_context(|| format!("Failed to set cuepoints of episode {episode_id}"))?;
            success(format!(
                "Set {} cuepoint(s) on episode {episode_id}",
                cuepoints.len()
            ));
            Ok(())
        }
        CuepointsCommand::Delete { episode_id, force } => {
            if !confirm(
                &format!("Delete all cuepoints of episode {episode_id}?"),
                force,
            )? {
                return cancelled();
            }
            client
                .delete_episode_cuepoints(episode_id)
                .await
                .with_context(|| format!("Failed to delete cuepoints of episode {episode_id}"))?;
            success(format!("Deleted cuepoints of episode {episode_id}"));
            Ok(())
        }
    }
}
