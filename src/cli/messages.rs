use anyhow::{Context, Result};
use clap::Subcommand;

use spreaker::Client;

use super::{ListArgs, cancelled, confirm, list, success};

#[derive(Subcommand, Debug)]
pub enum MessagesCommand {
    /// List the messages left on an episode
    List {
        episode_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Post a message on an episode
    Create { episode_id: u64, text: String },
    /// Delete a message
    Delete {
        episode_id: u64,
        message_id: u64,
        #[arg(short, long)]
        force: bool,
    },
    /// Report a message as abusive
    Report { episode_id: u64, message_id: u64 },
}

pub async fn run(client: &Client, command: MessagesCommand) -> Result<()> {
    match command {
        MessagesCommand::List {
            episode_id,
            list: args,
        } => {
            list(client, &args, |p| {
                client.get_episode_messages(episode_id, p)
            })
            .await
        }
        MessagesCommand::Create { episode_id, text } => {
            client
                .create_message(episode_id, &text)
                .await
                .with_context(|| format!("Failed to post message on episode {episode_id}"))?;
            success(format!("Posted message on episode {episode_id}"));
            Ok(())
        }
        MessagesCommand::Delete {
            episode_id,
            message_id,
            force,
        } => {
            if !confirm(&format!("Delete message {message_id}?"), force)? {
                return cancelled();
            }
            client
                .delete_message(episode_id, message_id)
                .await
                .with_context(|| format!("Failed to delete message {message_id}"))?;
            success(format!("Deleted message {message_id}"));
            Ok(())
        }
        MessagesCommand::Report {
            episode_id,
            message_id,
        } => {
            client
                .report_message_abuse(episode_id, message_id)
                .await
                .with_context(|| format!("Failed to report message {message_id}"))?;
            success(format!("Reported message {message_id}"));
            Ok(())
        }
    }
}
