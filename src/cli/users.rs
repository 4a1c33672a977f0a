use anyhow::{Context, Result};
use clap::Subcommand;

use spreaker::{Client, UpdateUserParams};

use super::{ListArgs, list, print_json, success};

#[derive(Subcommand, Debug)]
pub enum MeCommand {
    /// Your shows
    Shows(ListArgs),
    /// Your episodes
    Episodes(ListArgs),
    /// Users following you
    Followers(ListArgs),
    /// Users you follow
    Followings(ListArgs),
    /// Episodes you liked
    Likes(ListArgs),
    /// Your favorite shows
    Favorites(ListArgs),
    /// Users you blocked
    Blocks(ListArgs),
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Show a user's profile
    Get { user_id: u64 },

    /// List a user's shows
    Shows {
        user_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List a user's episodes
    Episodes {
        user_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List a user's followers
    Followers {
        user_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List the users a user follows
    Followings {
        user_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List the episodes a user liked
    Likes {
        user_id: u64,
        #[command(flatten)]
        list: ListArgs,
    },

    /// Follow a user
    Follow { user_id: u64 },

    /// Stop following a user
    Unfollow { user_id: u64 },

    /// Block a user
    Block { user_id: u64 },

    /// Unblock a user
    Unblock { user_id: u64 },

    /// Update your profile; only the given fields change
    Update {
        #[arg(long)]
        fullname: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: Option<String>,
        #[arg(long)]
        show_age: Option<bool>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, requires = "longitude")]
        latitude: Option<f64>,
        #[arg(long, requires = "latitude")]
        longitude: Option<f64>,
        /// Comma-separated language codes
        #[arg(long)]
        content_languages: Option<String>,
        #[arg(long)]
        contact_email: Option<String>,
    },
}

pub async fn run_me(client: &Client, command: Option<MeCommand>) -> Result<()> {
    let me = client.get_me().await.context("Failed to load your profile")?;
    let id = me.user_id;

    match command {
        None => print_json(&me),
        Some(MeCommand::Shows(args)) => {
            list(client, &args, |p| client.get_user_shows(id, p)).await
        }
        Some(MeCommand::Episodes(args)) => {
            list(client, &args, |p| client.get_user_episodes(id, p)).await
        }
        Some(MeCommand::Followers(args)) => {
            list(client, &args, |p| client.get_user_followers(id, p)).await
        }
        Some(MeCommand::Followings(args)) => {
            list(client, &args, |p| client.get_user_followings(id, p)).await
        }
        Some(MeCommand::Likes(args)) => {
            list(client, &args, |p| client.get_liked_episodes(id, p)).await
        }
        Some(MeCommand::Favorites(args)) => {
            list(client, &args, |p| client.get_favorite_shows(id, p)).await
        }
        Some(MeCommand::Blocks(args)) => {
            list(client, &args, |p| client.get_user_blocks(id, p)).await
        }
    }
}

pub async fn run(client: &Client, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::Get { user_id } => {
            let user = client
                .get_user(user_id)
                .await
                .with_context(|| format!("Failed to get user {user_id}"))?;
            print_json(&user)
        }
        UsersCommand::Shows { user_id, list: args } => {
            list(client, &args, |p| client.get_user_shows(user_id, p)).await
        }
        UsersCommand::Episodes { user_id, list: args } => {
            list(client, &args, |p| client.get_user_episodes(user_id, p)).await
        }
        UsersCommand::Followers { user_id, list: args } => {
            list(client, &args, |p| client.get_user_followers(user_id, p)).await
        }
        UsersCommand::Followings { user_id, list: args } => {
            list(client, &args, |p| client.get_user_followings(user_id, p)).await
        }
        UsersCommand::Likes { user_id, list: args } => {
            list(client, &args, |p| client.get_liked_episodes(user_id, p)).await
        }
        UsersCommand::Follow { user_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .follow_user(me.user_id, user_id)
                .await
                .with_context(|| format!("Failed to follow user {user_id}"))?;
            success(format!("Now following user {user_id}"));
            Ok(())
        }
        UsersCommand::Unfollow { user_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .unfollow_user(me.user_id, user_id)
                .await
                .with_context(|| format!("Failed to unfollow user {user_id}"))?;
            success(format!("Stopped following user {user_id}"));
            Ok(())
        }
        UsersCommand::Block { user_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .block_user(me.user_id, user_id)
                .await
                .with_context(|| format!("Failed to block user {user_id}"))?;
            success(format!("Blocked user {user_id}"));
            Ok(())
        }
        UsersCommand::Unblock { user_id } => {
            let me = client.get_me().await.context("Failed to load your profile")?;
            client
                .unblock_user(me.user_id, user_id)
                .await
                .with_context(|| format!("Failed to unblock user {user_id}"))?;
            success(format!("Unblocked user {user_id}"));
            Ok(())
        }
        UsersCommand::Update {
            fullname,
            username,
            description,
            gender,
            birthday,
            show_age,
            location,
            latitude,
            longitude,
            content_languages,
            contact_email,
        } => {
            let update = UpdateUserParams {
                fullname,
                description,
                gender,
                birthday,
                show_age,
                location,
                location_latitude: latitude,
                location_longitude: longitude,
                content_languages,
                username,
                contact_email,
            };
            if update == UpdateUserParams::default() {
                anyhow::bail!("Nothing to update, pass at least one field");
            }

            let me = client.get_me().await.context("Failed to load your profile")?;
            let user = client
                .update_user(me.user_id, &update)
                .await
                .context("Failed to update profile")?;
            success("Profile updated");
            print_json(&user)
        }
    }
}
