use std::future::Future;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use console::{Emoji, Term};
use serde::Serialize;
use serde::de::DeserializeOwned;

use spreaker::{Client, ClientError, HttpClient, Page, PaginationParams};

pub mod chapters;
pub mod cuepoints;
pub mod episodes;
pub mod messages;
pub mod misc;
pub mod progress;
pub mod search;
pub mod shows;
pub mod stats;
pub mod users;

// Emoji with fallback for terminals without Unicode support
pub static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
pub static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[x] ");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static DOWNLOAD: Emoji<'_, '_> = Emoji("📥 ", "[v] ");
pub static INFO: Emoji<'_, '_> = Emoji("💡 ", "[i] ");

/// Page size, offset and "fetch everything" switch shared by list commands
#[derive(Args, Debug, Clone, Copy)]
pub struct ListArgs {
    /// Maximum number of items per page
    #[arg(short, long, default_value = "20")]
    pub limit: u32,

    /// Number of items to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Follow pagination until the last page
    #[arg(long, conflicts_with = "offset")]
    pub all: bool,
}

impl ListArgs {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: Some(self.limit),
            offset: self.offset,
            ..PaginationParams::default()
        }
    }
}

/// Print one page, or every page with `--all`
///
/// `fetch` is the endpoint wrapper; with `--all` it is called again for each
/// following page, so its checks apply to every request.
pub async fn list<C, T, F, Fut>(client: &Client<C>, args: &ListArgs, mut fetch: F) -> Result<()>
where
    C: HttpClient,
    T: DeserializeOwned + Serialize,
    F: FnMut(PaginationParams) -> Fut,
    Fut: Future<Output = Result<Page<T>, ClientError>>,
{
    if args.all {
        let items = client
            .collect_pages(args.pagination(), None, fetch)
            .await
            .context("Failed to list all pages")?;
        print_json(&items)
    } else {
        let page = fetch(args.pagination())
            .await
            .context("Failed to list page")?;
        print_page(&page)
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{json}");
    Ok(())
}

pub fn print_page<T: Serialize>(page: &Page<T>) -> Result<()> {
    print_json(&page.items)?;
    if page.has_more {
        eprintln!(
            "{INFO}{}",
            "More results available, use --offset or --all".dimmed()
        );
    }
    Ok(())
}

pub fn success(message: impl AsRef<str>) {
    eprintln!("{SUCCESS}{}", message.as_ref().green());
}

/// Ask for a yes/no answer on the terminal unless `force` is set
pub fn confirm(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }

    let term = Term::stderr();
    term.write_str(&format!("{WARNING}{} [y/N] ", prompt.yellow()))
        .context("Failed to write prompt")?;
    let answer = term.read_line().context("Failed to read answer")?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Cancelled confirmations are not an error
pub fn cancelled() -> Result<()> {
    eprintln!("{}", "Cancelled".dimmed());
    Ok(())
}
