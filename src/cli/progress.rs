use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use spreaker::{ProgressEvent, ProgressReporter};

use super::{DOWNLOAD, SUCCESS};

/// Progress bar on stderr for a single download
pub struct IndicatifReporter {
    bar: ProgressBar,
}

impl IndicatifReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::default_bar()
            .template(&format!(
                "{DOWNLOAD}[{{bar:30.cyan/blue}}] {{bytes}}/{{total_bytes}} {{wide_msg}}"
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");

        let bar = ProgressBar::new(0);
        bar.set_style(style);
        Self { bar }
    }
}

impl ProgressReporter for IndicatifReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::DownloadStarting {
                label,
                content_length,
            } => {
                self.bar.set_length(content_length.unwrap_or(0));
                self.bar.set_position(0);
                self.bar.set_message(truncate_title(&label, 40));
            }

            ProgressEvent::DownloadProgress {
                bytes_downloaded,
                total_bytes,
            } => {
                if let Some(total) = total_bytes {
                    self.bar.set_length(total);
                }
                self.bar.set_position(bytes_downloaded);
            }

            ProgressEvent::Finalizing { .. } => {
                self.bar.set_message("finalizing".dimmed().to_string());
            }

            ProgressEvent::DownloadCompleted {
                label,
                bytes_downloaded,
                hash,
            } => {
                self.bar.finish_and_clear();
                eprintln!(
                    "{SUCCESS}{} {} {}",
                    truncate_title(&label, 40).green(),
                    indicatif::HumanBytes(bytes_downloaded).to_string().cyan(),
                    hash.dimmed()
                );
            }

            ProgressEvent::DownloadFailed { label, error } => {
                self.bar.abandon_with_message(format!(
                    "{} - {}",
                    truncate_title(&label, 30).red(),
                    error.red()
                ));
            }
        }
    }
}

fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        title.to_string()
    } else {
        let head: String = title.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
