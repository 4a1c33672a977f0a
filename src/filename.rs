use url::Url;

use crate::models::Episode;

/// Upper bound for the title part of a file name
const MAX_TITLE_LENGTH: usize = 100;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "mp4", "aac", "ogg", "opus", "wav", "flac"];

/// File name for a downloaded episode
///
/// Format: `YYYY-MM-DD-title.ext`, or `undated-title.ext` when the episode
/// has no publish date. The extension comes from the media URL path and
/// falls back to `mp3`.
pub fn episode_filename(episode: &Episode, media_url: &str) -> String {
    let date = episode
        .published_at
        .map(|published| published.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "undated".to_string());

    let title = sanitize_title(&episode.title);
    let extension = extension_from_url(media_url).unwrap_or_else(|| "mp3".to_string());

    if title.is_empty() {
        format!("{date}-{}.{extension}", episode.episode_id)
    } else {
        format!("{date}-{title}.{extension}")
    }
}

/// Whitelist ASCII letters, digits, `_` and `.`; every run of anything else
/// becomes a single dash
fn sanitize_title(title: &str) -> String {
    let mut sanitized = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            if pending_dash && !sanitized.is_empty() {
                sanitized.push('-');
            }
            sanitized.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    truncate_at_boundary(&sanitized, MAX_TITLE_LENGTH)
}

/// Cut at the last dash in the second half of the limit, or hard-cut
fn truncate_at_boundary(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    let head = &text[..max_len];
    match head.rfind('-') {
        Some(pos) if pos > max_len / 2 => head[..pos].to_string(),
        _ => head.trim_end_matches('-').to_string(),
    }
}

fn extension_from_url(media_url: &str) -> Option<String> {
    let url = Url::parse(media_url).ok()?;
    let last_segment = url.path_segments()?.next_back()?;
    let (_, extension) = last_segment.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();

    AUDIO_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}
