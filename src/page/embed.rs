use std::sync::OnceLock;

use regex::Regex;

use crate::models::VideoEmbed;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
const VIDEO_ID_LEN: usize = 11;

fn video_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").ok()
        })
        .as_ref()
}

/// Extract a YouTube embed from an arbitrary video link.
///
/// Anything that does not yield an 11-character video id is dropped rather
/// than turned into a broken embed.
pub fn youtube_embed(video_url: Option<&str>) -> Option<VideoEmbed> {
    let url = video_url?.trim();
    if url.is_empty() {
        return None;
    }

    let video_id = video_pattern()?.captures(url)?.get(2)?.as_str();
    if video_id.chars().count() != VIDEO_ID_LEN {
        return None;
    }

    Some(VideoEmbed {
        video_id: video_id.to_string(),
        embed_url: format!("{YOUTUBE_EMBED_BASE}{video_id}"),
    })
}
