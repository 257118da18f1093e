//! Photo link conversion
//!
//! Sign-up forms store photos as Google Drive share links in several
//! shapes, or sometimes as a bare file ID. Browsers cannot embed the
//! share pages, so links are rewritten to the image CDN form.

use once_cell::sync::Lazy;
use regex::Regex;

/// CDN prefix that serves Drive files as hotlinkable images
pub const THUMBNAIL_BASE: &str = "https://lh3.googleusercontent.com/d/";

/// Bare IDs at or below this length are too short to trust
const MIN_BARE_ID_LEN: usize = 10;

static DIRECT_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)(\?|$)").expect("valid regex"));

/// `/file/d/<ID>/view`, `/file/d/<ID>/preview`
static FILE_PATH_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/file/d/([A-Za-z0-9_-]+)").expect("valid regex"));

/// `open?id=<ID>`, `uc?export=view&id=<ID>`
static QUERY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("valid regex"));

/// Thumbnail URL for a Drive file ID
pub fn thumbnail_url(file_id: &str) -> String {
    format!("{}{}", THUMBNAIL_BASE, file_id)
}

/// Convert a photo cell into an embeddable image URL
///
/// Never fails: unrecognized input is either passed through unchanged
/// (other `http(s)` URLs) or dropped (`None`).
pub fn to_image_url(link: &str) -> Option<String> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        if DIRECT_IMAGE.is_match(trimmed) {
            return Some(trimmed.to_string());
        }

        let file_id = FILE_PATH_ID
            .captures(trimmed)
            .or_else(|| QUERY_ID.captures(trimmed))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        return Some(match file_id {
            Some(id) => thumbnail_url(id),
            None => trimmed.to_string(),
        });
    }

    let bare_id: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if bare_id.len() > MIN_BARE_ID_LEN {
        Some(thumbnail_url(&bare_id))
    } else {
        None
    }
}

/// Split a multi-link cell on commas and whitespace, converting each token
///
/// Tokens that do not convert are dropped.
pub fn split_image_urls(cell: &str) -> Vec<String> {
    cell.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(to_image_url)
        .collect()
}
