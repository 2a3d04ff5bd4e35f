//! Post URL handling and one-shot metadata extraction.
//!
//! Metadata comes from the page's `og:description` tag, which packs likes,
//! comment count, author and date into one string, so no login and no feed
//! interaction is needed. URL normalization folds the `/reel/` and `/reels/`
//! forms into the canonical `/p/` form while remembering which kind the
//! operator pasted, since only reels get a view-count lookup.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::Utc;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::app::{GleanerError, Result};
use crate::surface::RenderSurface;

const OG_DESCRIPTION: &str = "og:description";
const OG_WAIT: Duration = Duration::from_secs(10);

static POST_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(p|reel|reels)/([A-Za-z0-9_-]+)").expect("valid post path pattern"));
static LIKES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) likes").expect("valid likes pattern"));
static COMMENTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) comments").expect("valid comments pattern"));
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (\w+) on").expect("valid username pattern"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"on ([A-Za-z]+ \d+, \d{4}):").expect("valid date pattern"));

/// Content kind inferred from the pasted URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Post,
    Reel,
}

/// A validated, normalized post URL.
#[derive(Debug, Clone)]
pub struct PostUrl {
    /// The short code identifying the post.
    pub id: String,
    pub kind: PostKind,
    /// Canonical `/p/{id}/` form, used for all navigation.
    pub canonical: String,
}

/// Metadata scraped from the post page head.
#[derive(Debug, Clone, Serialize)]
pub struct PostInfo {
    pub post_id: String,
    pub username: Option<String>,
    pub post_date: Option<String>,
    pub likes: Option<u64>,
    pub comments_count: Option<u64>,
    pub description: String,
    pub url: String,
    pub views: Option<String>,
    pub collected_at: String,
}

/// Validate and normalize a pasted post URL.
pub fn parse_post_url(raw: &str) -> Result<PostUrl> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| GleanerError::InvalidPostUrl(format!("{}: {}", raw, e)))?;

    let host_ok = parsed
        .host_str()
        .is_some_and(|h| h == "instagram.com" || h.ends_with(".instagram.com"));
    if !host_ok {
        return Err(GleanerError::InvalidPostUrl(format!(
            "not an instagram.com URL: {}",
            raw
        )));
    }

    let captures = POST_PATH_RE.captures(parsed.path()).ok_or_else(|| {
        GleanerError::InvalidPostUrl(format!("no /p/ or /reel/ segment in {}", raw))
    })?;

    let kind = match &captures[1] {
        "p" => PostKind::Post,
        _ => PostKind::Reel,
    };
    let id = captures[2].to_string();
    let canonical = format!("https://www.instagram.com/p/{}/", id);

    Ok(PostUrl {
        id,
        kind,
        canonical,
    })
}

/// Fetch and parse the post's `og:description` metadata.
///
/// Returns `Ok(None)` when the tag is absent (deleted or private post, or a
/// login wall); the caller decides whether that is fatal.
pub async fn fetch_post_info(
    surface: &dyn RenderSurface,
    post_url: &PostUrl,
) -> Result<Option<PostInfo>> {
    surface.navigate(&post_url.canonical).await?;
    surface
        .wait_for_visible(r#"meta[property="og:description"]"#, OG_WAIT)
        .await;

    let og = match surface.meta_content(OG_DESCRIPTION).await? {
        Some(og) => html_escape::decode_html_entities(&og).to_string(),
        None => {
            warn!("og:description tag not found on {}", post_url.canonical);
            return Ok(None);
        }
    };

    let mut info = parse_og_description(&og);
    info.post_id = post_url.id.clone();
    info.url = post_url.canonical.clone();

    info!("Post metadata extracted for {}", post_url.id);
    Ok(Some(info))
}

/// Parse the packed `og:description` string, e.g.
/// `123 likes, 4 comments - someuser on January 5, 2024: "caption"`.
///
/// Every field is optional; the description body is whatever follows the
/// first colon.
fn parse_og_description(og: &str) -> PostInfo {
    let likes = capture_u64(&LIKES_RE, og);
    let comments_count = capture_u64(&COMMENTS_RE, og);
    let username = capture(&USERNAME_RE, og);
    let post_date = capture(&DATE_RE, og);

    let description = og
        .split_once(':')
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default();

    PostInfo {
        post_id: String::new(),
        username,
        post_date,
        likes,
        comments_count,
        description,
        url: String::new(),
        views: None,
        collected_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}

fn capture_u64(re: &Regex, text: &str) -> Option<u64> {
    capture(re, text).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::fake::FakeSurface;

    const OG: &str = r#"532 likes, 41 comments - gleanuser on March 3, 2024: "spring rolls recipe""#;

    #[test]
    fn test_parse_post_url_p_form() {
        let url = parse_post_url("https://www.instagram.com/p/Cxyz_12-ab/").unwrap();
        assert_eq!(url.id, "Cxyz_12-ab");
        assert_eq!(url.kind, PostKind::Post);
        assert_eq!(url.canonical, "https://www.instagram.com/p/Cxyz_12-ab/");
    }

    #[test]
    fn test_parse_post_url_reel_forms_normalize() {
        for raw in [
            "https://www.instagram.com/reel/AbC123/",
            "https://instagram.com/reels/AbC123",
        ] {
            let url = parse_post_url(raw).unwrap();
            assert_eq!(url.id, "AbC123");
            assert_eq!(url.kind, PostKind::Reel);
            assert_eq!(url.canonical, "https://www.instagram.com/p/AbC123/");
        }
    }

    #[test]
    fn test_parse_post_url_rejects_other_hosts() {
        assert!(parse_post_url("https://example.com/p/AbC123/").is_err());
    }

    #[test]
    fn test_parse_post_url_rejects_non_post_paths() {
        assert!(parse_post_url("https://www.instagram.com/someuser/").is_err());
        assert!(parse_post_url("not a url").is_err());
    }

    #[test]
    fn test_parse_og_description_full() {
        let info = parse_og_description(OG);
        assert_eq!(info.likes, Some(532));
        assert_eq!(info.comments_count, Some(41));
        assert_eq!(info.username.as_deref(), Some("gleanuser"));
        assert_eq!(info.post_date.as_deref(), Some("March 3, 2024"));
        assert_eq!(info.description, r#""spring rolls recipe""#);
    }

    #[test]
    fn test_parse_og_description_missing_fields() {
        let info = parse_og_description("a caption with no counts");
        assert_eq!(info.likes, None);
        assert_eq!(info.comments_count, None);
        assert_eq!(info.username, None);
        assert_eq!(info.description, "");
    }

    #[tokio::test]
    async fn test_fetch_post_info_reads_meta() {
        let surface = FakeSurface::empty().with_meta("og:description", OG);
        let post_url = parse_post_url("https://www.instagram.com/p/AbC123/").unwrap();
        let info = fetch_post_info(&surface, &post_url).await.unwrap().unwrap();
        assert_eq!(info.post_id, "AbC123");
        assert_eq!(info.likes, Some(532));
        assert_eq!(info.url, "https://www.instagram.com/p/AbC123/");
        assert_eq!(surface.navigations(), vec![post_url.canonical.clone()]);
    }

    #[tokio::test]
    async fn test_fetch_post_info_none_without_meta() {
        let surface = FakeSurface::empty();
        let post_url = parse_post_url("https://www.instagram.com/p/AbC123/").unwrap();
        assert!(fetch_post_info(&surface, &post_url).await.unwrap().is_none());
    }
}
