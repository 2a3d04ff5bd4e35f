//! View-count lookup on the author's reels grid.
//!
//! The post page itself does not expose a view count; it appears as an
//! overlay on the post's tile in the author's reels grid. This is a small
//! second instance of the locate-in-unstable-DOM problem: find the link
//! containing the post id (window-scrolling the grid a bounded number of
//! times), then read the view span under it through a fixed structural
//! path.

use std::time::Duration;

use tracing::{info, warn};

use crate::app::Result;
use crate::surface::RenderSurface;

const MAX_GRID_SCROLLS: u32 = 5;
const GRID_SCROLL_DELTA: i64 = 1500;
const GRID_SETTLE: Duration = Duration::from_secs(2);

/// Child-position steps from the post's grid link down to the view span.
const VIEW_SPAN_STEPS: &str = "/div[2]/div[2]/div/div/div/span/span";

fn post_link_path(post_id: &str) -> String {
    format!("//a[contains(@href, '/{}/')]", post_id)
}

fn view_span_path(post_id: &str) -> String {
    format!("{}{}", post_link_path(post_id), VIEW_SPAN_STEPS)
}

/// Locate a post's approximate view count on its author's reels grid.
///
/// Returns the raw overlay text (compact notation like "3.8M" is kept
/// as-is), or `None` if the tile never appears within the scroll budget or
/// the located text contains no digit.
pub async fn find_post_views(
    surface: &dyn RenderSurface,
    username: &str,
    post_id: &str,
) -> Result<Option<String>> {
    let profile_url = format!("https://www.instagram.com/{}/reels/", username);
    info!("Navigating to reels grid: {}", profile_url);
    surface.navigate(&profile_url).await?;
    surface.pause(GRID_SETTLE).await;

    let link_path = post_link_path(post_id);
    let mut scrolls = 0;
    while surface.text_at(&link_path).await?.is_none() {
        if scrolls >= MAX_GRID_SCROLLS {
            warn!(
                "Post {} not found on reels grid after {} scrolls",
                post_id, MAX_GRID_SCROLLS
            );
            return Ok(None);
        }
        scrolls += 1;
        info!("Scrolling reels grid ({}/{})", scrolls, MAX_GRID_SCROLLS);
        surface.scroll_window(GRID_SCROLL_DELTA).await?;
        surface.pause(GRID_SETTLE).await;
    }

    match surface.text_at(&view_span_path(post_id)).await? {
        Some(text) if text.chars().any(|c| c.is_ascii_digit()) => {
            info!("View count for {}: {}", post_id, text);
            Ok(Some(text))
        }
        Some(text) => {
            warn!("View slot text contains no digits: {:?}", text);
            Ok(None)
        }
        None => {
            warn!("Post link found but no view span under it");
            Ok(None)
        }
    }
}
