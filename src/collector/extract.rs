use tracing::debug;

use crate::app::Result;
use crate::collector::schema::{FeedSchema, Field};
use crate::collector::Comment;
use crate::surface::RenderSurface;

/// Sentinel author when the author node cannot be read.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Zero-equivalent like count.
pub const DEFAULT_LIKES: &str = "0";

/// Outcome of one item extraction attempt.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// Every field read cleanly.
    Found(Comment),
    /// Body present, but at least one optional field fell back to its
    /// default. Still admissible.
    Partial(Comment),
    /// No item is rendered at this index right now. Normal, not an error.
    NotPresent,
}

/// Pull one comment's fields from the surface.
///
/// The body is mandatory: no body node (or an empty one) means the item
/// cannot be identified and the index is reported as not present. Author,
/// timestamp and like count are each attempted independently; a failure is
/// absorbed into the documented default rather than aborting the item.
pub async fn extract_item(
    surface: &dyn RenderSurface,
    schema: &FeedSchema,
    anchor: &str,
    index: usize,
) -> Result<Extraction> {
    let body = match surface
        .text_at(&schema.field_path(anchor, index, Field::Body))
        .await?
    {
        Some(body) if !body.trim().is_empty() => body,
        _ => return Ok(Extraction::NotPresent),
    };

    let mut defaulted = false;

    let author = match surface
        .text_at(&schema.field_path(anchor, index, Field::Author))
        .await
    {
        Ok(Some(author)) if !author.trim().is_empty() => author,
        Ok(_) => {
            defaulted = true;
            UNKNOWN_AUTHOR.to_string()
        }
        Err(e) => {
            debug!("Author extraction failed for item {}: {}", index, e);
            defaulted = true;
            UNKNOWN_AUTHOR.to_string()
        }
    };

    let timestamp = match surface
        .text_at(&schema.field_path(anchor, index, Field::Timestamp))
        .await
    {
        Ok(Some(timestamp)) => timestamp,
        Ok(None) => {
            defaulted = true;
            String::new()
        }
        Err(e) => {
            debug!("Timestamp extraction failed for item {}: {}", index, e);
            defaulted = true;
            String::new()
        }
    };

    let like_count = match surface
        .text_at(&schema.field_path(anchor, index, Field::LikeCount))
        .await
    {
        // The reply action label sometimes occupies the like-count slot
        Ok(Some(text)) if schema.is_reply_action(&text) => DEFAULT_LIKES.to_string(),
        Ok(Some(text)) => text,
        Ok(None) => {
            defaulted = true;
            DEFAULT_LIKES.to_string()
        }
        Err(e) => {
            debug!("Like-count extraction failed for item {}: {}", index, e);
            defaulted = true;
            DEFAULT_LIKES.to_string()
        }
    };

    let comment = Comment::new(index, body, author, timestamp, like_count);
    if defaulted {
        Ok(Extraction::Partial(comment))
    } else {
        Ok(Extraction::Found(comment))
    }
}
