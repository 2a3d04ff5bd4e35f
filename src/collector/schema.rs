//! The shape of the comment feed's markup, as data.
//!
//! The upstream page assigns no stable classes or ids below the mount
//! anchor, so every field is located by a fixed sequence of child-position
//! steps discovered by manual inspection. Those step strings are brittle by
//! construction; keeping them in one table means a markup change is a
//! one-line edit here instead of a rewrite of the collection logic.

/// A comment field addressable through the feed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Author,
    Body,
    Timestamp,
    LikeCount,
}

/// Structural step table for the comment feed.
///
/// All steps are relative: `feed_root` hangs off the mount anchor,
/// `item_prefix`/`item_suffix` bracket the 1-based item index below the
/// feed root, and the per-field steps hang off the item base.
#[derive(Debug, Clone)]
pub struct FeedSchema {
    feed_root: &'static str,
    item_prefix: &'static str,
    item_suffix: &'static str,
    author: &'static str,
    body: &'static str,
    timestamp: &'static str,
    like_count: &'static str,
    /// Like-count slot texts that are really the reply action label
    /// bleeding into the same position, not a count.
    reply_action_labels: &'static [&'static str],
}

/// Current shape of the post page's comment feed.
pub const DEFAULT_SCHEMA: FeedSchema = FeedSchema {
    feed_root: "/div/div/div[2]/div/div/div[1]/div[1]/div[1]/section/main/div/div[1]/div/div[2]/div/div[2]",
    item_prefix: "/div/div[2]/div[",
    item_suffix: "]/div[1]/div/div[2]/div[1]",
    author: "/div[1]/div/div[1]/span[1]/span/span/div/a/div/div/span",
    body: "/div[1]/div/div[2]/span",
    timestamp: "/div[1]/div/div[1]/span[2]/a/time",
    like_count: "/div[2]/div[1]/span/span",
    reply_action_labels: &["답글 달기", "Reply"],
};

impl FeedSchema {
    /// Absolute path to the scrollable feed container under `anchor`.
    pub fn container_path(&self, anchor: &str) -> String {
        format!("//*[@id='{}']{}", anchor, self.feed_root)
    }

    /// Absolute path to one field of the item at a 1-based `index`.
    ///
    /// Pure and deterministic: same inputs, same path.
    pub fn field_path(&self, anchor: &str, index: usize, field: Field) -> String {
        let field_steps = match field {
            Field::Author => self.author,
            Field::Body => self.body,
            Field::Timestamp => self.timestamp,
            Field::LikeCount => self.like_count,
        };
        format!(
            "{}{}{}{}{}",
            self.container_path(anchor),
            self.item_prefix,
            index,
            self.item_suffix,
            field_steps
        )
    }

    /// Whether a like-count slot text is the reply-action false positive.
    pub fn is_reply_action(&self, text: &str) -> bool {
        self.reply_action_labels
            .iter()
            .any(|label| text.contains(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_path_embeds_anchor() {
        let path = DEFAULT_SCHEMA.container_path("mount_0_42");
        assert!(path.starts_with("//*[@id='mount_0_42']/div/div/div[2]"));
        assert!(path.ends_with("/div/div[2]"));
    }

    #[test]
    fn test_field_path_deterministic() {
        let a = DEFAULT_SCHEMA.field_path("mount_0_0", 7, Field::Body);
        let b = DEFAULT_SCHEMA.field_path("mount_0_0", 7, Field::Body);
        assert_eq!(a, b);
    }

    #[test]
    fn test_body_path_shape() {
        let path = DEFAULT_SCHEMA.field_path("mount_0_0", 3, Field::Body);
        assert_eq!(
            path,
            "//*[@id='mount_0_0']/div/div/div[2]/div/div/div[1]/div[1]/div[1]\
             /section/main/div/div[1]/div/div[2]/div/div[2]/div/div[2]/div[3]\
             /div[1]/div/div[2]/div[1]/div[1]/div/div[2]/span"
        );
    }

    #[test]
    fn test_field_paths_share_item_base() {
        let body = DEFAULT_SCHEMA.field_path("m", 5, Field::Body);
        let author = DEFAULT_SCHEMA.field_path("m", 5, Field::Author);
        let base = format!(
            "{}{}5{}",
            DEFAULT_SCHEMA.container_path("m"),
            DEFAULT_SCHEMA.item_prefix,
            DEFAULT_SCHEMA.item_suffix
        );
        assert!(body.starts_with(&base));
        assert!(author.starts_with(&base));
        assert_ne!(body, author);
    }

    #[test]
    fn test_reply_action_detection() {
        assert!(DEFAULT_SCHEMA.is_reply_action("답글 달기"));
        assert!(DEFAULT_SCHEMA.is_reply_action("Reply"));
        assert!(!DEFAULT_SCHEMA.is_reply_action("1,204"));
        assert!(!DEFAULT_SCHEMA.is_reply_action("12"));
    }
}
