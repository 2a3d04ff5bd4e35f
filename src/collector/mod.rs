//! Incremental comment collection from a virtualized, scrollable feed.
//!
//! The feed exposes no stable item ids, no total count and no "content
//! loaded" signal; nodes are recycled as the viewport moves. Collection
//! therefore works in scroll-and-settle cycles: each cycle re-scans a
//! bounded index range, extracts whatever is currently rendered, folds
//! novel items into the result through a fingerprint ledger, and a stall
//! heuristic decides when the feed is exhausted.
//!
//! ```text
//! collect_comments
//!   └─ resolve_anchor      (dynamic mount id, degraded fallback)
//!   └─ ScrollDriver::run
//!        └─ extract_item   (per index; structural paths from FeedSchema)
//!        └─ DedupLedger    (content-fingerprint admission)
//! ```

pub mod anchor;
pub mod config;
pub mod extract;
pub mod ledger;
pub mod schema;
pub mod scroll;

pub use anchor::{resolve_anchor, Anchor};
pub use config::CollectorConfig;
pub use extract::{extract_item, Extraction};
pub use ledger::DedupLedger;
pub use schema::{FeedSchema, Field, DEFAULT_SCHEMA};
pub use scroll::ScrollDriver;

use std::time::Duration;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::app::Result;
use crate::surface::RenderSurface;

/// Selector whose appearance signals that the post page's main content has
/// rendered. Best-effort; collection proceeds either way.
const READY_SELECTOR: &str = "video, img[alt], section div ul, div.x5yr21d";

const READY_TIMEOUT: Duration = Duration::from_secs(15);

/// One collected feed item.
///
/// `identity` and `fingerprint` are derived from the body text at
/// construction; the identity additionally records the extraction-time
/// index for diagnostics. Only the field data is serialized; the identity
/// becomes the key of the persisted comment map.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    #[serde(skip)]
    pub identity: String,
    #[serde(skip)]
    pub fingerprint: String,
    pub author: String,
    pub body: String,
    pub timestamp: String,
    pub like_count: String,
    pub source_index: usize,
}

impl Comment {
    pub fn new(
        source_index: usize,
        body: String,
        author: String,
        timestamp: String,
        like_count: String,
    ) -> Self {
        let fingerprint = Self::fingerprint_of(&body);
        let identity = format!("{}_{}", source_index, fingerprint);
        Self {
            identity,
            fingerprint,
            author,
            body,
            timestamp,
            like_count,
            source_index,
        }
    }

    /// Content fingerprint of a comment body.
    pub fn fingerprint_of(body: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(body.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Why a collection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    /// The configured cycle ceiling was hit first.
    MaxCyclesReached,
    /// No new comments and no height change for the stall threshold.
    Stalled,
    /// The feed container was never located; the run ended before the
    /// first cycle with an empty result.
    FeedExhausted,
}

/// Aggregate result of one collection run.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResult {
    /// Admitted comments in first-seen order; identities are unique.
    pub comments: Vec<Comment>,
    pub scroll_cycles_performed: u32,
    pub terminal_reason: TerminalReason,
    /// True when anchor resolution fell back to the guessed default id.
    pub anchor_degraded: bool,
}

impl CollectionResult {
    pub fn empty(terminal_reason: TerminalReason) -> Self {
        Self {
            comments: Vec::new(),
            scroll_cycles_performed: 0,
            terminal_reason,
            anchor_degraded: false,
        }
    }
}

/// Collect all visible comments from a post page.
///
/// Navigates to the post, waits for the main content, resolves the mount
/// anchor and hands off to the scroll driver. Navigation failure is the
/// only error path; everything past the anchor is absorbed into the
/// result's terminal reason.
pub async fn collect_comments(
    surface: &dyn RenderSurface,
    post_url: &str,
    config: &CollectorConfig,
) -> Result<CollectionResult> {
    info!("Loading post page: {}", post_url);
    surface.navigate(post_url).await?;

    if !surface.wait_for_visible(READY_SELECTOR, READY_TIMEOUT).await {
        warn!("Main post content did not appear within the wait window, continuing");
    }
    surface.pause(config.initial_settle()).await;

    let anchor = resolve_anchor(surface).await?;
    if anchor.degraded {
        warn!("Collecting against guessed anchor {}", anchor.id);
    }

    let driver = ScrollDriver::new(config, &DEFAULT_SCHEMA);
    let mut result = driver.run(surface, &anchor.id).await;
    result.anchor_degraded = anchor.degraded;

    info!(
        "Collected {} comments in {} cycles ({:?})",
        result.comments.len(),
        result.scroll_cycles_performed,
        result.terminal_reason
    );
    Ok(result)
}
