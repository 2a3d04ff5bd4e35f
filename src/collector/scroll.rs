use tracing::{info, warn};

use crate::collector::config::CollectorConfig;
use crate::collector::extract::{extract_item, Extraction};
use crate::collector::ledger::DedupLedger;
use crate::collector::schema::FeedSchema;
use crate::collector::{CollectionResult, TerminalReason};
use crate::surface::RenderSurface;

/// Drives scroll-and-settle cycles over the comment feed until it stops
/// producing new content or a cycle ceiling is hit.
///
/// Every cycle re-scans the full 1..=max_index range: the feed recycles DOM
/// nodes during scroll, so item-at-index is not stable across cycles and an
/// incremental resume would miss shifted items. The dedup ledger absorbs
/// the re-observations.
pub struct ScrollDriver<'a> {
    config: &'a CollectorConfig,
    schema: &'a FeedSchema,
}

impl<'a> ScrollDriver<'a> {
    pub fn new(config: &'a CollectorConfig, schema: &'a FeedSchema) -> Self {
        Self { config, schema }
    }

    /// Run the collection loop against an already-loaded post page.
    ///
    /// Never errors: per-index failures are logged and skipped, and
    /// surface-level scroll or measurement failures degrade into stall
    /// progress rather than losing what was already admitted.
    pub async fn run(&self, surface: &dyn RenderSurface, anchor: &str) -> CollectionResult {
        let container = self.schema.container_path(anchor);

        let visible = surface.is_visible(&container).await.unwrap_or(false);
        if !visible {
            warn!("Comment feed container not found; nothing to collect");
            return CollectionResult::empty(TerminalReason::FeedExhausted);
        }

        let mut ledger = DedupLedger::new();
        let mut comments: Vec<crate::collector::Comment> = Vec::new();
        let mut cycles: u32 = 0;
        let mut stalls: u32 = 0;
        let mut previous_height: i64 = 0;
        let mut reason = TerminalReason::MaxCyclesReached;

        while cycles < self.config.max_cycles {
            let height = surface.scroll_height(&container).await.unwrap_or(0);

            let mut admitted_this_cycle = 0usize;
            for index in 1..=self.config.max_index {
                match extract_item(surface, self.schema, anchor, index).await {
                    Ok(Extraction::NotPresent) => continue,
                    Ok(Extraction::Found(comment)) | Ok(Extraction::Partial(comment)) => {
                        if ledger.admit(&comment) {
                            comments.push(comment);
                            admitted_this_cycle += 1;
                        }
                    }
                    Err(e) => {
                        // One flaky index must not end the cycle
                        warn!("Extraction error at index {}: {}", index, e);
                        continue;
                    }
                }
            }

            match surface
                .scroll_container(&container, self.config.scroll_delta_px)
                .await
            {
                Ok(true) => {}
                Ok(false) => warn!("Feed container vanished mid-run; scroll skipped"),
                Err(e) => warn!("Scroll failed: {}", e),
            }
            surface.pause(self.config.settle()).await;
            cycles += 1;

            info!(
                "Cycle {}/{}: {} new comments, {} total, scrollHeight={}",
                cycles,
                self.config.max_cycles,
                admitted_this_cycle,
                ledger.len(),
                height
            );

            if admitted_this_cycle == 0 && height == previous_height {
                stalls += 1;
                if stalls >= self.config.stall_threshold {
                    info!("No new content for {} cycles, stopping", stalls);
                    reason = TerminalReason::Stalled;
                    break;
                }
            } else {
                stalls = 0;
            }
            previous_height = height;
        }

        CollectionResult {
            comments,
            scroll_cycles_performed: cycles,
            terminal_reason: reason,
            anchor_degraded: false,
        }
    }
}
