//! Assembly and persistence of the final JSON report.
//!
//! Shape: `{post_info, comments, metadata}` where `comments` maps each
//! comment's identity to its field data in first-seen order, or is `null`
//! when collection never ran, and `metadata` records the run's totals and
//! terminal state for runs that reached the feed. Files get a timestamp
//! inserted before the extension so repeated runs never clobber each other.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::app::Result;
use crate::collector::{CollectionResult, TerminalReason};
use crate::post::PostInfo;

/// Per-run totals and terminal state; absent when collection never ran.
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    pub total_comments: usize,
    pub total_scrolls: u32,
    pub terminal_reason: TerminalReason,
    pub anchor_degraded: bool,
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    pub url: String,
    pub collected_at: String,
    pub with_login: bool,
    #[serde(flatten)]
    pub run: Option<RunMetadata>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub post_info: Option<PostInfo>,
    /// Identity-keyed comment map, or `null` when collection was skipped
    /// (no credentials, failed login) or failed before reaching the feed.
    pub comments: Option<serde_json::Map<String, serde_json::Value>>,
    pub metadata: ReportMetadata,
}

impl Report {
    pub fn new(
        url: &str,
        post_info: Option<PostInfo>,
        collection: Option<&CollectionResult>,
        with_login: bool,
    ) -> Result<Self> {
        let comments = match collection {
            Some(collection) => {
                let mut map = serde_json::Map::new();
                for comment in &collection.comments {
                    map.insert(comment.identity.clone(), serde_json::to_value(comment)?);
                }
                Some(map)
            }
            None => None,
        };

        Ok(Self {
            post_info,
            comments,
            metadata: ReportMetadata {
                url: url.to_string(),
                collected_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                with_login,
                run: collection.map(|collection| RunMetadata {
                    total_comments: collection.comments.len(),
                    total_scrolls: collection.scroll_cycles_performed,
                    terminal_reason: collection.terminal_reason,
                    anchor_degraded: collection.anchor_degraded,
                }),
            },
        })
    }
}

/// Write the report next to `base_path`, with a timestamp inserted before
/// the extension. Returns the path actually written.
pub fn save_report(report: &Report, base_path: &Path) -> Result<PathBuf> {
    let path = timestamped_path(base_path, Utc::now());
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;
    info!("Report saved to {}", path.display());
    Ok(path)
}

fn timestamped_path(base: &Path, now: DateTime<Utc>) -> PathBuf {
    let stamp = now.format("%Y%m%d_%H%M%S");
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("post_data");
    let name = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext),
        None => format!("{}_{}", stem, stamp),
    };
    match base.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from(name),
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
