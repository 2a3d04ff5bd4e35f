//! # Gleaner
//!
//! An interactive collector for single Instagram post pages: post metadata,
//! an approximate view count for reels, and the full visible comment feed,
//! persisted as one JSON report.
//!
//! ## Architecture
//!
//! ```text
//! RenderSurface (Chrome) → post info → login → view count → comment collector → report
//! ```
//!
//! The comment collector is the interesting part: the feed is a virtualized,
//! scrollable list whose DOM nodes are recycled during scroll, so the
//! collector re-scans a bounded index range every cycle, deduplicates by a
//! content fingerprint, and stops on a stall heuristic rather than a total
//! count.
//!
//! ## Modules
//!
//! - [`app`]: Error types and the crate-wide `Result` alias
//! - [`cli`]: Command-line interface and the collection pipeline
//! - [`config`]: TOML configuration (`~/.config/gleaner/config.toml`)
//! - [`surface`]: The [`RenderSurface`](surface::RenderSurface) capability
//!   trait and its headless-Chrome implementation
//! - [`collector`]: Incremental comment collection (anchor resolution,
//!   structural paths, extraction, dedup, scroll/termination)
//! - [`post`]: Post URL normalization and `og:description` metadata
//! - [`viewcount`]: View-count lookup on the author's reels grid
//! - [`login`]: Credential-based session establishment
//! - [`report`]: JSON report assembly and persistence

pub mod app;
pub mod cli;
pub mod collector;
pub mod config;
pub mod login;
pub mod post;
pub mod report;
pub mod surface;
pub mod viewcount;
