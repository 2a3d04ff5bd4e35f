use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the comment collection run.
///
/// The defaults reproduce the behavior observed to work against the live
/// page; every ceiling here is a capability limit, not a discovered count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Maximum scroll-and-settle cycles before giving up (default: 50)
    pub max_cycles: u32,

    /// Consecutive no-progress cycles before terminating as stalled (default: 3)
    pub stall_threshold: u32,

    /// Pixels scrolled forward per cycle (default: 1500)
    pub scroll_delta_px: i64,

    /// Settle pause after each scroll, in milliseconds (default: 3000)
    pub settle_ms: u64,

    /// Settle pause after initial page load, in milliseconds (default: 5000)
    pub initial_settle_ms: u64,

    /// Upper bound of the per-cycle item index scan (default: 500)
    ///
    /// The feed exposes no total count, so every cycle re-scans 1..=bound;
    /// indices beyond the rendered range simply report no node.
    pub max_index: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_cycles: 50,
            stall_threshold: 3,
            scroll_delta_px: 1500,
            settle_ms: 3000,
            initial_settle_ms: 5000,
            max_index: 500,
        }
    }
}

impl CollectorConfig {
    /// Post-scroll settle pause as a Duration
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Post-navigation settle pause as a Duration
    pub fn initial_settle(&self) -> Duration {
        Duration::from_millis(self.initial_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = CollectorConfig::default();
        assert_eq!(config.max_cycles, 50);
        assert_eq!(config.stall_threshold, 3);
        assert_eq!(config.scroll_delta_px, 1500);
        assert_eq!(config.settle_ms, 3000);
        assert_eq!(config.initial_settle_ms, 5000);
        assert_eq!(config.max_index, 500);
    }

    #[test]
    fn test_settle_durations() {
        let config = CollectorConfig::default();
        assert_eq!(config.settle(), Duration::from_millis(3000));
        assert_eq!(config.initial_settle(), Duration::from_millis(5000));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CollectorConfig = toml::from_str("max_cycles = 10").unwrap();
        assert_eq!(config.max_cycles, 10);
        assert_eq!(config.stall_threshold, 3);
        assert_eq!(config.max_index, 500);
    }
}
