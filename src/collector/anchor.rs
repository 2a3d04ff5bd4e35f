use tracing::{debug, warn};

use crate::app::Result;
use crate::surface::RenderSurface;

/// The page's content root carries a dynamically assigned id with this
/// prefix, different on every load.
pub const ANCHOR_PREFIX: &str = "mount_";

/// Guessed id used when no mount element is found at all.
pub const FALLBACK_ANCHOR_ID: &str = "mount_0_0";

/// The resolved mount anchor scoping all structural paths for one page load.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub id: String,
    /// True when resolution fell back to the guessed default. The rest of
    /// the pipeline still runs, but callers should treat the result as
    /// best-effort.
    pub degraded: bool,
}

/// Locate the mount anchor in the current document.
///
/// Takes the first element whose id starts with `mount_`. If none exists
/// the guessed default is returned instead of failing, because the feed
/// container is sometimes still reachable under it.
pub async fn resolve_anchor(surface: &dyn RenderSurface) -> Result<Anchor> {
    let ids = surface.ids_with_prefix(ANCHOR_PREFIX).await?;

    match ids.into_iter().next() {
        Some(id) => {
            debug!("Mount anchor found: {}", id);
            Ok(Anchor {
                id,
                degraded: false,
            })
        }
        None => {
            warn!(
                "No mount element found, falling back to {}",
                FALLBACK_ANCHOR_ID
            );
            Ok(Anchor {
                id: FALLBACK_ANCHOR_ID.to_string(),
                degraded: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::fake::FakeSurface;

    #[tokio::test]
    async fn test_resolves_first_mount_id() {
        let surface = FakeSurface::empty().with_ids(&["mount_0_7", "mount_0_8", "other"]);
        let anchor = resolve_anchor(&surface).await.unwrap();
        assert_eq!(anchor.id, "mount_0_7");
        assert!(!anchor.degraded);
    }

    #[tokio::test]
    async fn test_ignores_non_mount_ids() {
        let surface = FakeSurface::empty().with_ids(&["header", "mount_1_2"]);
        let anchor = resolve_anchor(&surface).await.unwrap();
        assert_eq!(anchor.id, "mount_1_2");
    }

    #[tokio::test]
    async fn test_falls_back_when_missing() {
        let surface = FakeSurface::empty();
        let anchor = resolve_anchor(&surface).await.unwrap();
        assert_eq!(anchor.id, FALLBACK_ANCHOR_ID);
        assert!(anchor.degraded);
    }
}
