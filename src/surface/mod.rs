//! The render surface: a narrow capability interface over a controllable
//! browser document.
//!
//! Everything the collectors need from the browser goes through
//! [`RenderSurface`]: navigation, structural-path lookup, scrolling,
//! measurement and form interaction. Element lookups are path-based rather
//! than handle-based because the target feed recycles its DOM nodes during
//! scroll; a handle held across a scroll cycle would go stale anyway.
//!
//! The production implementation is [`ChromeSurface`]; tests script a fake
//! against the same trait.

pub mod chrome;

#[cfg(test)]
pub(crate) mod fake;

pub use chrome::ChromeSurface;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

/// Capability interface over a rendered, scriptable page.
///
/// Structural paths are absolute XPath strings; methods taking a path report
/// a missing node as a normal outcome (`None`, `false` or `0`), never as an
/// error. Errors are reserved for surface-level failures (browser gone,
/// script rejected).
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Load a page. Best-effort: returning does not guarantee full settle.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Poll for a CSS selector to become present, up to `timeout`.
    ///
    /// Returns false on timeout; never errors.
    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> bool;

    /// Collect the `id` attributes of all elements whose id starts with
    /// `prefix`, in document order.
    async fn ids_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Read the `content` attribute of a `<meta property="...">` tag.
    async fn meta_content(&self, property: &str) -> Result<Option<String>>;

    /// Inner text of the node at an absolute structural path, or `None` if
    /// no node exists there.
    async fn text_at(&self, path: &str) -> Result<Option<String>>;

    /// Whether the node at `path` exists and occupies layout space.
    async fn is_visible(&self, path: &str) -> Result<bool>;

    /// Scroll the container at `path` forward by `delta_px`.
    ///
    /// Returns false if the container does not exist.
    async fn scroll_container(&self, path: &str, delta_px: i64) -> Result<bool>;

    /// Scroll the window itself by `delta_px`.
    async fn scroll_window(&self, delta_px: i64) -> Result<()>;

    /// `scrollHeight` of the container at `path`, or 0 if it is missing.
    async fn scroll_height(&self, path: &str) -> Result<i64>;

    /// Type `value` into the element matching a CSS selector.
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Click the element matching a CSS selector.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Click the element if it is currently present; returns whether a
    /// click happened.
    async fn click_if_present(&self, selector: &str) -> Result<bool>;

    /// Click the first button whose visible text equals `text`, if any.
    ///
    /// CSS cannot select on text content, so this is its own capability.
    async fn click_button_with_text(&self, text: &str) -> Result<bool>;

    /// Block for a fixed settle duration.
    ///
    /// The feed offers no "content updated" signal, so callers over-wait;
    /// going through the trait lets tests skip real time.
    async fn pause(&self, duration: Duration);
}
