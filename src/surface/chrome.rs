use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::app::{GleanerError, Result};
use crate::config::SurfaceConfig;
use crate::surface::RenderSurface;

/// How often visibility polling re-checks the selector.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chrome-backed render surface using chromiumoxide.
///
/// One browser, one page, driven by a single logical thread of control.
/// XPath lookups run as `document.evaluate` scripts in the page because the
/// feed's nodes are recycled during scroll and handles would not survive a
/// cycle.
pub struct ChromeSurface {
    browser: Browser,
    page: Page,
    handler: Option<JoinHandle<()>>,
}

impl ChromeSurface {
    /// Launch a browser and open a blank page.
    pub async fn launch(config: &SurfaceConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .window_size(1280, 800);

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| GleanerError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            GleanerError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // Drive browser events until the handler stream ends
        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| GleanerError::Browser(format!("Failed to create page: {}", e)))?;

        if let Some(ref ua) = config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| GleanerError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        Ok(Self {
            browser,
            page,
            handler: Some(handler),
        })
    }

    /// Close the browser and stop the event handler task.
    pub async fn close(&mut self) -> Result<()> {
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        Ok(())
    }

    async fn eval(&self, script: String) -> Result<serde_json::Value> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| GleanerError::Surface(format!("Script execution failed: {}", e)))?
            .into_value()
            .map_err(|e| GleanerError::Surface(format!("Failed to parse script result: {:?}", e)))
    }

    /// Script prelude resolving an XPath to a node (or null) as `node`.
    fn xpath_lookup(path: &str) -> String {
        format!(
            r#"const node = document.evaluate("{}", document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;"#,
            js_escape(path)
        )
    }
}

impl Drop for ChromeSurface {
    fn drop(&mut self) {
        // Handler must not outlive the browser process
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}

#[async_trait]
impl RenderSurface for ChromeSurface {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| GleanerError::Navigation(format!("Failed to load {}: {}", url, e)))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| GleanerError::Navigation(format!("Navigation to {} failed: {}", url, e)))?;
        Ok(())
    }

    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn ids_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let selector = format!(r#"[id^="{}"]"#, prefix);
        let elements = match self.page.find_elements(&selector).await {
            Ok(elements) => elements,
            Err(_) => return Ok(Vec::new()),
        };

        let mut ids = Vec::new();
        for element in elements {
            if let Ok(Some(id)) = element.attribute("id").await {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    async fn meta_content(&self, property: &str) -> Result<Option<String>> {
        let script = format!(
            r#"(() => {{
                const meta = document.querySelector('meta[property="{}"]');
                return meta ? meta.getAttribute('content') : null;
            }})()"#,
            property
        );
        let value = self.eval(script).await?;
        Ok(value.as_str().map(String::from))
    }

    async fn text_at(&self, path: &str) -> Result<Option<String>> {
        let script = format!(
            r#"(() => {{
                {lookup}
                return node ? node.innerText : null;
            }})()"#,
            lookup = Self::xpath_lookup(path)
        );
        let value = self.eval(script).await?;
        Ok(value.as_str().map(String::from))
    }

    async fn is_visible(&self, path: &str) -> Result<bool> {
        let script = format!(
            r#"(() => {{
                {lookup}
                if (!node) return false;
                const rect = node.getBoundingClientRect();
                return rect.width > 0 && rect.height > 0;
            }})()"#,
            lookup = Self::xpath_lookup(path)
        );
        let value = self.eval(script).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn scroll_container(&self, path: &str, delta_px: i64) -> Result<bool> {
        let script = format!(
            r#"(() => {{
                {lookup}
                if (!node) return false;
                node.scrollTop += {delta_px};
                return true;
            }})()"#,
            lookup = Self::xpath_lookup(path)
        );
        let value = self.eval(script).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn scroll_window(&self, delta_px: i64) -> Result<()> {
        self.eval(format!("window.scrollBy(0, {})", delta_px)).await?;
        Ok(())
    }

    async fn scroll_height(&self, path: &str) -> Result<i64> {
        let script = format!(
            r#"(() => {{
                {lookup}
                return node ? node.scrollHeight : 0;
            }})()"#,
            lookup = Self::xpath_lookup(path)
        );
        let value = self.eval(script).await?;
        Ok(value.as_i64().unwrap_or(0))
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| GleanerError::Surface(format!("Element not found: {}: {}", selector, e)))?
            .click()
            .await
            .map_err(|e| GleanerError::Surface(format!("Failed to focus {}: {}", selector, e)))?
            .type_str(value)
            .await
            .map_err(|e| GleanerError::Surface(format!("Failed to type into {}: {}", selector, e)))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| GleanerError::Surface(format!("Element not found: {}: {}", selector, e)))?
            .click()
            .await
            .map_err(|e| GleanerError::Surface(format!("Failed to click {}: {}", selector, e)))?;
        Ok(())
    }

    async fn click_if_present(&self, selector: &str) -> Result<bool> {
        match self.page.find_element(selector).await {
            Ok(element) => {
                element.click().await.map_err(|e| {
                    GleanerError::Surface(format!("Failed to click {}: {}", selector, e))
                })?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    async fn click_button_with_text(&self, text: &str) -> Result<bool> {
        let script = format!(
            r#"(() => {{
                const target = "{}";
                const button = Array.from(document.querySelectorAll('button'))
                    .find(el => el.innerText.trim() === target);
                if (button) {{ button.click(); return true; }}
                return false;
            }})()"#,
            js_escape(text)
        );
        let value = self.eval(script).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Escape a string for embedding inside a double-quoted JS literal.
fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_escape_quotes() {
        assert_eq!(js_escape(r#"a"b"#), r#"a\"b"#);
        assert_eq!(js_escape(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_xpath_lookup_embeds_path() {
        let script = ChromeSurface::xpath_lookup("//*[@id='mount_0_0']/div");
        assert!(script.contains("//*[@id='mount_0_0']/div"));
        assert!(script.contains("document.evaluate"));
    }
}
