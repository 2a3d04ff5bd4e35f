//! Scripted render surface for tests.
//!
//! A `FakeSurface` holds a sequence of "cycles": path→text maps plus a
//! container height. Each scroll advances to the next cycle, which is how
//! tests model content loading in after a scroll without real time or a
//! browser. `pause` is a no-op that only records the requested duration.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{GleanerError, Result};
use crate::surface::RenderSurface;

#[derive(Debug, Default, Clone)]
pub struct FakeCycle {
    pub texts: HashMap<String, String>,
    pub height: i64,
}

impl FakeCycle {
    pub fn with_height(height: i64) -> Self {
        Self {
            texts: HashMap::new(),
            height,
        }
    }

    pub fn text(mut self, path: String, value: &str) -> Self {
        self.texts.insert(path, value.to_string());
        self
    }
}

#[derive(Debug, Default)]
struct State {
    cycle: usize,
    scrolls: u32,
    navigations: Vec<String>,
    filled: Vec<(String, String)>,
    clicked: Vec<String>,
    total_paused: Duration,
}

pub struct FakeSurface {
    cycles: Vec<FakeCycle>,
    ids: Vec<String>,
    container_visible: bool,
    meta: HashMap<String, String>,
    present: HashSet<String>,
    state: Mutex<State>,
}

impl FakeSurface {
    pub fn new(cycles: Vec<FakeCycle>) -> Self {
        Self {
            cycles,
            ids: Vec::new(),
            container_visible: true,
            meta: HashMap::new(),
            present: HashSet::new(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![FakeCycle::default()])
    }

    pub fn with_ids(mut self, ids: &[&str]) -> Self {
        self.ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn container_missing(mut self) -> Self {
        self.container_visible = false;
        self
    }

    pub fn with_meta(mut self, property: &str, content: &str) -> Self {
        self.meta.insert(property.to_string(), content.to_string());
        self
    }

    pub fn with_present(mut self, selectors: &[&str]) -> Self {
        self.present = selectors.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn scroll_count(&self) -> u32 {
        self.state.lock().unwrap().scrolls
    }

    pub fn total_paused(&self) -> Duration {
        self.state.lock().unwrap().total_paused
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn filled(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().filled.clone()
    }

    pub fn clicked(&self) -> Vec<String> {
        self.state.lock().unwrap().clicked.clone()
    }

    fn current(&self) -> FakeCycle {
        let state = self.state.lock().unwrap();
        self.cycles
            .get(state.cycle)
            .cloned()
            .unwrap_or_default()
    }

    fn advance(&self) {
        let mut state = self.state.lock().unwrap();
        state.scrolls += 1;
        if state.cycle + 1 < self.cycles.len() {
            state.cycle += 1;
        }
    }
}

#[async_trait]
impl RenderSurface for FakeSurface {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.state.lock().unwrap().navigations.push(url.to_string());
        Ok(())
    }

    async fn wait_for_visible(&self, selector: &str, _timeout: Duration) -> bool {
        self.present.contains(selector)
    }

    async fn ids_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .ids
            .iter()
            .filter(|id| id.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn meta_content(&self, property: &str) -> Result<Option<String>> {
        Ok(self.meta.get(property).cloned())
    }

    async fn text_at(&self, path: &str) -> Result<Option<String>> {
        Ok(self.current().texts.get(path).cloned())
    }

    async fn is_visible(&self, _path: &str) -> Result<bool> {
        Ok(self.container_visible)
    }

    async fn scroll_container(&self, _path: &str, _delta_px: i64) -> Result<bool> {
        if !self.container_visible {
            return Ok(false);
        }
        self.advance();
        Ok(true)
    }

    async fn scroll_window(&self, _delta_px: i64) -> Result<()> {
        self.advance();
        Ok(())
    }

    async fn scroll_height(&self, _path: &str) -> Result<i64> {
        Ok(self.current().height)
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        if !self.present.contains(selector) {
            return Err(GleanerError::Surface(format!(
                "Element not found: {}",
                selector
            )));
        }
        self.state
            .lock()
            .unwrap()
            .filled
            .push((selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        if !self.present.contains(selector) {
            return Err(GleanerError::Surface(format!(
                "Element not found: {}",
                selector
            )));
        }
        self.state.lock().unwrap().clicked.push(selector.to_string());
        Ok(())
    }

    async fn click_if_present(&self, selector: &str) -> Result<bool> {
        if self.present.contains(selector) {
            self.state.lock().unwrap().clicked.push(selector.to_string());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn click_button_with_text(&self, text: &str) -> Result<bool> {
        if self.present.contains(text) {
            self.state.lock().unwrap().clicked.push(text.to_string());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn pause(&self, duration: Duration) {
        self.state.lock().unwrap().total_paused += duration;
    }
}
