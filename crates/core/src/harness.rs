//! Headless test harness for driving the runtime without a browser.

use std::collections::HashMap;

use crate::app::Storefront;
use crate::config::RuntimeConfig;
use crate::host::Browser;
use crate::state::View;

/// Browser stand-in: records history pushes and viewport moves, and serves
/// anchors from a plain map.
#[derive(Default)]
pub struct FakeBrowser {
    /// Every path pushed, in order
    pub pushed_paths: Vec<String>,
    /// Anchor id → top relative to the viewport
    pub anchors: HashMap<String, f64>,
    /// Current vertical scroll offset
    pub scroll: f64,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Browser for FakeBrowser {
    fn push_path(&mut self, path: &str) {
        self.pushed_paths.push(path.to_string());
    }

    fn anchor_top(&self, anchor: &str) -> Option<f64> {
        self.anchors.get(anchor).copied()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn set_scroll(&mut self, offset: f64) {
        self.scroll = offset;
    }
}

/// A storefront wired to a [`FakeBrowser`] with the frame driver "running",
/// plus helpers for the common test moves.
pub struct Harness {
    pub app: Storefront,
    pub browser: FakeBrowser,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let mut app = Storefront::new(config);
        app.set_driver_running(true);
        Self {
            app,
            browser: FakeBrowser::new(),
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.app.navigate(view, &mut self.browser);
    }

    /// Run 60 fps frames until the scroll animation settles.
    pub fn settle(&mut self) {
        for _ in 0..600 {
            if !self.app.is_scrolling() {
                return;
            }
            self.app.tick(1.0 / 60.0, &mut self.browser);
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
