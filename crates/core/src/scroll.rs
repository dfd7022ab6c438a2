//! Smooth-scroll service
//!
//! Owns the animation state that moves the viewport. The per-frame driver
//! (requestAnimationFrame in the browser, a plain loop in tests) calls
//! [`ScrollService::tick`]; everything else just retargets the engine.

use crate::config::RuntimeConfig;
use crate::host::Browser;

/// Animation is considered settled within this distance of the target.
const SETTLE_EPSILON: f64 = 0.5;

/// Where a scroll request should land
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Document origin
    Top,
    /// A named anchor in the current document
    Anchor(String),
}

impl ScrollTarget {
    /// Parse the string form used at the JS boundary. The empty string and
    /// `"top"` are both the origin sentinel.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == "top" {
            Self::Top
        } else {
            Self::Anchor(raw.to_string())
        }
    }
}

/// Critically-damped approach toward a target offset
#[derive(Debug)]
pub struct ScrollEngine {
    position: f64,
    target: f64,
    animating: bool,
    /// Approach rate per second
    smoothing: f64,
}

impl ScrollEngine {
    pub fn new(smoothing: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            animating: false,
            smoothing,
        }
    }

    /// Start animating from `from` toward `to`.
    pub fn retarget(&mut self, from: f64, to: f64) {
        self.position = from;
        self.target = to.max(0.0);
        self.animating = true;
    }

    /// Snap to an offset and stop animating.
    pub fn jump(&mut self, to: f64) {
        self.position = to.max(0.0);
        self.target = self.position;
        self.animating = false;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Advance by `dt` seconds and return the new offset. Settles exactly on
    /// the target once within [`SETTLE_EPSILON`].
    pub fn step(&mut self, dt: f64) -> f64 {
        if !self.animating {
            return self.position;
        }
        let blend = 1.0 - (-self.smoothing * dt).exp();
        self.position += (self.target - self.position) * blend;
        if (self.target - self.position).abs() < SETTLE_EPSILON {
            self.position = self.target;
            self.animating = false;
        }
        self.position
    }
}

/// Scroll service: resolves scroll requests against the document and feeds
/// the engine. One instance per application, owned by the composition root.
pub struct ScrollService {
    engine: ScrollEngine,
    header_offset: f64,
    /// Whether the per-frame driver is attached. When it is not, scroll
    /// requests degrade to immediate jumps.
    driver_running: bool,
}

impl ScrollService {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            engine: ScrollEngine::new(config.scroll_smoothing),
            header_offset: config.header_offset,
            driver_running: false,
        }
    }

    pub fn set_driver_running(&mut self, running: bool) {
        self.driver_running = running;
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    /// Reset the viewport to the document origin. Used on every view switch.
    pub fn reset_to_top(&mut self, browser: &mut dyn Browser) {
        self.move_to(0.0, browser);
    }

    /// Scroll to a target. A missing anchor is not an error: the request is
    /// dropped with a diagnostic and the viewport stays where it is.
    pub fn scroll_to(&mut self, target: &ScrollTarget, browser: &mut dyn Browser) {
        match target {
            ScrollTarget::Top => self.move_to(0.0, browser),
            ScrollTarget::Anchor(anchor) => match browser.anchor_top(anchor) {
                Some(top) => {
                    let dest = (top + browser.scroll_offset() - self.header_offset).max(0.0);
                    self.move_to(dest, browser);
                }
                None => {
                    tracing::debug!(anchor = %anchor, "scroll target not in document, ignoring");
                }
            },
        }
    }

    /// Advance the animation one frame and apply the new offset.
    pub fn tick(&mut self, dt: f64, browser: &mut dyn Browser) {
        if self.engine.is_animating() {
            let offset = self.engine.step(dt);
            browser.set_scroll(offset);
        }
    }

    fn move_to(&mut self, dest: f64, browser: &mut dyn Browser) {
        if self.driver_running {
            self.engine.retarget(browser.scroll_offset(), dest);
        } else {
            browser.set_scroll(dest);
            self.engine.jump(dest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::FakeBrowser;

    fn service(driver: bool) -> ScrollService {
        let mut s = ScrollService::new(&RuntimeConfig::default());
        s.set_driver_running(driver);
        s
    }

    #[test]
    fn test_target_parse_top_sentinels() {
        assert_eq!(ScrollTarget::parse(""), ScrollTarget::Top);
        assert_eq!(ScrollTarget::parse("top"), ScrollTarget::Top);
        assert_eq!(
            ScrollTarget::parse("catalog"),
            ScrollTarget::Anchor("catalog".to_string())
        );
    }

    #[test]
    fn test_engine_converges() {
        let mut engine = ScrollEngine::new(8.0);
        engine.retarget(1000.0, 0.0);
        let mut last = 1000.0;
        for _ in 0..300 {
            let pos = engine.step(1.0 / 60.0);
            assert!(pos <= last);
            last = pos;
            if !engine.is_animating() {
                break;
            }
        }
        assert!(!engine.is_animating());
        assert_eq!(last, 0.0);
    }

    #[test]
    fn test_engine_jump_stops_animation() {
        let mut engine = ScrollEngine::new(8.0);
        engine.retarget(0.0, 500.0);
        engine.jump(120.0);
        assert!(!engine.is_animating());
        assert_eq!(engine.step(1.0), 120.0);
    }

    #[test]
    fn test_anchor_destination_includes_header_offset() {
        let mut browser = FakeBrowser::new();
        browser.anchors.insert("gallery".to_string(), 400.0);
        browser.scroll = 250.0;

        let mut scroll = service(true);
        scroll.scroll_to(&ScrollTarget::parse("gallery"), &mut browser);
        // anchorTop + currentScroll - 100
        assert!(scroll.is_animating());
        assert_eq!(scroll.engine.target(), 550.0);
    }

    #[test]
    fn test_missing_anchor_is_noop() {
        let mut browser = FakeBrowser::new();
        browser.scroll = 320.0;

        let mut scroll = service(true);
        scroll.scroll_to(&ScrollTarget::parse("nowhere"), &mut browser);
        assert!(!scroll.is_animating());
        assert_eq!(browser.scroll, 320.0);
    }

    #[test]
    fn test_top_from_any_offset() {
        for start in [0.0, 10.0, 5000.0] {
            let mut browser = FakeBrowser::new();
            browser.scroll = start;

            let mut scroll = service(true);
            scroll.scroll_to(&ScrollTarget::Top, &mut browser);
            for _ in 0..600 {
                scroll.tick(1.0 / 60.0, &mut browser);
            }
            assert_eq!(browser.scroll, 0.0, "starting from {start}");
        }
    }

    #[test]
    fn test_no_driver_falls_back_to_jump() {
        let mut browser = FakeBrowser::new();
        browser.scroll = 900.0;

        let mut scroll = service(false);
        scroll.reset_to_top(&mut browser);
        assert_eq!(browser.scroll, 0.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_destination_clamped_at_origin() {
        let mut browser = FakeBrowser::new();
        browser.anchors.insert("hero".to_string(), 20.0);
        browser.scroll = 0.0;

        let mut scroll = service(false);
        scroll.scroll_to(&ScrollTarget::parse("hero"), &mut browser);
        // 20 + 0 - 100 clamps to 0
        assert_eq!(browser.scroll, 0.0);
    }

    #[test]
    fn test_tick_idle_leaves_browser_alone() {
        let mut browser = FakeBrowser::new();
        browser.scroll = 75.0;

        let mut scroll = service(true);
        scroll.tick(1.0 / 60.0, &mut browser);
        assert_eq!(browser.scroll, 75.0);
    }
}
