//! Seam between the runtime and the document/window it runs inside.

/// The browser surface the runtime talks to.
///
/// Implemented by `WebBrowser` (web-sys) in shopfront-wasm and by
/// [`crate::harness::FakeBrowser`] for headless tests.
pub trait Browser {
    /// Replace the visible address without triggering a reload.
    fn push_path(&mut self, path: &str);

    /// Top of the named anchor relative to the viewport, if the anchor
    /// exists in the current document.
    fn anchor_top(&self, anchor: &str) -> Option<f64>;

    /// Current vertical scroll offset of the viewport.
    fn scroll_offset(&self) -> f64;

    /// Move the viewport to the given offset immediately.
    fn set_scroll(&mut self, offset: f64);
}
