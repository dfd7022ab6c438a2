//! web-sys implementation of the runtime's browser seam

use shopfront_core::host::Browser;
use wasm_bindgen::JsValue;

/// The real document/window surface
pub struct WebBrowser {
    window: web_sys::Window,
}

impl WebBrowser {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window object"))?;
        Ok(Self { window })
    }

    /// The document path at startup, for boot-time view resolution
    pub fn boot_path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }
}

impl Browser for WebBrowser {
    fn push_path(&mut self, path: &str) {
        match self.window.history() {
            Ok(history) => {
                if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                    tracing::warn!("history.pushState failed: {e:?}");
                }
            }
            Err(e) => tracing::warn!("history unavailable: {e:?}"),
        }
    }

    fn anchor_top(&self, anchor: &str) -> Option<f64> {
        let element = self.window.document()?.get_element_by_id(anchor)?;
        Some(element.get_bounding_client_rect().top())
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn set_scroll(&mut self, offset: f64) {
        self.window.scroll_to_with_x_and_y(0.0, offset);
    }
}
