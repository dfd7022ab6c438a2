use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use shared::{Product, SiteConfig};
use shopfront_core::app::Storefront;
use shopfront_core::config::RuntimeConfig;
use shopfront_core::state::View;

mod browser;
mod driver;
mod keyboard;

use browser::WebBrowser;
use driver::FrameDriver;
use keyboard::EscapeListener;

/// Initialize WASM module with panic hook and logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("shopfront runtime initialized");
}

/// Shared mutable state behind the JS boundary. The frame, keyboard, and
/// timeout closures all hold an `Rc` to this.
pub(crate) struct Inner {
    pub(crate) app: Storefront,
    pub(crate) browser: WebBrowser,
    on_change: Option<js_sys::Function>,
    last_frame_ms: Option<f64>,
}

impl Inner {
    /// Invoke the registered change listener, if any.
    pub(crate) fn notify(&self) {
        if let Some(listener) = &self.on_change {
            if let Err(e) = listener.call0(&JsValue::NULL) {
                tracing::warn!("on_change listener threw: {e:?}");
            }
        }
    }

    /// One animation frame: advance the scroll engine by the elapsed time.
    pub(crate) fn frame(&mut self, now_ms: f64) {
        let dt = match self.last_frame_ms {
            Some(prev) => ((now_ms - prev) / 1000.0).clamp(0.0, 0.1),
            None => 1.0 / 60.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.app.tick(dt, &mut self.browser);
    }
}

/// The storefront runtime, one instance per page session.
///
/// The JS presentational layer reads state through the accessors, mutates it
/// only through the operations here, and re-renders when the registered
/// change listener fires (or when `version()` moves).
#[wasm_bindgen]
pub struct ShopfrontApp {
    inner: Rc<RefCell<Inner>>,
    frame_driver: FrameDriver,
    escape: Option<EscapeListener>,
}

#[wasm_bindgen]
impl ShopfrontApp {
    /// Build the app, resolving the entry view from the current URL path.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ShopfrontApp, JsValue> {
        Self::build(RuntimeConfig::default())
    }

    /// Build the app with a JSON runtime config (missing fields default).
    pub fn with_config(json: &str) -> Result<ShopfrontApp, JsValue> {
        let config = RuntimeConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?;
        Self::build(config)
    }

    fn build(config: RuntimeConfig) -> Result<ShopfrontApp, JsValue> {
        let browser = WebBrowser::new()?;
        let path = browser.boot_path();
        let app = Storefront::boot(config, &path);
        Ok(ShopfrontApp {
            inner: Rc::new(RefCell::new(Inner {
                app,
                browser,
                on_change: None,
                last_frame_ms: None,
            })),
            frame_driver: FrameDriver::new(),
            escape: None,
        })
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Attach the frame driver and the global Escape listener. Idempotent.
    pub fn start(&mut self) {
        if !self.frame_driver.is_running() {
            self.frame_driver.start(Rc::clone(&self.inner));
            self.inner.borrow_mut().app.set_driver_running(true);
        }
        if self.escape.is_none() {
            self.escape = Some(EscapeListener::attach(Rc::clone(&self.inner)));
        }
    }

    /// Cancel the frame driver and remove the Escape listener. Idempotent.
    /// After teardown, scroll requests fall back to immediate jumps.
    pub fn destroy(&mut self) {
        self.frame_driver.stop();
        if let Some(mut escape) = self.escape.take() {
            escape.detach();
        }
        let mut inner = self.inner.borrow_mut();
        inner.app.set_driver_running(false);
        inner.last_frame_ms = None;
    }

    // ── Change notification ────────────────────────────────────

    /// Register the listener invoked after every state mutation.
    pub fn set_on_change(&mut self, listener: js_sys::Function) {
        self.inner.borrow_mut().on_change = Some(listener);
    }

    pub fn clear_on_change(&mut self) {
        self.inner.borrow_mut().on_change = None;
    }

    /// Monotonic state version, for render invalidation without a listener.
    pub fn version(&self) -> u64 {
        self.inner.borrow().app.version()
    }

    // ── Navigation ─────────────────────────────────────────────

    /// Switch views. `view` is one of `landing | catalog | product-details |
    /// checkout | admin`.
    pub fn navigate(&mut self, view: &str) -> Result<(), JsValue> {
        let view: View = view.parse().map_err(|e: String| JsValue::from_str(&e))?;
        {
            let mut inner = self.inner.borrow_mut();
            let Inner { app, browser, .. } = &mut *inner;
            app.navigate(view, browser);
        }
        self.emit_change();
        Ok(())
    }

    /// Remember the product (JSON-encoded), then navigate to product
    /// details.
    pub fn select_product(&mut self, product_json: &str) -> Result<(), JsValue> {
        let product: Product = serde_json::from_str(product_json)
            .map_err(|e| JsValue::from_str(&format!("product parse error: {e}")))?;
        {
            let mut inner = self.inner.borrow_mut();
            let Inner { app, browser, .. } = &mut *inner;
            app.select_product(product, browser);
        }
        self.emit_change();
        Ok(())
    }

    /// Navigate, then scroll to an anchor of the newly mounted view after
    /// the configured delay, so the anchor exists before the scroll fires.
    pub fn navigate_then_scroll(&mut self, view: &str, anchor: &str) -> Result<(), JsValue> {
        self.navigate(view)?;

        let delay = self.inner.borrow().app.config().anchor_delay_ms as i32;
        let inner = Rc::clone(&self.inner);
        let anchor = anchor.to_string();
        let callback = Closure::once_into_js(move || {
            let mut guard = inner.borrow_mut();
            let Inner { app, browser, .. } = &mut *guard;
            app.scroll_to(&anchor, browser);
        });

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window object"))?;
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay,
        )?;
        Ok(())
    }

    pub fn current_view(&self) -> String {
        self.inner.borrow().app.view().as_str().to_string()
    }

    /// Selected product as JSON, or `"null"`; the details view renders
    /// nothing in that case.
    pub fn selected_product_json(&self) -> String {
        let inner = self.inner.borrow();
        match inner.app.selected_product() {
            Some(product) => serde_json::to_string(product).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }

    // ── Cart ───────────────────────────────────────────────────

    pub fn add_to_cart(&mut self, product_json: &str) -> Result<(), JsValue> {
        let product: Product = serde_json::from_str(product_json)
            .map_err(|e| JsValue::from_str(&format!("product parse error: {e}")))?;
        self.inner.borrow_mut().app.add_to_cart(&product);
        self.emit_change();
        Ok(())
    }

    pub fn remove_from_cart(&mut self, id: &str) {
        self.inner.borrow_mut().app.remove_from_cart(id);
        self.emit_change();
    }

    pub fn set_quantity(&mut self, id: &str, quantity: i32) {
        self.inner.borrow_mut().app.set_quantity(id, quantity);
        self.emit_change();
    }

    pub fn increment_quantity(&mut self, id: &str) {
        self.inner.borrow_mut().app.increment_quantity(id);
        self.emit_change();
    }

    pub fn decrement_quantity(&mut self, id: &str) {
        self.inner.borrow_mut().app.decrement_quantity(id);
        self.emit_change();
    }

    /// Empty the cart, e.g. after a completed order.
    pub fn clear_cart(&mut self) {
        self.inner.borrow_mut().app.clear_cart();
        self.emit_change();
    }

    /// Cart lines as a JSON array, in insertion order
    pub fn cart_json(&self) -> String {
        let inner = self.inner.borrow();
        serde_json::to_string(inner.app.cart().lines()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn cart_total(&self) -> f64 {
        self.inner.borrow().app.cart().total()
    }

    pub fn cart_count(&self) -> u32 {
        self.inner.borrow().app.cart().count()
    }

    pub fn is_cart_open(&self) -> bool {
        self.inner.borrow().app.cart().is_open()
    }

    pub fn set_cart_open(&mut self, open: bool) {
        self.inner.borrow_mut().app.set_cart_open(open);
        self.emit_change();
    }

    // ── Checkout ───────────────────────────────────────────────

    pub fn can_checkout(&self) -> bool {
        self.inner.borrow().app.can_checkout()
    }

    /// Close the drawer, then land on checkout. Returns false (and changes
    /// nothing) when the cart is empty.
    pub fn proceed_to_checkout(&mut self) -> bool {
        let proceeded = {
            let mut inner = self.inner.borrow_mut();
            let Inner { app, browser, .. } = &mut *inner;
            app.proceed_to_checkout(browser)
        };
        if proceeded {
            self.emit_change();
        }
        proceeded
    }

    // ── Scrolling ──────────────────────────────────────────────

    /// Scroll to an anchor id, or to the top for `""`/`"top"`. A missing
    /// anchor is silently ignored.
    pub fn scroll_to(&mut self, target: &str) {
        let mut inner = self.inner.borrow_mut();
        let Inner { app, browser, .. } = &mut *inner;
        app.scroll_to(target, browser);
    }

    // ── External data ──────────────────────────────────────────

    pub fn set_site_config(&mut self, json: &str) -> Result<(), JsValue> {
        let site: SiteConfig = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("site config parse error: {e}")))?;
        self.inner.borrow_mut().app.set_site_config(site);
        self.emit_change();
        Ok(())
    }

    pub fn site_config_json(&self) -> String {
        let inner = self.inner.borrow();
        match inner.app.site_config() {
            Some(site) => serde_json::to_string(site).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }

    fn emit_change(&self) {
        self.inner.borrow().notify();
    }
}

impl Drop for ShopfrontApp {
    fn drop(&mut self) {
        self.frame_driver.stop();
    }
}
