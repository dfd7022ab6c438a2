//! Composition root
//!
//! [`Storefront`] owns the view state, the cart, and the scroll service, and
//! is the single entry point for every mutation. Presentational consumers
//! read through the accessors and mutate only through the operations here.

use shared::{Product, SiteConfig};

use crate::config::RuntimeConfig;
use crate::host::Browser;
use crate::scroll::{ScrollService, ScrollTarget};
use crate::state::{CartState, View, ViewState};

/// The storefront runtime: one per page session
pub struct Storefront {
    config: RuntimeConfig,
    view: ViewState,
    cart: CartState,
    scroll: ScrollService,
    site: Option<SiteConfig>,
    /// Monotonically increasing counter bumped on every state mutation, so
    /// the boundary can invalidate renders
    version: u64,
}

impl Storefront {
    /// Build the runtime with the default entry view.
    pub fn new(config: RuntimeConfig) -> Self {
        let scroll = ScrollService::new(&config);
        Self {
            config,
            view: ViewState::default(),
            cart: CartState::default(),
            scroll,
            site: None,
            version: 0,
        }
    }

    /// Build the runtime resolving the entry view from the boot-time
    /// document path. This is the only moment the URL drives the view.
    pub fn boot(config: RuntimeConfig, path: &str) -> Self {
        let initial = View::from_path(path, &config.admin_path);
        let mut app = Self::new(config);
        app.view = ViewState::with_initial(initial);
        app
    }

    // ── Read-only state ───────────────────────────────────────

    pub fn view(&self) -> View {
        self.view.current()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.view.selected()
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn site_config(&self) -> Option<&SiteConfig> {
        self.site.as_ref()
    }

    /// Current state version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    // ── Navigation ────────────────────────────────────────────

    /// Switch to a view. In order: commit the view, reset the viewport to
    /// top (animated when the frame driver runs, an immediate jump
    /// otherwise), then push the matching address. Navigating to the current
    /// view still resets scroll.
    pub fn navigate(&mut self, view: View, browser: &mut dyn Browser) {
        self.view.set_view(view);
        self.scroll.reset_to_top(browser);
        let path = if view == View::Admin {
            self.config.admin_path.clone()
        } else {
            self.config.root_path.clone()
        };
        browser.push_path(&path);
        self.bump();
    }

    /// Remember the product, then the full `navigate(ProductDetails)` effect.
    pub fn select_product(&mut self, product: Product, browser: &mut dyn Browser) {
        self.view.set_selected(product);
        self.navigate(View::ProductDetails, browser);
    }

    // ── Cart operations ───────────────────────────────────────

    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add(product);
        self.bump();
    }

    pub fn remove_from_cart(&mut self, id: &str) {
        self.cart.remove(id);
        self.bump();
    }

    pub fn set_quantity(&mut self, id: &str, quantity: i32) {
        self.cart.set_quantity(id, quantity);
        self.bump();
    }

    pub fn increment_quantity(&mut self, id: &str) {
        self.cart.increment(id);
        self.bump();
    }

    pub fn decrement_quantity(&mut self, id: &str) {
        self.cart.decrement(id);
        self.bump();
    }

    /// Empty the cart, e.g. after a completed order.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.bump();
    }

    pub fn set_cart_open(&mut self, open: bool) {
        self.cart.set_open(open);
        self.bump();
    }

    /// Escape closes the drawer when it is open. Returns whether anything
    /// changed.
    pub fn handle_escape(&mut self) -> bool {
        if self.cart.is_open() {
            self.cart.set_open(false);
            self.bump();
            true
        } else {
            false
        }
    }

    /// Checkout is gated on a non-empty cart.
    pub fn can_checkout(&self) -> bool {
        !self.cart.is_empty()
    }

    /// Close the drawer, then navigate to checkout, in that order, so the
    /// overlay never lingers over the new view. No-op on an empty cart.
    pub fn proceed_to_checkout(&mut self, browser: &mut dyn Browser) -> bool {
        if !self.can_checkout() {
            return false;
        }
        self.cart.set_open(false);
        self.navigate(View::Checkout, browser);
        true
    }

    // ── Scrolling ─────────────────────────────────────────────

    /// Scroll to an anchor, or to the top for `""`/`"top"`.
    pub fn scroll_to(&mut self, raw_target: &str, browser: &mut dyn Browser) {
        let target = ScrollTarget::parse(raw_target);
        self.scroll.scroll_to(&target, browser);
    }

    /// Mark the per-frame driver attached or detached. While detached,
    /// scroll requests fall back to immediate jumps.
    pub fn set_driver_running(&mut self, running: bool) {
        self.scroll.set_driver_running(running);
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_animating()
    }

    /// Advance the scroll animation one frame.
    pub fn tick(&mut self, dt: f64, browser: &mut dyn Browser) {
        self.scroll.tick(dt, browser);
    }

    // ── External data ─────────────────────────────────────────

    pub fn set_site_config(&mut self, site: SiteConfig) {
        self.site = Some(site);
        self.bump();
    }
}
