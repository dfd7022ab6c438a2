use std::str::FromStr;

use shared::Product;

/// The logical pages the storefront can display. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Catalog,
    ProductDetails,
    Checkout,
    Admin,
}

impl View {
    /// Kebab-case tag used at the JS boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Catalog => "catalog",
            View::ProductDetails => "product-details",
            View::Checkout => "checkout",
            View::Admin => "admin",
        }
    }

    /// Resolve the boot-time entry view from the document path. The reserved
    /// admin path is the only special case; anything else lands on `Landing`.
    /// This runs once at startup; in-app navigation never re-derives the
    /// view from the URL.
    pub fn from_path(path: &str, admin_path: &str) -> View {
        if path == admin_path {
            View::Admin
        } else {
            View::Landing
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "landing" => Ok(View::Landing),
            "catalog" => Ok(View::Catalog),
            "product-details" => Ok(View::ProductDetails),
            "checkout" => Ok(View::Checkout),
            "admin" => Ok(View::Admin),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

/// Current view and product selection (supports the product-details view)
#[derive(Default)]
pub struct ViewState {
    current: View,
    selected: Option<Product>,
}

impl ViewState {
    pub fn with_initial(view: View) -> Self {
        Self {
            current: view,
            selected: None,
        }
    }

    /// The view currently shown
    pub fn current(&self) -> View {
        self.current
    }

    /// Product backing the product-details view. `None` means that view
    /// renders nothing.
    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    pub(crate) fn set_view(&mut self, view: View) {
        self.current = view;
    }

    pub(crate) fn set_selected(&mut self, product: Product) {
        self.selected = Some(product);
    }
}
