//! Application state
//!
//! Each sub-state is mutated only through its own operations; the
//! composition root ([`crate::app::Storefront`]) is the only caller.

pub mod cart;
pub mod view;

pub use cart::{CartLine, CartState};
pub use view::{View, ViewState};
