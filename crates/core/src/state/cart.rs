use serde::{Deserialize, Serialize};
use shared::Product;

/// One product entry in the cart, with its own quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub name: String,
    /// Unit price, not the line total
    pub price: f64,
    pub quantity: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub image: String,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            category: product.category.clone(),
            model: product.model.clone(),
            image: product.image.clone(),
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Cart contents and the drawer open flag.
///
/// Lines keep insertion order (display-relevant) and ids stay unique:
/// adding a product already in the cart merges by bumping its quantity.
/// Totals are recomputed from the lines on every read, never cached.
#[derive(Default)]
pub struct CartState {
    lines: Vec<CartLine>,
    is_open: bool,
}

impl CartState {
    /// All lines, in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add a product. Merges into the existing line when the id is already
    /// present.
    pub fn add(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Remove the line with the given id. No-op if absent.
    pub fn remove(&mut self, id: &str) {
        self.lines.retain(|l| l.id != id);
    }

    /// Set a line's quantity. A quantity of zero or less removes the line;
    /// a zero-or-negative quantity is never left in place.
    pub fn set_quantity(&mut self, id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.quantity = quantity as u32;
        }
    }

    /// Increase a line's quantity by one. No-op if absent.
    pub fn increment(&mut self, id: &str) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.quantity += 1;
        }
    }

    /// Decrease a line's quantity by one; at quantity 1 the line is removed.
    pub fn decrement(&mut self, id: &str) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            if line.quantity > 1 {
                line.quantity -= 1;
            } else {
                self.remove(id);
            }
        }
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities (the badge number)
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the cart drawer overlay is showing
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price,
            category: "chairs".to_string(),
            image: format!("/img/{id}.webp"),
            model: None,
        }
    }

    #[test]
    fn test_initial_empty() {
        let cart = CartState::default();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), 0.0);
        assert!(!cart.is_open());
    }

    #[test]
    fn test_add_duplicate_merges() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        cart.add(&product("a", 100.0));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), 200.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartState::default();
        cart.add(&product("b", 10.0));
        cart.add(&product("a", 20.0));
        cart.add(&product("c", 30.0));
        cart.add(&product("a", 20.0));
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_remove_absent_leaves_cart_unchanged() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        let before = cart.lines().to_vec();
        cart.remove("ghost");
        assert_eq!(cart.lines(), before.as_slice());
    }

    #[test]
    fn test_remove_present() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        cart.add(&product("b", 50.0));
        cart.remove("a");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].id, "b");
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        cart.set_quantity("a", 5);
        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total(), 500.0);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        cart.set_quantity("a", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        cart.set_quantity("a", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_at_one_removes() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        cart.increment("a");
        cart.decrement("a");
        assert_eq!(cart.count(), 1);
        cart.decrement("a");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_count_zero_iff_empty() {
        let mut cart = CartState::default();
        assert_eq!(cart.count() == 0, cart.is_empty());
        cart.add(&product("a", 100.0));
        assert_eq!(cart.count() == 0, cart.is_empty());
        cart.remove("a");
        assert_eq!(cart.count() == 0, cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        cart.add(&product("b", 50.0));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_line_total_uses_unit_price() {
        let mut cart = CartState::default();
        cart.add(&product("a", 1000.0));
        cart.add(&product("a", 1000.0));
        assert_eq!(cart.lines()[0].line_total(), 2000.0);
        assert_eq!(cart.lines()[0].price, 1000.0);
    }

    /// Invariant check over a deterministic pseudo-random mutation sequence:
    /// total and count always match what the lines say.
    #[test]
    fn test_randomized_mutations_keep_aggregates_consistent() {
        let mut cart = CartState::default();
        let mut rng: u64 = 0x9e37_79b9_7f4a_7c15;
        let ids = ["a", "b", "c", "d", "e"];

        for _ in 0..2000 {
            // xorshift64
            rng ^= rng << 13;
            rng ^= rng >> 7;
            rng ^= rng << 17;

            let id = ids[(rng % ids.len() as u64) as usize];
            match (rng >> 8) % 5 {
                0 => cart.add(&product(id, (rng % 900 + 100) as f64)),
                1 => cart.remove(id),
                2 => cart.set_quantity(id, ((rng >> 16) % 7) as i32 - 1),
                3 => cart.increment(id),
                _ => cart.decrement(id),
            }

            let expected_total: f64 = cart
                .lines()
                .iter()
                .map(|l| l.price * f64::from(l.quantity))
                .sum();
            let expected_count: u32 = cart.lines().iter().map(|l| l.quantity).sum();
            assert_eq!(cart.total(), expected_total);
            assert_eq!(cart.count(), expected_count);
            assert!(cart.lines().iter().all(|l| l.quantity >= 1));

            // ids stay unique
            for (i, line) in cart.lines().iter().enumerate() {
                assert!(!cart.lines()[..i].iter().any(|other| other.id == line.id));
            }
        }
    }

    #[test]
    fn test_cart_line_serde() {
        let mut cart = CartState::default();
        cart.add(&product("a", 100.0));
        let json = serde_json::to_string(cart.lines()).unwrap();
        let back: Vec<CartLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_slice(), cart.lines());
    }
}
