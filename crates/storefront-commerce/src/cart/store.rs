//! Session-scoped cart store shared by every view of the storefront.

use std::sync::Arc;

use tokio::sync::watch;

use crate::cart::{Cart, CartLine, CartLineInput, LineIdentity};

/// Shared handle to the session's cart.
///
/// Cloning the handle shares the same cart. The cart lives in a
/// [`watch`] channel: each mutation runs against the committed cart with its
/// aggregates recomputed before the new value becomes visible, and observers
/// holding a receiver from [`CartStore::subscribe`] are woken only when the
/// cart actually changed.
#[derive(Debug, Clone)]
pub struct CartStore {
    tx: Arc<watch::Sender<Cart>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create a store with an empty cart.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Cart::new());
        Self { tx: Arc::new(tx) }
    }

    /// Add a line or merge it into the line with the same identity.
    pub fn add_item(&self, input: CartLineInput) {
        let product_id = input.product_id.clone();
        let quantity = input.effective_quantity();
        self.tx.send_modify(|cart| cart.add_item(input));
        self.log_mutation("add_item", product_id.as_str(), quantity);
    }

    /// Remove the line with exactly this identity. No-op when absent.
    pub fn remove_item(&self, identity: &LineIdentity) -> bool {
        let changed = self.tx.send_if_modified(|cart| cart.remove_item(identity));
        if changed {
            self.log_mutation("remove_item", identity.product_id.as_str(), 0);
        }
        changed
    }

    /// Set a line's quantity; zero or negative removes it. No-op when absent.
    pub fn update_quantity(&self, identity: &LineIdentity, quantity: i64) -> bool {
        let changed = self
            .tx
            .send_if_modified(|cart| cart.update_quantity(identity, quantity));
        if changed {
            self.log_mutation("update_quantity", identity.product_id.as_str(), quantity);
        }
        changed
    }

    /// Empty the cart.
    pub fn clear(&self) -> bool {
        let changed = self.tx.send_if_modified(Cart::clear);
        if changed {
            tracing::debug!(op = "clear", "cart cleared");
        }
        changed
    }

    /// A copy of the last committed cart.
    pub fn snapshot(&self) -> Cart {
        self.tx.borrow().clone()
    }

    /// Read the committed cart without cloning it.
    ///
    /// Mutations from other handles wait until `f` returns, so `f` must not
    /// call back into the store.
    pub fn read<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.read(|cart| cart.lines().to_vec())
    }

    pub fn item_count(&self) -> i64 {
        self.read(Cart::item_count)
    }

    pub fn total_amount_minor_units(&self) -> i64 {
        self.read(Cart::total_amount_minor_units)
    }

    pub fn is_empty(&self) -> bool {
        self.read(Cart::is_empty)
    }

    /// Receive every committed cart from now on.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.tx.subscribe()
    }

    fn log_mutation(&self, op: &'static str, product_id: &str, quantity: i64) {
        let (item_count, total) = self.read(|c| (c.item_count(), c.total_amount_minor_units()));
        tracing::debug!(
            op,
            product_id,
            quantity,
            item_count,
            total_minor_units = total,
            "cart updated"
        );
    }
}
