//! The cart entity: lines plus derived aggregates.

use crate::cart::{CartLine, CartLineInput, CartTotals, LineIdentity};
use crate::money::{CurrencyCode, Money};
use serde::Serialize;

/// Ordered cart lines for one browsing session.
///
/// No two lines share a [`LineIdentity`] and every quantity is at least 1.
/// `item_count` and `total_amount_minor_units` are recomputed after every
/// mutation, so they are never stale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    item_count: i64,
    total_amount_minor_units: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line, merging into an existing line with the same identity.
    ///
    /// On merge the existing line keeps its name, price and image; only the
    /// quantity grows. Never fails.
    pub fn add_item(&mut self, input: CartLineInput) {
        let quantity = input.effective_quantity();
        let identity = input.identity();

        if let Some(existing) = self.lines.iter_mut().find(|l| l.matches(&identity)) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.lines.push(input.into_line());
        }
        self.recompute();
    }

    /// Remove the line with exactly this identity. Returns whether a line
    /// was removed.
    pub fn remove_item(&mut self, identity: &LineIdentity) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| !l.matches(identity));
        let removed = self.lines.len() < len_before;
        if removed {
            self.recompute();
        }
        removed
    }

    /// Set a line's quantity. Zero or negative removes the line.
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, identity: &LineIdentity, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(identity);
        }

        match self.lines.iter_mut().find(|l| l.matches(identity)) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                self.recompute();
                true
            }
            _ => false,
        }
    }

    /// Remove every line. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.lines.clear();
        self.recompute();
        true
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by identity.
    pub fn line(&self, identity: &LineIdentity) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(identity))
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Sum of `unit price × quantity` over all lines.
    pub fn total_amount_minor_units(&self) -> i64 {
        self.total_amount_minor_units
    }

    /// Number of distinct lines.
    pub fn unique_line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart, taken from the first line.
    ///
    /// The storefront assumes one currency per session; see
    /// [`Cart::is_single_currency`].
    pub fn currency(&self) -> Option<&CurrencyCode> {
        self.lines.first().map(|l| &l.currency)
    }

    /// True when every line is priced in the same currency.
    pub fn is_single_currency(&self) -> bool {
        match self.currency() {
            Some(first) => self.lines.iter().all(|l| &l.currency == first),
            None => true,
        }
    }

    /// Totals per currency, in order of first appearance.
    pub fn subtotals_by_currency(&self) -> Vec<Money> {
        let mut subtotals: Vec<Money> = Vec::new();
        for line in &self.lines {
            match subtotals.iter_mut().find(|m| m.currency == line.currency) {
                Some(subtotal) => {
                    subtotal.amount_minor_units = subtotal
                        .amount_minor_units
                        .saturating_add(line.line_total_minor_units());
                }
                None => subtotals.push(line.line_total()),
            }
        }
        subtotals
    }

    /// Aggregates for display; `fallback` is the currency shown for an
    /// empty cart.
    pub fn totals(&self, fallback: &CurrencyCode) -> CartTotals {
        let currency = self.currency().unwrap_or(fallback).clone();
        CartTotals {
            item_count: self.item_count,
            total: Money::new(self.total_amount_minor_units, currency),
            subtotals: self.subtotals_by_currency(),
        }
    }

    fn recompute(&mut self) {
        self.item_count = self
            .lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity));
        self.total_amount_minor_units = self
            .lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.line_total_minor_units()));
    }
}
