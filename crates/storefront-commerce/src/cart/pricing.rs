//! Cart totals for display.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Aggregates derived from a cart at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: i64,
    /// Grand total in the cart currency.
    pub total: Money,
    /// Per-currency totals; a single entry for a single-currency cart.
    pub subtotals: Vec<Money>,
}

impl CartTotals {
    /// Formatted grand total (e.g. "€34.99").
    pub fn display_total(&self) -> String {
        self.total.display()
    }

    /// True when the lines were priced in more than one currency.
    pub fn has_mixed_currencies(&self) -> bool {
        self.subtotals.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_total() {
        let totals = CartTotals {
            item_count: 4,
            total: Money::new(3499, "EUR".into()),
            subtotals: vec![Money::new(3499, "EUR".into())],
        };
        assert_eq!(totals.display_total(), "\u{20ac}34.99");
        assert!(!totals.has_mixed_currencies());
    }
}
