//! Product records as served by the catalog.

use crate::catalog::RegionStyle;
use crate::ids::{CategoryId, ProductId};
use crate::money::{CurrencyCode, Money};
use serde::{Deserialize, Serialize};

/// Stock counts below this are shown as "only N left".
pub const LOW_STOCK_THRESHOLD: u64 = 5;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Category this product is listed under.
    pub category_id: CategoryId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Unit price in minor units.
    pub price: i64,
    /// Currency of `price`.
    pub currency: CurrencyCode,
    /// Units available.
    #[serde(default)]
    pub stock_count: u64,
    /// Whether the product can be ordered at all.
    pub in_stock: bool,
    /// Offered sizes (empty when the product has no size option).
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Offered colors (empty when the product has no color option).
    #[serde(default)]
    pub colors: Vec<String>,
    /// Primary image.
    #[serde(default)]
    pub image_url: String,
    /// Regional style classifications.
    #[serde(default)]
    pub style_tags: Vec<RegionStyle>,
}

/// Availability badge for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    /// Not orderable.
    OutOfStock,
    /// Orderable, fewer than [`LOW_STOCK_THRESHOLD`] units left.
    LowStock(u64),
    /// Orderable.
    InStock(u64),
}

impl StockStatus {
    /// Check if the product can be added to the cart.
    pub fn is_available(&self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }
}

impl Product {
    /// Unit price as a [`Money`] value.
    pub fn unit_price(&self) -> Money {
        Money::new(self.price, self.currency.clone())
    }

    /// Derive the availability badge.
    pub fn stock_status(&self) -> StockStatus {
        if !self.in_stock || self.stock_count == 0 {
            StockStatus::OutOfStock
        } else if self.stock_count < LOW_STOCK_THRESHOLD {
            StockStatus::LowStock(self.stock_count)
        } else {
            StockStatus::InStock(self.stock_count)
        }
    }

    /// Check if the product is tagged with a regional style.
    pub fn has_style(&self, style: RegionStyle) -> bool {
        self.style_tags.contains(&style)
    }

    /// Check if a size must be chosen before adding to the cart.
    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Check if a color must be chosen before adding to the cart.
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }
}
