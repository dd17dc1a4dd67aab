//! Cart lines and their identity.

use crate::ids::ProductId;
use crate::money::{CurrencyCode, Money};
use serde::{Deserialize, Serialize};

/// The key two cart lines are merged or removed by.
///
/// `None` means "no selection" and never equals a concrete value, not even
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineIdentity {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineIdentity {
    /// Identity of a product without size or color selection.
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            size: None,
            color: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A shopper's selection of one product variant.
///
/// `name`, the price and `image_url` are a snapshot taken when the line was
/// first added; they are not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price_minor_units: i64,
    pub currency: CurrencyCode,
    pub image_url: String,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Always at least 1.
    pub quantity: i64,
}

impl CartLine {
    /// The identity key of this line.
    pub fn identity(&self) -> LineIdentity {
        LineIdentity {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Check identity without allocating a key.
    pub fn matches(&self, identity: &LineIdentity) -> bool {
        self.product_id == identity.product_id
            && self.size == identity.size
            && self.color == identity.color
    }

    pub fn unit_price(&self) -> Money {
        Money::new(self.unit_price_minor_units, self.currency.clone())
    }

    /// `unit price × quantity` in minor units.
    pub fn line_total_minor_units(&self) -> i64 {
        self.unit_price_minor_units.saturating_mul(self.quantity)
    }

    pub fn line_total(&self) -> Money {
        Money::new(self.line_total_minor_units(), self.currency.clone())
    }

    /// Short variant label for display (e.g. "M / navy").
    pub fn variant_label(&self) -> Option<String> {
        match (&self.size, &self.color) {
            (Some(size), Some(color)) => Some(format!("{size} / {color}")),
            (Some(v), None) | (None, Some(v)) => Some(v.clone()),
            (None, None) => None,
        }
    }
}

/// What the presentation layer hands to `add_item`.
///
/// `quantity` defaults to 1 when absent; zero or negative values are coerced
/// to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price_minor_units: i64,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl CartLineInput {
    /// A line input with no size/color and the default quantity.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price_minor_units: i64,
        currency: impl Into<CurrencyCode>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price_minor_units,
            currency: currency.into(),
            image_url: String::new(),
            size: None,
            color: None,
            quantity: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// The quantity this input adds: 1 when absent or not positive.
    pub fn effective_quantity(&self) -> i64 {
        match self.quantity {
            Some(q) if q >= 1 => q,
            _ => 1,
        }
    }

    pub fn identity(&self) -> LineIdentity {
        LineIdentity {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    pub(crate) fn into_line(self) -> CartLine {
        let quantity = self.effective_quantity();
        CartLine {
            product_id: self.product_id,
            name: self.name,
            unit_price_minor_units: self.unit_price_minor_units,
            currency: self.currency,
            image_url: self.image_url,
            size: self.size,
            color: self.color,
            quantity,
        }
    }
}
