//! Turning a shopper's product choice into a cart line.

use crate::cart::CartLineInput;
use crate::catalog::Product;
use crate::error::CommerceError;

/// Options picked in the product detail view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductSelection {
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i64,
}

impl ProductSelection {
    pub fn new(quantity: i64) -> Self {
        Self {
            quantity,
            ..Self::default()
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

impl CartLineInput {
    /// Build a cart line from a product and the options the shopper chose.
    ///
    /// A size (color) is required exactly when the product offers sizes
    /// (colors) and must be one of the offered values. The quantity is
    /// clamped to `1..=stock_count`.
    pub fn from_selection(
        product: &Product,
        selection: &ProductSelection,
    ) -> Result<Self, CommerceError> {
        if !product.stock_status().is_available() {
            return Err(CommerceError::OutOfStock(product.id.to_string()));
        }

        let size = pick_option(product, "size", &product.sizes, selection.size.as_deref())?;
        let color = pick_option(product, "color", &product.colors, selection.color.as_deref())?;

        let max = i64::try_from(product.stock_count).unwrap_or(i64::MAX);
        let quantity = selection.quantity.clamp(1, max.max(1));

        Ok(Self::for_product(product, size, color, Some(quantity)))
    }

    /// One unit with the first offered size and color, as the listing's
    /// "add to cart" button does.
    pub fn quick_add(product: &Product) -> Result<Self, CommerceError> {
        if !product.stock_status().is_available() {
            return Err(CommerceError::OutOfStock(product.id.to_string()));
        }

        Ok(Self::for_product(
            product,
            product.sizes.first().cloned(),
            product.colors.first().cloned(),
            Some(1),
        ))
    }

    fn for_product(
        product: &Product,
        size: Option<String>,
        color: Option<String>,
        quantity: Option<i64>,
    ) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_minor_units: product.price,
            currency: product.currency.clone(),
            image_url: product.image_url.clone(),
            size,
            color,
            quantity,
        }
    }
}

fn pick_option(
    product: &Product,
    option: &'static str,
    offered: &[String],
    chosen: Option<&str>,
) -> Result<Option<String>, CommerceError> {
    let chosen = chosen.filter(|v| !v.is_empty());
    match (offered.is_empty(), chosen) {
        (true, _) => Ok(None),
        (false, None) => Err(CommerceError::SelectionRequired(option)),
        (false, Some(value)) if offered.iter().any(|o| o == value) => Ok(Some(value.to_string())),
        (false, Some(value)) => Err(CommerceError::InvalidSelection {
            product_id: product.id.to_string(),
            option,
            value: value.to_string(),
        }),
    }
}
