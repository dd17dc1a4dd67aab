//! One shopper's browsing session.

use std::sync::Arc;

use crate::cart::{CartLineInput, CartStore};
use crate::catalog::{filter_by_style, CatalogClient, Product, ProductSelection, StyleFilter};
use crate::checkout::CheckoutCoordinator;
use crate::error::{CatalogError, CommerceError};
use crate::ids::CategoryId;
use crate::money::CurrencyCode;

/// Ties a session's cart to the catalog client every view uses.
///
/// The cart lives as long as the session. Each call to
/// [`ShopSession::begin_checkout`] starts a fresh checkout over that cart.
#[derive(Debug)]
pub struct ShopSession<C: ?Sized> {
    client: Arc<C>,
    cart: CartStore,
    default_currency: CurrencyCode,
}

impl<C: ?Sized> Clone for ShopSession<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            cart: self.cart.clone(),
            default_currency: self.default_currency.clone(),
        }
    }
}

impl<C: CatalogClient + ?Sized> ShopSession<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            cart: CartStore::new(),
            default_currency: CurrencyCode::default(),
        }
    }

    /// Currency used for totals of an empty cart.
    pub fn with_default_currency(mut self, currency: CurrencyCode) -> Self {
        self.default_currency = currency;
        self
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn default_currency(&self) -> &CurrencyCode {
        &self.default_currency
    }

    /// Open the checkout panel in `Editing` with an empty form.
    pub fn begin_checkout(&self) -> CheckoutCoordinator<C> {
        tracing::debug!(item_count = self.cart.item_count(), "checkout opened");
        CheckoutCoordinator::new(Arc::clone(&self.client), self.cart.clone())
            .with_fallback_currency(self.default_currency.clone())
    }

    /// Add the product with the options chosen in the detail view.
    pub fn add_selection(
        &self,
        product: &Product,
        selection: &ProductSelection,
    ) -> Result<(), CommerceError> {
        let input = CartLineInput::from_selection(product, selection)?;
        self.cart.add_item(input);
        Ok(())
    }

    /// Add one unit straight from a product listing.
    pub fn quick_add(&self, product: &Product) -> Result<(), CommerceError> {
        let input = CartLineInput::quick_add(product)?;
        self.cart.add_item(input);
        Ok(())
    }

    /// Products of a category, narrowed to a regional style.
    pub async fn browse(
        &self,
        category_id: &CategoryId,
        style: StyleFilter,
    ) -> Result<Vec<Product>, CatalogError> {
        let products = self.client.fetch_products_by_category(category_id).await?;
        Ok(filter_by_style(products, style))
    }
}
