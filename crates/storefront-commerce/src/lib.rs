//! Cart and checkout domain logic for the storefront.
//!
//! This crate holds the state a shopper builds up between browsing and
//! placing an order:
//!
//! - **Catalog**: Product records, regional styles, the catalog client contract
//! - **Cart**: Cart lines keyed by product and options, the shared cart store
//! - **Checkout**: Buyer form, order payload, the checkout state machine
//! - **Session**: One shopper's cart wired to a catalog client
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let session = ShopSession::new(client);
//! session.quick_add(&product)?;
//!
//! let checkout = session.begin_checkout();
//! checkout.update_form_field(BuyerField::Name, "Ada Lovelace")?;
//! checkout.update_form_field(BuyerField::Email, "ada@example.com")?;
//! checkout.update_form_field(BuyerField::ShippingAddress, "12 Analytical Row")?;
//!
//! let confirmation = checkout.proceed_to_checkout().await?;
//! println!("Order {} placed", confirmation.order_id);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

pub use error::{CatalogError, CheckoutError, CommerceError};
pub use ids::*;
pub use money::{format_price, CurrencyCode, Money};
pub use session::ShopSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CheckoutError, CommerceError};
    pub use crate::ids::*;
    pub use crate::money::{format_price, CurrencyCode, Money};

    // Catalog
    pub use crate::catalog::{
        filter_by_style, CachedCatalogClient, CatalogClient, Category, Product,
        ProductSelection, RegionStyle, StockStatus, StorefrontConfig, StyleFilter,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartLineInput, CartStore, CartTotals, LineIdentity};

    // Checkout
    pub use crate::checkout::{
        BuyerField, BuyerForm, CheckoutCoordinator, CheckoutState, CheckoutView,
        OrderConfirmation, OrderLineItem, OrderSubmission, SubmissionFailure, SubmissionStatus,
    };

    pub use crate::session::ShopSession;
}
