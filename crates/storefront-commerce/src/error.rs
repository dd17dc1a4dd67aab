//! Commerce error types.

use crate::checkout::BuyerField;
use thiserror::Error;

/// Errors from turning a product selection into a cart line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product cannot be added because it is out of stock.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// The product offers options and none was chosen.
    #[error("Please select a {0}")]
    SelectionRequired(&'static str),

    /// The chosen option is not offered by the product.
    #[error("Invalid {option} for {product_id}: {value}")]
    InvalidSelection {
        product_id: String,
        option: &'static str,
        value: String,
    },
}

/// Errors reported by the catalog/order service client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting.
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The order service refused the order.
    #[error("Order rejected: {0}")]
    Rejected(String),
}

/// Errors surfaced by the checkout coordinator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// One or more buyer fields are blank.
    #[error("Please fill in all fields (missing: {})", join_fields(.0))]
    MissingFields(Vec<BuyerField>),

    /// Nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,

    /// A submission is already on its way to the order service.
    #[error("An order submission is already in progress")]
    SubmissionInFlight,

    /// This checkout already placed its order.
    #[error("This checkout has already been confirmed")]
    AlreadyConfirmed,

    /// The order service call failed. The cart and form are untouched.
    #[error("Failed to place order. Please try again. ({0})")]
    SubmissionFailed(CatalogError),
}

impl CheckoutError {
    /// True for local validation failures that never reached the service.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingFields(_) | Self::EmptyCart)
    }

    /// True when resubmitting the same checkout can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SubmissionFailed(_))
    }
}

fn join_fields(fields: &[BuyerField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}
