//! Checkout module.
//!
//! Contains the buyer form, the order payload sent to the order service,
//! and the coordinator that drives one checkout from editing to
//! confirmation.

mod flow;
mod form;
mod order;

pub use flow::{
    CheckoutCoordinator, CheckoutState, CheckoutView, SubmissionFailure, SubmissionStatus,
};
pub use form::{BuyerField, BuyerForm};
pub use order::{OrderConfirmation, OrderLineItem, OrderSubmission};
