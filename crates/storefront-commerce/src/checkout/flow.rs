//! Checkout state machine.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::checkout::{BuyerField, BuyerForm, OrderConfirmation, OrderSubmission};
use crate::error::{CatalogError, CheckoutError};
use crate::money::{CurrencyCode, Money};

/// States of one checkout flow.
///
/// `Editing → Submitting → Confirmed` on success, `Editing → Submitting →
/// Editing` on failure. `Confirmed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// Shopper fills in the form; the cart may change freely.
    #[default]
    Editing,
    /// The order is on its way to the order service.
    Submitting,
    /// The order service accepted the order.
    Confirmed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Editing => "editing",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Confirmed => "confirmed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Confirmed)
    }
}

/// Why the last submission attempt did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFailure {
    /// Human-readable message for the shopper.
    pub message: String,
    /// Whether proceeding again may succeed.
    pub retryable: bool,
}

/// Pending/success/failure view of the order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus<'a> {
    /// No attempt yet, or the last failure was dismissed.
    Idle,
    Pending,
    Succeeded(&'a OrderConfirmation),
    Failed(&'a SubmissionFailure),
}

/// Everything the checkout panel renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutView {
    pub state: CheckoutState,
    pub form: BuyerForm,
    /// Set after a failed attempt, cleared by the next attempt.
    pub failure: Option<SubmissionFailure>,
    /// Cart total captured when entering `Submitting`.
    pub pending_total: Option<Money>,
    pub confirmation: Option<OrderConfirmation>,
}

impl CheckoutView {
    pub fn submission_status(&self) -> SubmissionStatus<'_> {
        match (self.state, &self.confirmation, &self.failure) {
            (CheckoutState::Submitting, _, _) => SubmissionStatus::Pending,
            (CheckoutState::Confirmed, Some(confirmation), _) => {
                SubmissionStatus::Succeeded(confirmation)
            }
            (_, _, Some(failure)) => SubmissionStatus::Failed(failure),
            _ => SubmissionStatus::Idle,
        }
    }
}

/// Drives one "proceed to checkout" flow.
///
/// A coordinator places at most one order. Once `Confirmed` it rejects
/// further submissions; start a new coordinator for the next order.
pub struct CheckoutCoordinator<C: ?Sized> {
    client: Arc<C>,
    cart: CartStore,
    fallback_currency: CurrencyCode,
    view: watch::Sender<CheckoutView>,
}

impl<C: ?Sized> std::fmt::Debug for CheckoutCoordinator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutCoordinator")
            .field("state", &self.view.borrow().state)
            .field("fallback_currency", &self.fallback_currency)
            .finish_non_exhaustive()
    }
}

impl<C: CatalogClient + ?Sized> CheckoutCoordinator<C> {
    /// Start a flow in `Editing` over the session cart.
    pub fn new(client: Arc<C>, cart: CartStore) -> Self {
        let (view, _rx) = watch::channel(CheckoutView::default());
        Self {
            client,
            cart,
            fallback_currency: CurrencyCode::default(),
            view,
        }
    }

    /// Currency shown and submitted when the cart has no lines to take it
    /// from.
    pub fn with_fallback_currency(mut self, currency: CurrencyCode) -> Self {
        self.fallback_currency = currency;
        self
    }

    /// Change one form field. Only allowed while `Editing`.
    pub fn update_form_field(
        &self,
        field: BuyerField,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        let value = value.into();
        let mut result = Ok(());
        self.view.send_if_modified(|view| match view.state {
            CheckoutState::Editing => {
                if view.form.get(field) == value {
                    return false;
                }
                view.form.set(field, value);
                true
            }
            CheckoutState::Submitting => {
                result = Err(CheckoutError::SubmissionInFlight);
                false
            }
            CheckoutState::Confirmed => {
                result = Err(CheckoutError::AlreadyConfirmed);
                false
            }
        });
        result
    }

    /// Validate, submit the order once, and settle the flow.
    ///
    /// Validation failures leave the flow in `Editing` and never reach the
    /// order service. A failed submission returns to `Editing` with the form
    /// and cart untouched. While a submission is in flight a second call is
    /// rejected with [`CheckoutError::SubmissionInFlight`].
    pub async fn proceed_to_checkout(&self) -> Result<OrderConfirmation, CheckoutError> {
        let (submission, total) = self.begin_submission()?;

        tracing::info!(
            lines = submission.line_items.len(),
            item_count = submission.item_count(),
            total_minor_units = total.amount_minor_units,
            currency = %submission.currency,
            "submitting order"
        );

        let guard = SubmittingGuard::new(&self.view);
        let outcome = self.client.submit_order(&submission).await;
        guard.disarm();

        let outcome = outcome.and_then(|order_id| {
            if order_id.is_empty() {
                Err(CatalogError::Rejected(
                    "order service returned no order id".to_string(),
                ))
            } else {
                Ok(order_id)
            }
        });

        match outcome {
            Ok(order_id) => {
                let confirmation = OrderConfirmation {
                    order_id,
                    buyer_email: submission.buyer_email.clone(),
                    total,
                    item_count: submission.item_count(),
                    confirmed_at: Utc::now(),
                };
                self.view.send_modify(|view| {
                    view.state = CheckoutState::Confirmed;
                    view.pending_total = None;
                    view.failure = None;
                    view.confirmation = Some(confirmation.clone());
                });
                self.cart.clear();
                tracing::info!(order_id = %confirmation.order_id, "order confirmed");
                Ok(confirmation)
            }
            Err(err) => {
                tracing::warn!(error = %err, "order submission failed");
                self.view.send_modify(|view| {
                    view.state = CheckoutState::Editing;
                    view.pending_total = None;
                    view.failure = Some(SubmissionFailure {
                        message: "Failed to place order. Please try again.".to_string(),
                        retryable: true,
                    });
                });
                Err(CheckoutError::SubmissionFailed(err))
            }
        }
    }

    /// Leave the checkout panel for the cart view.
    ///
    /// The form is kept for the next attempt and a stale failure message is
    /// dismissed. Not allowed while a submission is in flight.
    pub fn back_to_cart(&self) -> Result<(), CheckoutError> {
        let mut result = Ok(());
        self.view.send_if_modified(|view| match view.state {
            CheckoutState::Submitting => {
                result = Err(CheckoutError::SubmissionInFlight);
                false
            }
            CheckoutState::Editing => view.failure.take().is_some(),
            CheckoutState::Confirmed => false,
        });
        result
    }

    pub fn state(&self) -> CheckoutState {
        self.view.borrow().state
    }

    /// A copy of the current view.
    pub fn view(&self) -> CheckoutView {
        self.view.borrow().clone()
    }

    pub fn form(&self) -> BuyerForm {
        self.view.borrow().form.clone()
    }

    pub fn confirmation(&self) -> Option<OrderConfirmation> {
        self.view.borrow().confirmation.clone()
    }

    /// The order total to show on the checkout panel.
    ///
    /// While editing this follows the cart. From the moment the order is
    /// submitted it is the total captured in the submitted snapshot.
    pub fn display_total(&self) -> Money {
        let captured = {
            let view = self.view.borrow();
            view.pending_total
                .clone()
                .or_else(|| view.confirmation.as_ref().map(|c| c.total.clone()))
        };
        captured.unwrap_or_else(|| {
            self.cart
                .read(|cart| cart.totals(&self.fallback_currency).total)
        })
    }

    /// Receive every view change from now on.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutView> {
        self.view.subscribe()
    }

    /// The session cart this flow orders from.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Validate and move to `Submitting` in one step, snapshotting the cart.
    fn begin_submission(&self) -> Result<(OrderSubmission, Money), CheckoutError> {
        let mut outcome = Err(CheckoutError::SubmissionInFlight);
        self.view.send_if_modified(|view| {
            match view.state {
                CheckoutState::Editing => {}
                CheckoutState::Submitting => return false,
                CheckoutState::Confirmed => {
                    outcome = Err(CheckoutError::AlreadyConfirmed);
                    return false;
                }
            }

            let missing = view.form.missing_fields();
            if !missing.is_empty() {
                outcome = Err(CheckoutError::MissingFields(missing));
                return false;
            }

            let cart = self.cart.snapshot();
            if cart.is_empty() {
                outcome = Err(CheckoutError::EmptyCart);
                return false;
            }
            if !cart.is_single_currency() {
                tracing::warn!(
                    currency = ?cart.currency(),
                    subtotals = ?cart.subtotals_by_currency(),
                    "cart mixes currencies; submitting in the first line's currency"
                );
            }

            let total = cart.totals(&self.fallback_currency).total;
            let submission = OrderSubmission::from_cart(&cart, &view.form, &self.fallback_currency);

            view.state = CheckoutState::Submitting;
            view.failure = None;
            view.pending_total = Some(total.clone());
            outcome = Ok((submission, total));
            true
        });

        if let Err(err) = &outcome {
            tracing::debug!(error = %err, "checkout not submitted");
        }
        outcome
    }
}

/// Returns the flow to `Editing` if the submission future is dropped while
/// the order is in flight.
struct SubmittingGuard<'a> {
    view: &'a watch::Sender<CheckoutView>,
    armed: bool,
}

impl<'a> SubmittingGuard<'a> {
    fn new(view: &'a watch::Sender<CheckoutView>) -> Self {
        Self { view, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.view.send_if_modified(|view| {
            if view.state != CheckoutState::Submitting {
                return false;
            }
            tracing::warn!("order submission abandoned before a response arrived");
            view.state = CheckoutState::Editing;
            view.pending_total = None;
            view.failure = Some(SubmissionFailure {
                message: "Order submission was interrupted. Please try again.".to_string(),
                retryable: true,
            });
            true
        });
    }
}
