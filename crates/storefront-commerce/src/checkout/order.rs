//! Order submission payload and confirmation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};
use crate::checkout::BuyerForm;
use crate::ids::{OrderId, ProductId};
use crate::money::{CurrencyCode, Money};

/// One line of an order as sent to the order service.
///
/// Prices, names and images are left out; the service prices the order
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&CartLine> for OrderLineItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            size: line.size.clone(),
            color: line.color.clone(),
        }
    }
}

/// The complete payload of one order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub buyer_name: String,
    pub buyer_email: String,
    pub shipping_address: String,
    pub line_items: Vec<OrderLineItem>,
    pub currency: CurrencyCode,
}

impl OrderSubmission {
    /// Build the payload from a cart snapshot and the form.
    ///
    /// Buyer fields are trimmed. The currency is the cart's (first line's)
    /// currency, or `fallback` for an empty cart.
    pub fn from_cart(cart: &Cart, form: &BuyerForm, fallback: &CurrencyCode) -> Self {
        Self {
            buyer_name: form.name.trim().to_string(),
            buyer_email: form.email.trim().to_string(),
            shipping_address: form.shipping_address.trim().to_string(),
            line_items: cart.lines().iter().map(OrderLineItem::from).collect(),
            currency: cart.currency().unwrap_or(fallback).clone(),
        }
    }

    /// Total number of units ordered.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }
}

/// What the shopper sees after the order went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    /// Where the confirmation email goes.
    pub buyer_email: String,
    /// Cart total at the moment the order was submitted.
    pub total: Money,
    pub item_count: i64,
    pub confirmed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLineInput;

    #[test]
    fn test_submission_projects_cart_lines() {
        let mut cart = Cart::new();
        cart.add_item(
            CartLineInput::new("p1", "Tee", 1999, "EUR")
                .with_size("M")
                .with_quantity(2),
        );
        cart.add_item(CartLineInput::new("p2", "Cap", 500, "EUR").with_color("red"));
        let form = BuyerForm::new("  Ada ", "ada@example.com", "1 Main St ");

        let order = OrderSubmission::from_cart(&cart, &form, &CurrencyCode::default());
        assert_eq!(order.buyer_name, "Ada");
        assert_eq!(order.shipping_address, "1 Main St");
        assert_eq!(order.currency.as_str(), "EUR");
        assert_eq!(order.item_count(), 3);
        assert_eq!(
            order.line_items[0],
            OrderLineItem {
                product_id: "p1".into(),
                quantity: 2,
                size: Some("M".into()),
                color: None,
            }
        );
    }

    #[test]
    fn test_submission_wire_format_omits_absent_options() {
        let mut cart = Cart::new();
        cart.add_item(CartLineInput::new("p2", "Cap", 500, "usd").with_quantity(3));
        let form = BuyerForm::new("Ada", "ada@example.com", "1 Main St");

        let json = serde_json::to_value(OrderSubmission::from_cart(
            &cart,
            &form,
            &CurrencyCode::default(),
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "buyerName": "Ada",
                "buyerEmail": "ada@example.com",
                "shippingAddress": "1 Main St",
                "lineItems": [{"productId": "p2", "quantity": 3}],
                "currency": "USD"
            })
        );
    }
}
