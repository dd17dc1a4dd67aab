//! Buyer details entered at checkout.

use serde::{Deserialize, Serialize};

/// A field of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuyerField {
    Name,
    Email,
    ShippingAddress,
}

impl BuyerField {
    /// Form fields in display order.
    pub const ALL: [BuyerField; 3] = [
        BuyerField::Name,
        BuyerField::Email,
        BuyerField::ShippingAddress,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BuyerField::Name => "full name",
            BuyerField::Email => "email",
            BuyerField::ShippingAddress => "shipping address",
        }
    }
}

/// The checkout form as the shopper typed it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerForm {
    pub name: String,
    pub email: String,
    pub shipping_address: String,
}

impl BuyerForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        shipping_address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            shipping_address: shipping_address.into(),
        }
    }

    pub fn get(&self, field: BuyerField) -> &str {
        match field {
            BuyerField::Name => &self.name,
            BuyerField::Email => &self.email,
            BuyerField::ShippingAddress => &self.shipping_address,
        }
    }

    pub fn set(&mut self, field: BuyerField, value: impl Into<String>) {
        let slot = match field {
            BuyerField::Name => &mut self.name,
            BuyerField::Email => &mut self.email,
            BuyerField::ShippingAddress => &mut self.shipping_address,
        };
        *slot = value.into();
    }

    /// Fields that are empty or whitespace only, in display order.
    pub fn missing_fields(&self) -> Vec<BuyerField> {
        BuyerField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
