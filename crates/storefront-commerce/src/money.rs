//! Monetary values in integer minor units.
//!
//! Prices and totals are whole numbers in the currency's smallest unit
//! (cents for EUR/USD). Formatting for display is the pure [`format_price`]
//! function; nothing in the cart stores a formatted or fractional amount.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency code as reported by the catalog service (e.g. "EUR").
///
/// Codes are normalized to upper case. Unknown codes are carried through
/// untouched; they only lose their display symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code, normalizing to upper case.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Get the code (e.g., "EUR").
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the display symbol, if the currency is a known one.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "USD" => Some("$"),
            "EUR" => Some("\u{20ac}"),
            "GBP" => Some("\u{00a3}"),
            "JPY" => Some("\u{00a5}"),
            "CAD" => Some("CA$"),
            "AUD" => Some("A$"),
            "CHF" => Some("CHF"),
            "CNY" => Some("\u{00a5}"),
            "INR" => Some("\u{20b9}"),
            "MXN" => Some("MX$"),
            _ => None,
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self.0.as_str() {
            "JPY" => 0,
            _ => 2,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("EUR")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A monetary amount with its currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor_units: i64,
    /// The currency.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor_units: i64, currency: CurrencyCode) -> Self {
        Self {
            amount_minor_units,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: CurrencyCode) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor_units == 0
    }

    /// Add another amount, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_minor_units
                .saturating_add(other.amount_minor_units),
            self.currency.clone(),
        ))
    }

    /// Multiply by a quantity.
    pub fn times(&self, quantity: i64) -> Money {
        Money::new(
            self.amount_minor_units.saturating_mul(quantity),
            self.currency.clone(),
        )
    }

    /// Format for display (e.g., "€49.99").
    pub fn display(&self) -> String {
        format_price(self.amount_minor_units, &self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format an amount in minor units for display.
///
/// Known currencies get their symbol as a prefix (`€19.99`); unknown ones get
/// the code as a suffix (`19.99 XYZ`). Uses integer arithmetic only.
pub fn format_price(amount_minor_units: i64, currency: &CurrencyCode) -> String {
    let places = currency.decimal_places();
    let sign = if amount_minor_units < 0 { "-" } else { "" };
    let abs = amount_minor_units.unsigned_abs();

    let number = if places == 0 {
        abs.to_string()
    } else {
        let divisor = 10_u64.pow(places);
        format!(
            "{}.{:0width$}",
            abs / divisor,
            abs % divisor,
            width = places as usize
        )
    };

    match currency.symbol() {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{number} {currency}"),
    }
}
