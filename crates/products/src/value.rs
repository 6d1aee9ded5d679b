//! Validated product field types.
//!
//! Form input arrives as free text. These types are the boundary where that
//! text becomes a name, a price or a quantity; anything that does not parse
//! cleanly is rejected with [`DomainError::Validation`] instead of being
//! stored half-parsed.

use serde::{Deserialize, Serialize};

use dioca_core::{DomainError, DomainResult, ValueObject};

/// Product name: trimmed and never blank.
///
/// Names compare case-insensitively inside the catalog via [`ProductName::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `raw` names the same product once both are trimmed and
    /// lower-cased.
    pub fn matches(&self, raw: &str) -> bool {
        normalize(&self.0) == normalize(raw)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl ValueObject for ProductName {}

impl core::fmt::Display for ProductName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

/// Unit price: a finite, non-negative amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        // -0.0 passes the sign check above; store it as plain zero.
        let value = if value == 0.0 { 0.0 } else { value };
        Ok(Self(value))
    }

    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("price is required"));
        }
        let value: f64 = trimmed.parse().map_err(|_| {
            DomainError::validation(format!("price must be a number, got \"{trimmed}\""))
        })?;
        Self::new(value)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Shortest text that parses back to the same price (`50`, `12.5`).
    ///
    /// Used to populate the edit form; cards use the two-decimal `Display`.
    pub fn form_text(&self) -> String {
        self.0.to_string()
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Units in stock. Never negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("quantity is required"));
        }
        match trimmed.parse::<u32>() {
            Ok(value) => Ok(Self(value)),
            Err(_) if trimmed.parse::<i64>().is_ok_and(|v| v < 0) => {
                Err(DomainError::validation("quantity cannot be negative"))
            }
            Err(_) if trimmed.bytes().all(|b| b.is_ascii_digit()) => {
                Err(DomainError::validation("quantity is too large"))
            }
            Err(_) => Err(DomainError::validation(format!(
                "quantity must be a whole number, got \"{trimmed}\""
            ))),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn checked_add(self, other: Quantity) -> DomainResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| DomainError::validation("quantity is too large"))
    }

    /// One unit less, or `None` when nothing is left.
    pub fn decrement(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    pub fn form_text(&self) -> String {
        self.0.to_string()
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: DomainError) -> String {
        match err {
            DomainError::Validation(msg) => msg,
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn name_is_trimmed() {
        let name = ProductName::parse("  Rice ").unwrap();
        assert_eq!(name.as_str(), "Rice");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            reason(ProductName::parse("   ").unwrap_err()),
            "product name cannot be empty"
        );
    }

    #[test]
    fn names_match_case_insensitively() {
        let name = ProductName::parse("Brown Rice").unwrap();
        assert!(name.matches("  brown RICE "));
        assert!(!name.matches("brown rice 2"));
    }

    #[test]
    fn price_parses_decimal_text() {
        assert_eq!(Price::parse(" 12.5 ").unwrap().amount(), 12.5);
        assert_eq!(Price::parse("50").unwrap().amount(), 50.0);
    }

    #[test]
    fn price_rejects_garbage_and_non_finite_values() {
        assert_eq!(reason(Price::parse("").unwrap_err()), "price is required");
        assert_eq!(
            reason(Price::parse("abc").unwrap_err()),
            "price must be a number, got \"abc\""
        );
        assert_eq!(
            reason(Price::parse("NaN").unwrap_err()),
            "price must be a finite number"
        );
        assert_eq!(
            reason(Price::parse("inf").unwrap_err()),
            "price must be a finite number"
        );
        assert_eq!(
            reason(Price::parse("-1").unwrap_err()),
            "price cannot be negative"
        );
    }

    #[test]
    fn negative_zero_price_is_stored_as_zero() {
        let price = Price::parse("-0").unwrap();
        assert_eq!(price.form_text(), "0");
    }

    #[test]
    fn price_display_uses_two_decimals_and_form_text_is_shortest() {
        let price = Price::parse("50").unwrap();
        assert_eq!(price.to_string(), "50.00");
        assert_eq!(price.form_text(), "50");
        assert_eq!(Price::parse("12.5").unwrap().form_text(), "12.5");
    }

    #[test]
    fn quantity_parse_rejects_non_integers() {
        assert_eq!(Quantity::parse("10").unwrap().get(), 10);
        assert_eq!(reason(Quantity::parse(" ").unwrap_err()), "quantity is required");
        assert_eq!(
            reason(Quantity::parse("-3").unwrap_err()),
            "quantity cannot be negative"
        );
        assert_eq!(
            reason(Quantity::parse("2.5").unwrap_err()),
            "quantity must be a whole number, got \"2.5\""
        );
        assert_eq!(
            reason(Quantity::parse("10abc").unwrap_err()),
            "quantity must be a whole number, got \"10abc\""
        );
    }

    #[test]
    fn oversized_quantity_is_too_large_at_any_length() {
        for raw in ["4294967296", "340282366920938463463374607431768211456000"] {
            assert_eq!(reason(Quantity::parse(raw).unwrap_err()), "quantity is too large");
        }
    }

    #[test]
    fn quantity_arithmetic_is_checked() {
        let q = Quantity::new(10);
        assert_eq!(q.checked_add(Quantity::new(5)).unwrap(), Quantity::new(15));
        assert!(Quantity::new(u32::MAX).checked_add(Quantity::new(1)).is_err());
        assert_eq!(Quantity::new(1).decrement(), Some(Quantity::ZERO));
        assert_eq!(Quantity::ZERO.decrement(), None);
    }

    #[test]
    fn deserializing_invalid_values_fails() {
        assert!(serde_json::from_str::<ProductName>("\"  \"").is_err());
        assert!(serde_json::from_str::<Price>("-2.0").is_err());
        assert_eq!(serde_json::from_str::<Price>("2.5").unwrap().amount(), 2.5);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any negative integer is rejected as a quantity.
            #[test]
            fn negative_quantities_are_rejected(value in i64::MIN..0i64) {
                let err = Quantity::parse(&value.to_string()).unwrap_err();
                prop_assert_eq!(err, DomainError::validation("quantity cannot be negative"));
            }

            /// Property: surrounding whitespace never changes the parsed name.
            #[test]
            fn name_ignores_surrounding_whitespace(
                name in "[A-Za-z][A-Za-z0-9 ]{0,30}[A-Za-z0-9]",
                left in " {0,3}",
                right in " {0,3}",
            ) {
                let padded = format!("{left}{name}{right}");
                let parsed = ProductName::parse(&padded).unwrap();
                prop_assert_eq!(parsed.as_str(), name.as_str());
            }
        }
    }
}
