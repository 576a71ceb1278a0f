//! Type-safe price representation using decimal arithmetic.
//!
//! Cart totals are always truncated toward negative infinity at two decimal
//! places, so a total never rounds up and overcharges the customer.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places kept in a displayed or charged amount.
pub const CENT_DECIMAL_PLACES: u32 = 2;

/// Truncate an amount to whole cents (`floor(amount * 100) / 100`).
///
/// ```
/// use greencart_core::truncate_to_cents;
/// use rust_decimal::Decimal;
///
/// let amount = Decimal::new(9999, 3); // 9.999
/// assert_eq!(truncate_to_cents(amount), Decimal::new(999, 2));
/// ```
#[must_use]
pub fn truncate_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_DECIMAL_PLACES, RoundingStrategy::ToNegativeInfinity)
}

/// A cart or line amount, already truncated to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, truncating the amount to cents.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(truncate_to_cents(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format with a currency symbol prefix (e.g. `$19.90`).
    #[must_use]
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}
