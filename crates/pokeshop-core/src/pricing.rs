//! Price assignment for imported catalog items.

use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Largest value a `NUMERIC(6,2)` price column can hold.
pub const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: Decimal },
    #[error("{field} exceeds the maximum price of {max} (got {value})", max = MAX_PRICE)]
    TooLarge { field: &'static str, value: Decimal },
    #[error("min_price ({min}) is greater than max_price ({max})")]
    InvertedRange { min: Decimal, max: Decimal },
}

/// How the importer prices each item.
///
/// With `use_random_price` unset every item gets `default_price`; otherwise
/// each item draws a cent-granular price uniformly from
/// `min_price..=max_price`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    default_price: Decimal,
    min_price: Decimal,
    max_price: Decimal,
    use_random_price: bool,
}

impl PricingConfig {
    /// Validates and builds a pricing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if any price is negative or above
    /// [`MAX_PRICE`], or if `min_price > max_price`.
    pub fn new(
        default_price: Decimal,
        min_price: Decimal,
        max_price: Decimal,
        use_random_price: bool,
    ) -> Result<Self, PricingError> {
        for (field, value) in [
            ("default_price", default_price),
            ("min_price", min_price),
            ("max_price", max_price),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(PricingError::Negative { field, value });
            }
            if value > MAX_PRICE {
                return Err(PricingError::TooLarge { field, value });
            }
        }
        if min_price > max_price {
            return Err(PricingError::InvertedRange {
                min: min_price,
                max: max_price,
            });
        }

        Ok(Self {
            default_price,
            min_price,
            max_price,
            use_random_price,
        })
    }

    #[must_use]
    pub fn use_random_price(&self) -> bool {
        self.use_random_price
    }

    /// Returns the price for the next item, always with exactly two decimal
    /// places.
    pub fn next_price<R: Rng>(&self, rng: &mut R) -> Decimal {
        if !self.use_random_price {
            return to_cents_scale(self.default_price, RoundingStrategy::MidpointAwayFromZero);
        }

        let low = cents(self.min_price, RoundingStrategy::ToPositiveInfinity);
        let high = cents(self.max_price, RoundingStrategy::ToNegativeInfinity);
        // A range narrower than one cent with no whole cent inside it.
        if low > high {
            return to_cents_scale(self.min_price, RoundingStrategy::MidpointAwayFromZero);
        }
        Decimal::new(rng.random_range(low..=high), 2)
    }
}

fn to_cents_scale(value: Decimal, strategy: RoundingStrategy) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, strategy);
    rounded.rescale(2);
    rounded
}

fn cents(value: Decimal, strategy: RoundingStrategy) -> i64 {
    let rounded = to_cents_scale(value, strategy);
    // Scale is fixed at 2 and the value is bounded by MAX_PRICE, so the
    // mantissa always fits.
    i64::try_from(rounded.mantissa()).unwrap_or(i64::MAX)
}
