// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary rounding.
//!
//! All commission amounts are expressed in a currency with two minor-unit
//! digits. Rounding is round-half-to-even (banker's rounding), applied
//! once when an amount is computed and never re-applied retroactively.

use crate::error::DomainError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Number of minor-unit digits in the commission currency.
pub const MINOR_UNIT_DIGITS: u32 = 2;

/// Rounds an amount to the currency's minor-unit precision.
///
/// Uses round-half-to-even: 0.005 rounds to 0.00, 0.015 rounds to 0.02.
#[must_use]
pub fn round_to_minor_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::MidpointNearestEven)
}

/// Parses a monetary amount from its stored decimal string form.
///
/// # Errors
///
/// Returns `DomainError::AmountParseError` if the string is not a valid
/// decimal number.
pub fn parse_amount(s: &str) -> Result<Decimal, DomainError> {
    Decimal::from_str(s).map_err(|_| DomainError::AmountParseError {
        amount_string: s.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_to_even_down() {
        let amount: Decimal = Decimal::new(100005, 3); // 100.005
        assert_eq!(round_to_minor_units(amount), Decimal::new(10000, 2));
    }

    #[test]
    fn test_round_half_to_even_up() {
        let amount: Decimal = Decimal::new(15, 3); // 0.015
        assert_eq!(round_to_minor_units(amount), Decimal::new(2, 2));
    }

    #[test]
    fn test_round_no_op_on_exact_cents() {
        let amount: Decimal = Decimal::new(123456, 2); // 1234.56
        assert_eq!(round_to_minor_units(amount), amount);
    }

    #[test]
    fn test_parse_amount_round_trip() {
        let amount: Decimal = parse_amount("15000.00").unwrap();
        assert_eq!(amount, Decimal::new(1500000, 2));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("fifteen").is_err());
    }
}
