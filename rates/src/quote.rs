//! The current buy/sell rate pair.

use rust_decimal::Decimal;
use sarraf_common::ExchangeDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A buy/sell quote, SDG per 1 AED.
///
/// `buy` is the rate the exchange pays when buying AED; `sell` is the
/// rate it charges when selling AED. A zero quote stands in when no rate
/// has been recorded yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    /// Buy rate.
    pub buy: Decimal,
    /// Sell rate.
    pub sell: Decimal,
}

impl RateQuote {
    /// Create a quote.
    pub fn new(buy: Decimal, sell: Decimal) -> Self {
        Self { buy, sell }
    }

    /// The zero quote used when no rate is recorded.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Check whether no rate is recorded.
    pub fn is_zero(&self) -> bool {
        self.buy.is_zero() && self.sell.is_zero()
    }

    /// The buy/sell spread.
    pub fn spread(&self) -> Decimal {
        self.sell - self.buy
    }

    /// The rate side a transfer snapshots at creation: buy for normal
    /// transfers, sell for reverse.
    pub fn side(&self, direction: ExchangeDirection) -> Decimal {
        match direction {
            ExchangeDirection::Normal => self.buy,
            ExchangeDirection::Reverse => self.sell,
        }
    }
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buy {} / sell {}", self.buy, self.sell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_by_direction() {
        let quote = RateQuote::new(dec!(200), dec!(202));
        assert_eq!(quote.side(ExchangeDirection::Normal), dec!(200));
        assert_eq!(quote.side(ExchangeDirection::Reverse), dec!(202));
    }

    #[test]
    fn test_zero_quote() {
        assert!(RateQuote::zero().is_zero());
        assert!(!RateQuote::new(dec!(200), dec!(202)).is_zero());
    }

    #[test]
    fn test_spread() {
        assert_eq!(RateQuote::new(dec!(200), dec!(202)).spread(), dec!(2));
    }
}
