//! Currency and balance types for the Sarraf back office.
//!
//! The exchange operates on exactly two currencies: the Sudanese pound
//! (SDG) and the UAE dirham (AED). Rates are always quoted as SDG per
//! 1 AED.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two currencies handled by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Sudanese pound.
    Sdg,
    /// UAE dirham.
    Aed,
}

impl Currency {
    /// ISO 4217 currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Sdg => "SDG",
            Currency::Aed => "AED",
        }
    }

    /// The other currency of the pair.
    pub fn opposite(&self) -> Currency {
        match self {
            Currency::Sdg => Currency::Aed,
            Currency::Aed => Currency::Sdg,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Direction of a currency exchange transfer.
///
/// Direction alone determines the currencies involved; callers never pick
/// currencies independently of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeDirection {
    /// AED in, SDG out: the customer sells dirhams.
    Normal,
    /// SDG in, AED out: the customer buys dirhams.
    Reverse,
}

impl ExchangeDirection {
    /// Currency the customer pays in.
    pub fn from_currency(&self) -> Currency {
        match self {
            ExchangeDirection::Normal => Currency::Aed,
            ExchangeDirection::Reverse => Currency::Sdg,
        }
    }

    /// Currency credited to the destination vault.
    pub fn to_currency(&self) -> Currency {
        self.from_currency().opposite()
    }
}

impl fmt::Display for ExchangeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeDirection::Normal => write!(f, "normal"),
            ExchangeDirection::Reverse => write!(f, "reverse"),
        }
    }
}

/// A pair of per-currency balances held by a vault or customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    /// Balance in Sudanese pounds.
    pub sdg: Decimal,
    /// Balance in UAE dirhams.
    pub aed: Decimal,
}

impl Balances {
    /// Create a balance pair.
    pub fn new(sdg: Decimal, aed: Decimal) -> Self {
        Self { sdg, aed }
    }

    /// Zero balances in both currencies.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Get the balance in the given currency.
    pub fn get(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Sdg => self.sdg,
            Currency::Aed => self.aed,
        }
    }

    /// Increase the balance in the given currency.
    pub fn credit(&mut self, currency: Currency, amount: Decimal) {
        match currency {
            Currency::Sdg => self.sdg += amount,
            Currency::Aed => self.aed += amount,
        }
    }

    /// Decrease the balance in the given currency.
    ///
    /// Callers are expected to check [`Balances::covers`] first; the
    /// settlement workflow rejects debits that would go negative.
    pub fn debit(&mut self, currency: Currency, amount: Decimal) {
        match currency {
            Currency::Sdg => self.sdg -= amount,
            Currency::Aed => self.aed -= amount,
        }
    }

    /// Check whether the balance in the given currency covers an amount.
    pub fn covers(&self, currency: Currency, amount: Decimal) -> bool {
        self.get(currency) >= amount
    }
}

impl fmt::Display for Balances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SDG / {} AED", self.sdg, self.aed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_direction_currencies() {
        assert_eq!(ExchangeDirection::Normal.from_currency(), Currency::Aed);
        assert_eq!(ExchangeDirection::Normal.to_currency(), Currency::Sdg);
        assert_eq!(ExchangeDirection::Reverse.from_currency(), Currency::Sdg);
        assert_eq!(ExchangeDirection::Reverse.to_currency(), Currency::Aed);
    }

    #[test]
    fn test_balances_credit_debit() {
        let mut balances = Balances::zero();
        balances.credit(Currency::Sdg, dec!(1000));
        balances.credit(Currency::Aed, dec!(50));
        balances.debit(Currency::Sdg, dec!(400));

        assert_eq!(balances.get(Currency::Sdg), dec!(600));
        assert_eq!(balances.get(Currency::Aed), dec!(50));
    }

    #[test]
    fn test_balances_covers() {
        let balances = Balances::new(dec!(100), dec!(10));
        assert!(balances.covers(Currency::Sdg, dec!(100)));
        assert!(!balances.covers(Currency::Sdg, dec!(100.01)));
        assert!(balances.covers(Currency::Aed, dec!(5)));
    }
}
