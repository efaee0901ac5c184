//! Operator, vault, customer and exchange-rate records.

use crate::{Balances, CustomerId, RateId, Timestamp, UserId, VaultId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Role of an operator account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including settings and rate updates.
    Admin,
    /// Can create and settle transactions.
    Accountant,
    /// Read-only access.
    Viewer,
}

/// An operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Access role.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: Timestamp,
}

impl User {
    /// Create a new operator account.
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            role,
            created_at: crate::time::now(),
        }
    }
}

/// A cash vault holding balances in both currencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vault {
    /// Unique identifier.
    pub id: VaultId,
    /// Display name.
    pub name: String,
    /// Current balances.
    pub balances: Balances,
    /// Balances at creation time.
    pub initial_balances: Balances,
    /// Free-text description.
    pub description: Option<String>,
    /// Whether this is the main vault that approved transfers sweep into.
    /// At most one vault carries this flag; the vault registry enforces it.
    pub is_main: bool,
    /// When the vault was created.
    pub created_at: Timestamp,
}

impl Vault {
    /// Create a new vault with its opening balances.
    pub fn new(name: impl Into<String>, initial_balances: Balances) -> Self {
        Self {
            id: VaultId::new(),
            name: name.into(),
            balances: initial_balances,
            initial_balances,
            description: None,
            is_main: false,
            created_at: crate::time::now(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark as the main vault.
    pub fn as_main(mut self) -> Self {
        self.is_main = true;
        self
    }
}

/// A counterparty with optional contact details and running balances.
///
/// Customer balances are set by operators and reported on; the settlement
/// workflow does not debit or credit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// External account number, if any.
    pub account_number: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Running balances.
    pub balances: Balances,
    /// Whether this is a recurring customer.
    pub is_recurring: bool,
    /// Whether the customer holds a Banak bank account.
    pub has_banak_account: bool,
    /// When the customer was registered.
    pub created_at: Timestamp,
}

impl Customer {
    /// Register a new customer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            account_number: None,
            phone: None,
            email: None,
            balances: Balances::zero(),
            is_recurring: false,
            has_banak_account: false,
            created_at: crate::time::now(),
        }
    }
}

/// A versioned buy/sell exchange-rate quote, SDG per 1 AED.
///
/// Rate records are append-only; the most recent record is the current
/// quote and history is never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Unique identifier.
    pub id: RateId,
    /// Rate applied when the exchange buys AED.
    pub buy_rate: Decimal,
    /// Rate applied when the exchange sells AED. Strictly above `buy_rate`.
    pub sell_rate: Decimal,
    /// When this quote was recorded.
    pub updated_at: Timestamp,
    /// Operator who recorded it.
    pub updated_by: UserId,
}

impl ExchangeRate {
    /// Record a new quote.
    pub fn new(buy_rate: Decimal, sell_rate: Decimal, updated_by: UserId) -> Self {
        Self {
            id: RateId::new(),
            buy_rate,
            sell_rate,
            updated_at: crate::time::now(),
            updated_by,
        }
    }

    /// The buy/sell spread.
    pub fn spread(&self) -> Decimal {
        self.sell_rate - self.buy_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_vault_builder() {
        let vault = Vault::new("Branch", Balances::new(dec!(500), dec!(20)))
            .with_description("Branch till")
            .as_main();

        assert!(vault.is_main);
        assert_eq!(vault.balances, vault.initial_balances);
        assert_eq!(vault.description.as_deref(), Some("Branch till"));
    }

    #[test]
    fn test_rate_spread() {
        let rate = ExchangeRate::new(dec!(200), dec!(202), UserId::new());
        assert_eq!(rate.spread(), dec!(2));
    }
}
