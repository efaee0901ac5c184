//! Inputs for recording a new transaction.

use rust_decimal::Decimal;
use sarraf_common::{
    Currency, ExchangeDirection, TransactionNumber, TransferSource, VaultId,
};

/// Input for [`crate::SettlementWorkflow::create`].
///
/// Mirrors the per-type shape of the stored record: deposits and
/// withdrawals name a vault and currency, transfers name a paying party,
/// a destination vault and a direction. Currencies of a transfer are
/// never supplied; the direction determines them.
#[derive(Debug, Clone)]
pub enum NewTransaction {
    /// Cash paid into a vault.
    Deposit {
        number: TransactionNumber,
        amount: Decimal,
        vault_id: VaultId,
        currency: Currency,
        notes: Option<String>,
    },
    /// Cash paid out of a vault.
    Withdrawal {
        number: TransactionNumber,
        amount: Decimal,
        vault_id: VaultId,
        currency: Currency,
        notes: Option<String>,
    },
    /// A customer exchange credited to a destination vault.
    Transfer {
        number: TransactionNumber,
        amount: Decimal,
        source: TransferSource,
        to_vault: VaultId,
        direction: ExchangeDirection,
        notes: Option<String>,
    },
}

impl NewTransaction {
    /// Build a deposit input.
    pub fn deposit(
        number: impl Into<TransactionNumber>,
        vault_id: VaultId,
        currency: Currency,
        amount: Decimal,
    ) -> Self {
        Self::Deposit {
            number: number.into(),
            amount,
            vault_id,
            currency,
            notes: None,
        }
    }

    /// Build a withdrawal input.
    pub fn withdrawal(
        number: impl Into<TransactionNumber>,
        vault_id: VaultId,
        currency: Currency,
        amount: Decimal,
    ) -> Self {
        Self::Withdrawal {
            number: number.into(),
            amount,
            vault_id,
            currency,
            notes: None,
        }
    }

    /// Build a transfer input.
    pub fn transfer(
        number: impl Into<TransactionNumber>,
        source: TransferSource,
        to_vault: VaultId,
        direction: ExchangeDirection,
        amount: Decimal,
    ) -> Self {
        Self::Transfer {
            number: number.into(),
            amount,
            source,
            to_vault,
            direction,
            notes: None,
        }
    }

    /// Attach notes.
    pub fn with_notes(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        match &mut self {
            Self::Deposit { notes, .. }
            | Self::Withdrawal { notes, .. }
            | Self::Transfer { notes, .. } => *notes = Some(text),
        }
        self
    }

    /// The operator-assigned number.
    pub fn number(&self) -> &TransactionNumber {
        match self {
            Self::Deposit { number, .. }
            | Self::Withdrawal { number, .. }
            | Self::Transfer { number, .. } => number,
        }
    }

    /// The amount in the source currency.
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Deposit { amount, .. }
            | Self::Withdrawal { amount, .. }
            | Self::Transfer { amount, .. } => *amount,
        }
    }
}
