//! Transaction records and the settlement lifecycle state machine.

use crate::{
    Currency, CustomerId, ExchangeDirection, Timestamp, TransactionId, TransactionNumber, UserId,
    VaultId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction status representing the lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Recorded, awaiting confirmation; no balance effect yet.
    Pending,
    /// Balances applied.
    Confirmed,
    /// Funds swept to the main vault.
    Approved,
    /// Abandoned; never had or no longer will have a balance effect.
    Cancelled,
}

impl TransactionStatus {
    /// Check if this is a final state.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Approved | TransactionStatus::Cancelled
        )
    }

    /// Get valid next states from the current state.
    pub fn valid_transitions(&self) -> &[TransactionStatus] {
        match self {
            TransactionStatus::Pending => {
                &[TransactionStatus::Confirmed, TransactionStatus::Cancelled]
            }
            TransactionStatus::Confirmed => {
                &[TransactionStatus::Approved, TransactionStatus::Cancelled]
            }
            TransactionStatus::Approved => &[],
            TransactionStatus::Cancelled => &[],
        }
    }

    /// Check if a transition to the given state is valid.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        self.valid_transitions().contains(&next)
    }
}

/// Where the money for a transfer comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferSource {
    /// A registered customer.
    Customer(CustomerId),
    /// A walk-in customer paying cash, identified by name only.
    Cash(String),
}

/// Type-specific transaction data.
///
/// Deposits and withdrawals act on a single vault and currency; transfers
/// carry the exchange details. Keeping these per-variant makes field
/// combinations that the workflow cannot settle unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TransactionKind {
    /// Cash paid into a vault.
    Deposit {
        /// Vault receiving the cash.
        vault_id: VaultId,
        /// Currency of the amount.
        currency: Currency,
    },
    /// Cash paid out of a vault.
    Withdrawal {
        /// Vault the cash leaves.
        vault_id: VaultId,
        /// Currency of the amount.
        currency: Currency,
    },
    /// A customer exchange credited to a destination vault.
    Transfer {
        /// Paying party.
        source: TransferSource,
        /// Vault credited on confirmation.
        to_vault: VaultId,
        /// Exchange direction; determines both currencies.
        direction: ExchangeDirection,
        /// Rate snapshot taken at creation: buy rate for normal
        /// transfers, sell rate for reverse.
        rate: Decimal,
        /// Profit/loss in AED, computed at creation against the quote
        /// then in force. Not revised when rates later move.
        profit_loss: Decimal,
    },
}

impl TransactionKind {
    /// Short name of the transaction type.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::Deposit { .. } => "deposit",
            TransactionKind::Withdrawal { .. } => "withdrawal",
            TransactionKind::Transfer { .. } => "transfer",
        }
    }

    /// Currency the transaction amount is denominated in.
    pub fn amount_currency(&self) -> Currency {
        match self {
            TransactionKind::Deposit { currency, .. }
            | TransactionKind::Withdrawal { currency, .. } => *currency,
            TransactionKind::Transfer { direction, .. } => direction.from_currency(),
        }
    }

    /// Check if this is a cross-currency transfer.
    pub fn is_exchange(&self) -> bool {
        matches!(self, TransactionKind::Transfer { .. })
    }
}

/// The unit of settlement work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Operator-assigned reference number, unique across all transactions.
    pub number: TransactionNumber,
    /// Type-specific data.
    pub kind: TransactionKind,
    /// Current lifecycle state.
    pub status: TransactionStatus,
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the transaction was recorded.
    pub created_at: Timestamp,
    /// Operator who recorded it.
    pub created_by: UserId,
    /// When the transaction was confirmed.
    pub confirmed_at: Option<Timestamp>,
    /// Operator who confirmed it.
    pub confirmed_by: Option<UserId>,
    /// When the transaction was approved.
    pub approved_at: Option<Timestamp>,
    /// Operator who approved it.
    pub approved_by: Option<UserId>,
}

impl Transaction {
    /// Record a new pending transaction.
    pub fn new(
        number: TransactionNumber,
        kind: TransactionKind,
        amount: Decimal,
        created_by: UserId,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            number,
            kind,
            status: TransactionStatus::Pending,
            amount,
            notes: None,
            created_at: crate::time::now(),
            created_by,
            confirmed_at: None,
            confirmed_by: None,
            approved_at: None,
            approved_by: None,
        }
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        if !notes.trim().is_empty() {
            self.notes = Some(notes);
        }
        self
    }

    /// Stamp the confirmation.
    pub fn mark_confirmed(&mut self, by: UserId) {
        self.status = TransactionStatus::Confirmed;
        self.confirmed_at = Some(crate::time::now());
        self.confirmed_by = Some(by);
    }

    /// Stamp the approval.
    pub fn mark_approved(&mut self, by: UserId) {
        self.status = TransactionStatus::Approved;
        self.approved_at = Some(crate::time::now());
        self.approved_by = Some(by);
    }

    /// Check if this transfer is eligible for the approval sweep.
    pub fn awaits_approval(&self) -> bool {
        self.status == TransactionStatus::Confirmed
            && matches!(
                self.kind,
                TransactionKind::Transfer {
                    direction: ExchangeDirection::Normal,
                    ..
                }
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn transfer_kind() -> TransactionKind {
        TransactionKind::Transfer {
            source: TransferSource::Cash("Ali".to_string()),
            to_vault: VaultId::new(),
            direction: ExchangeDirection::Normal,
            rate: dec!(200),
            profit_loss: Decimal::ZERO,
        }
    }

    #[test]
    fn test_status_transitions() {
        assert!(TransactionStatus::Pending.can_transition_to(TransactionStatus::Confirmed));
        assert!(TransactionStatus::Pending.can_transition_to(TransactionStatus::Cancelled));
        assert!(TransactionStatus::Confirmed.can_transition_to(TransactionStatus::Approved));
        assert!(!TransactionStatus::Pending.can_transition_to(TransactionStatus::Approved));
    }

    #[test]
    fn test_final_states() {
        assert!(TransactionStatus::Approved.is_final());
        assert!(TransactionStatus::Cancelled.is_final());
        assert!(!TransactionStatus::Pending.is_final());
        assert!(!TransactionStatus::Confirmed.is_final());
        assert!(TransactionStatus::Approved.valid_transitions().is_empty());
        assert!(TransactionStatus::Cancelled.valid_transitions().is_empty());
    }

    #[test]
    fn test_new_transaction_is_pending() {
        let tx = Transaction::new(
            TransactionNumber::new("TX-001"),
            transfer_kind(),
            dec!(500),
            UserId::new(),
        );

        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.confirmed_at.is_none());
        assert!(tx.approved_at.is_none());
    }

    #[test]
    fn test_awaits_approval_only_for_normal_transfers() {
        let mut tx = Transaction::new(
            TransactionNumber::new("TX-002"),
            transfer_kind(),
            dec!(500),
            UserId::new(),
        );
        assert!(!tx.awaits_approval());

        tx.mark_confirmed(UserId::new());
        assert!(tx.awaits_approval());

        let mut reverse = Transaction::new(
            TransactionNumber::new("TX-003"),
            TransactionKind::Transfer {
                source: TransferSource::Cash("Ali".to_string()),
                to_vault: VaultId::new(),
                direction: ExchangeDirection::Reverse,
                rate: dec!(202),
                profit_loss: Decimal::ZERO,
            },
            dec!(1000),
            UserId::new(),
        );
        reverse.mark_confirmed(UserId::new());
        assert!(!reverse.awaits_approval());
    }

    #[test]
    fn test_blank_notes_dropped() {
        let tx = Transaction::new(
            TransactionNumber::new("TX-004"),
            transfer_kind(),
            dec!(10),
            UserId::new(),
        )
        .with_notes("   ");
        assert!(tx.notes.is_none());
    }
}
