//! The settlement workflow state machine.

use crate::conversion::converted_amount;
use crate::input::NewTransaction;
use crate::profit;
use rust_decimal::Decimal;
use sarraf_common::{
    ExchangeDirection, Result, SarrafError, Transaction, TransactionId, TransactionKind,
    TransactionStatus, TransferSource, UserId,
};
use sarraf_rates::RateService;
use sarraf_store::Store;
use std::sync::Arc;
use tracing::{debug, info};

/// Drives transactions through their lifecycle.
///
/// The workflow holds no state of its own: every operation re-reads the
/// collections it needs, validates, mutates in memory and commits the
/// touched collections as one batch. Failures abort before any write.
#[derive(Clone)]
pub struct SettlementWorkflow {
    store: Arc<Store>,
    rates: RateService,
}

impl SettlementWorkflow {
    /// Create a workflow over a store.
    pub fn new(store: Arc<Store>) -> Self {
        let rates = RateService::new(store.clone());
        Self { store, rates }
    }

    /// The rate service the workflow snapshots from.
    pub fn rates(&self) -> &RateService {
        &self.rates
    }

    /// All transactions, most recent first.
    pub fn list(&self) -> Result<Vec<Transaction>> {
        self.store.transactions()
    }

    /// Look up a transaction by id.
    pub fn get(&self, id: TransactionId) -> Result<Transaction> {
        self.store
            .transactions()?
            .into_iter()
            .find(|tx| tx.id == id)
            .ok_or(SarrafError::TransactionNotFound(id))
    }

    /// Record a new pending transaction.
    ///
    /// Transfers snapshot the current rate (buy side for normal, sell
    /// side for reverse) and store their profit/loss against the quote
    /// in force now; later rate changes do not revise either.
    pub fn create(&self, input: NewTransaction, actor: UserId) -> Result<Transaction> {
        let number = input.number().clone();
        if !number.is_valid() {
            return Err(SarrafError::InvalidTransactionNumber);
        }

        let mut transactions = self.store.transactions()?;
        if transactions.iter().any(|tx| tx.number == number) {
            return Err(SarrafError::DuplicateTransactionNumber(
                number.as_str().to_string(),
            ));
        }

        let amount = input.amount();
        if amount <= Decimal::ZERO {
            return Err(SarrafError::InvalidAmount(amount));
        }

        let vaults = self.store.vaults()?;
        let (kind, notes) = match input {
            NewTransaction::Deposit {
                vault_id,
                currency,
                notes,
                ..
            } => {
                if !vaults.iter().any(|vault| vault.id == vault_id) {
                    return Err(SarrafError::VaultNotFound(vault_id));
                }
                (TransactionKind::Deposit { vault_id, currency }, notes)
            }
            NewTransaction::Withdrawal {
                vault_id,
                currency,
                notes,
                ..
            } => {
                if !vaults.iter().any(|vault| vault.id == vault_id) {
                    return Err(SarrafError::VaultNotFound(vault_id));
                }
                (TransactionKind::Withdrawal { vault_id, currency }, notes)
            }
            NewTransaction::Transfer {
                source,
                to_vault,
                direction,
                notes,
                ..
            } => {
                match &source {
                    TransferSource::Cash(name) => {
                        if name.trim().is_empty() {
                            return Err(SarrafError::MissingSource);
                        }
                    }
                    TransferSource::Customer(customer_id) => {
                        let customers = self.store.customers()?;
                        if !customers.iter().any(|customer| customer.id == *customer_id) {
                            return Err(SarrafError::MissingSource);
                        }
                    }
                }
                if !vaults.iter().any(|vault| vault.id == to_vault) {
                    return Err(SarrafError::MissingDestination);
                }

                let quote = self.rates.current()?;
                let rate = quote.side(direction);
                let profit_loss = profit::profit_loss(amount, direction, rate, &quote);

                (
                    TransactionKind::Transfer {
                        source,
                        to_vault,
                        direction,
                        rate,
                        profit_loss,
                    },
                    notes,
                )
            }
        };

        let mut tx = Transaction::new(number, kind, amount, actor);
        if let Some(notes) = notes {
            tx = tx.with_notes(notes);
        }

        transactions.insert(0, tx.clone());
        self.store.save_transactions(&transactions)?;

        info!(
            tx_id = %tx.id,
            number = %tx.number,
            kind = tx.kind.name(),
            amount = %tx.amount,
            "Recorded transaction"
        );

        Ok(tx)
    }

    /// Confirm a pending transaction, applying its balance effect.
    ///
    /// Deposits credit their vault; withdrawals debit it after an
    /// insufficient-funds check; transfers credit the destination vault
    /// with the converted amount and debit nothing, since the paying
    /// party settles in cash outside the tracked vaults. Calling this on
    /// a non-pending transaction is a no-op.
    pub fn confirm(&self, id: TransactionId, actor: UserId) -> Result<Transaction> {
        let mut transactions = self.store.transactions()?;
        let index = transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or(SarrafError::TransactionNotFound(id))?;

        let tx = transactions[index].clone();
        if tx.status != TransactionStatus::Pending {
            debug!(tx_id = %id, status = ?tx.status, "Confirm skipped, not pending");
            return Ok(tx);
        }

        let mut vaults = self.store.vaults()?;
        match &tx.kind {
            TransactionKind::Deposit { vault_id, currency } => {
                let vault = vaults
                    .iter_mut()
                    .find(|vault| vault.id == *vault_id)
                    .ok_or(SarrafError::VaultNotFound(*vault_id))?;
                vault.balances.credit(*currency, tx.amount);
            }
            TransactionKind::Withdrawal { vault_id, currency } => {
                let vault = vaults
                    .iter_mut()
                    .find(|vault| vault.id == *vault_id)
                    .ok_or(SarrafError::VaultNotFound(*vault_id))?;
                if !vault.balances.covers(*currency, tx.amount) {
                    return Err(SarrafError::InsufficientFunds {
                        required: tx.amount,
                        available: vault.balances.get(*currency),
                    });
                }
                vault.balances.debit(*currency, tx.amount);
            }
            TransactionKind::Transfer {
                to_vault,
                direction,
                rate,
                ..
            } => {
                let credited = converted_amount(tx.amount, *direction, *rate);
                let vault = vaults
                    .iter_mut()
                    .find(|vault| vault.id == *to_vault)
                    .ok_or(SarrafError::RecipientAccountNotFound(*to_vault))?;
                vault.balances.credit(direction.to_currency(), credited);
            }
        }

        let mut updated = tx;
        updated.mark_confirmed(actor);
        transactions[index] = updated.clone();

        let mut batch = self.store.batch();
        batch.vaults(&vaults)?;
        batch.transactions(&transactions)?;
        self.store.commit(batch)?;

        info!(
            tx_id = %updated.id,
            number = %updated.number,
            confirmed_by = %actor,
            "Confirmed transaction"
        );

        Ok(updated)
    }

    /// Approve a confirmed normal-direction transfer, sweeping its
    /// credited amount from the destination vault into the main vault.
    ///
    /// The sweep stays in the destination currency; no second conversion
    /// is applied. Calling this on anything other than a confirmed
    /// normal-direction transfer is a no-op.
    pub fn approve(&self, id: TransactionId, actor: UserId) -> Result<Transaction> {
        let mut transactions = self.store.transactions()?;
        let index = transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or(SarrafError::TransactionNotFound(id))?;

        let tx = transactions[index].clone();
        if tx.status != TransactionStatus::Confirmed {
            debug!(tx_id = %id, status = ?tx.status, "Approve skipped, not confirmed");
            return Ok(tx);
        }

        let (to_vault, direction, rate) = match &tx.kind {
            TransactionKind::Transfer {
                to_vault,
                direction,
                rate,
                ..
            } if *direction == ExchangeDirection::Normal => (*to_vault, *direction, *rate),
            _ => {
                debug!(tx_id = %id, "Approve skipped, not an eligible transfer");
                return Ok(tx);
            }
        };

        let mut vaults = self.store.vaults()?;
        let main_index = vaults
            .iter()
            .position(|vault| vault.is_main)
            .ok_or(SarrafError::NoMainVault)?;
        let recipient_index = vaults
            .iter()
            .position(|vault| vault.id == to_vault)
            .ok_or(SarrafError::RecipientAccountNotFound(to_vault))?;

        let swept = converted_amount(tx.amount, direction, rate);
        let currency = direction.to_currency();
        let available = vaults[recipient_index].balances.get(currency);
        if available < swept {
            return Err(SarrafError::InsufficientFunds {
                required: swept,
                available,
            });
        }

        vaults[recipient_index].balances.debit(currency, swept);
        vaults[main_index].balances.credit(currency, swept);

        let mut updated = tx;
        updated.mark_approved(actor);
        transactions[index] = updated.clone();

        let mut batch = self.store.batch();
        batch.vaults(&vaults)?;
        batch.transactions(&transactions)?;
        self.store.commit(batch)?;

        info!(
            tx_id = %updated.id,
            number = %updated.number,
            swept = %swept,
            currency = %currency,
            approved_by = %actor,
            "Approved transaction"
        );

        Ok(updated)
    }

    /// Cancel a transaction. Allowed from `Pending` and `Confirmed`;
    /// cancellation never reverses balances. Terminal states reject the
    /// transition.
    pub fn cancel(&self, id: TransactionId) -> Result<Transaction> {
        let mut transactions = self.store.transactions()?;
        let index = transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or(SarrafError::TransactionNotFound(id))?;

        let from = transactions[index].status;
        if !from.can_transition_to(TransactionStatus::Cancelled) {
            return Err(SarrafError::InvalidTransition {
                from,
                to: TransactionStatus::Cancelled,
            });
        }

        transactions[index].status = TransactionStatus::Cancelled;
        let updated = transactions[index].clone();
        self.store.save_transactions(&transactions)?;

        info!(tx_id = %updated.id, number = %updated.number, "Cancelled transaction");

        Ok(updated)
    }
}
