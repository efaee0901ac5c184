//! Dashboard and report summaries.

use crate::series::{daily_profit_series, stored_daily_profit_series, DailyPoint};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sarraf_common::{
    time, Result, Transaction, TransactionKind, TransactionStatus, Vault, VaultId,
};
use sarraf_rates::{RateQuote, RateService};
use sarraf_settlement::profit;
use sarraf_store::Store;
use serde::Serialize;
use std::sync::Arc;

/// Days of profit/loss history shown on the dashboard chart.
const DASHBOARD_SERIES_DAYS: usize = 7;

/// Days of profit/loss history shown on the reports chart.
const REPORT_SERIES_DAYS: usize = 10;

/// The dashboard's headline figures.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Sum of SDG balances across all vaults.
    pub total_sdg: Decimal,
    /// Sum of AED balances across all vaults.
    pub total_aed: Decimal,
    /// Combined balance expressed in AED: `aed + sdg / buy`.
    pub total_in_aed: Decimal,
    /// Transactions awaiting confirmation.
    pub pending_count: usize,
    /// Transactions confirmed but not yet approved.
    pub in_progress_count: usize,
    /// Profit/loss of confirmed transfers, revalued at the current quote.
    pub profit_loss: Decimal,
    /// The quote used for the valuation.
    pub quote: RateQuote,
    /// Daily profit/loss chart, most recent seven days.
    pub series: Vec<DailyPoint>,
}

/// One row of the per-vault balance table.
#[derive(Debug, Clone, Serialize)]
pub struct VaultRow {
    /// Vault identifier.
    pub vault_id: VaultId,
    /// Vault name.
    pub name: String,
    /// SDG balance.
    pub sdg: Decimal,
    /// AED balance.
    pub aed: Decimal,
    /// Combined value in AED at the current buy rate.
    pub value_in_aed: Decimal,
}

/// The reports page figures over an optional date range.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Net profit/loss stored on the matching transactions.
    pub net_profit_loss: Decimal,
    /// Sum of SDG balances across all vaults.
    pub total_sdg: Decimal,
    /// Sum of AED balances across all vaults.
    pub total_aed: Decimal,
    /// Number of matching confirmed transactions.
    pub confirmed_count: usize,
    /// Daily profit/loss chart from stored values, most recent ten days.
    pub series: Vec<DailyPoint>,
    /// Per-vault balance rows.
    pub vaults: Vec<VaultRow>,
    /// The matching confirmed transactions, most recent first.
    pub transactions: Vec<Transaction>,
}

/// Read-only reporting over the store. Every call recomputes from
/// current data.
#[derive(Clone)]
pub struct Reports {
    store: Arc<Store>,
    rates: RateService,
}

impl Reports {
    /// Create a reporting view over a store.
    pub fn new(store: Arc<Store>) -> Self {
        let rates = RateService::new(store.clone());
        Self { store, rates }
    }

    /// The dashboard summary.
    pub fn dashboard(&self) -> Result<DashboardSummary> {
        let vaults = self.store.vaults()?;
        let transactions = self.store.transactions()?;
        let quote = self.rates.current()?;

        let (total_sdg, total_aed) = vault_totals(&vaults);
        let total_in_aed = value_in_aed(total_sdg, total_aed, &quote);

        let pending_count = transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Pending)
            .count();
        let in_progress_count = transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Confirmed)
            .count();

        let profit_loss = transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Confirmed)
            .filter_map(|tx| match &tx.kind {
                TransactionKind::Transfer {
                    direction, rate, ..
                } => Some(profit::profit_loss(tx.amount, *direction, *rate, &quote)),
                _ => None,
            })
            .sum();

        let series = daily_profit_series(&transactions, &quote, DASHBOARD_SERIES_DAYS);

        Ok(DashboardSummary {
            total_sdg,
            total_aed,
            total_in_aed,
            pending_count,
            in_progress_count,
            profit_loss,
            quote,
            series,
        })
    }

    /// The reports summary, optionally restricted to transactions created
    /// within an inclusive day range.
    pub fn report(&self, range: Option<(NaiveDate, NaiveDate)>) -> Result<ReportSummary> {
        let vaults = self.store.vaults()?;
        let quote = self.rates.current()?;

        let transactions: Vec<Transaction> = self
            .store
            .transactions()?
            .into_iter()
            .filter(|tx| tx.status == TransactionStatus::Confirmed)
            .filter(|tx| match range {
                Some((start, end)) => {
                    let day = time::day_of(tx.created_at);
                    day >= start && day <= end
                }
                None => true,
            })
            .collect();

        let net_profit_loss = transactions
            .iter()
            .map(|tx| match &tx.kind {
                TransactionKind::Transfer { profit_loss, .. } => *profit_loss,
                _ => Decimal::ZERO,
            })
            .sum();

        let (total_sdg, total_aed) = vault_totals(&vaults);
        let series = stored_daily_profit_series(&transactions, REPORT_SERIES_DAYS);
        let vault_rows = vaults
            .iter()
            .map(|vault| vault_row(vault, &quote))
            .collect();

        Ok(ReportSummary {
            net_profit_loss,
            total_sdg,
            total_aed,
            confirmed_count: transactions.len(),
            series,
            vaults: vault_rows,
            transactions,
        })
    }

    /// Per-vault balance rows valued at the current buy rate.
    pub fn vault_rows(&self) -> Result<Vec<VaultRow>> {
        let vaults = self.store.vaults()?;
        let quote = self.rates.current()?;
        Ok(vaults.iter().map(|vault| vault_row(vault, &quote)).collect())
    }
}

fn vault_totals(vaults: &[Vault]) -> (Decimal, Decimal) {
    let total_sdg = vaults.iter().map(|vault| vault.balances.sdg).sum();
    let total_aed = vaults.iter().map(|vault| vault.balances.aed).sum();
    (total_sdg, total_aed)
}

fn value_in_aed(sdg: Decimal, aed: Decimal, quote: &RateQuote) -> Decimal {
    if quote.buy.is_zero() {
        aed
    } else {
        aed + sdg / quote.buy
    }
}

fn vault_row(vault: &Vault, quote: &RateQuote) -> VaultRow {
    VaultRow {
        vault_id: vault.id,
        name: vault.name.clone(),
        sdg: vault.balances.sdg,
        aed: vault.balances.aed,
        value_in_aed: value_in_aed(vault.balances.sdg, vault.balances.aed, quote),
    }
}
