//! Scripted back-office scenarios.

use std::sync::Arc;

use anyhow::Context;
use rust_decimal::Decimal;
use sarraf_common::{
    Balances, Currency, ExchangeDirection, Notification, NotificationSink, Result as SarrafResult,
    TracingSink, TransferSource, User,
};
use sarraf_ledger::{CustomerRegistry, NewCustomer, NewVault, UserRegistry, VaultRegistry};
use sarraf_reports::Reports;
use sarraf_settlement::{NewTransaction, SettlementWorkflow};
use sarraf_store::Store;
use tracing::info;

/// The assembled services a scenario drives.
pub struct Backoffice {
    pub store: Arc<Store>,
    pub users: UserRegistry,
    pub vaults: VaultRegistry,
    pub customers: CustomerRegistry,
    pub workflow: SettlementWorkflow,
    pub reports: Reports,
    pub sink: Box<dyn NotificationSink>,
}

impl Backoffice {
    /// Assemble the services over a store.
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            users: UserRegistry::new(store.clone()),
            vaults: VaultRegistry::new(store.clone()),
            customers: CustomerRegistry::new(store.clone()),
            workflow: SettlementWorkflow::new(store.clone()),
            reports: Reports::new(store.clone()),
            sink: Box::new(TracingSink),
            store,
        }
    }

    /// Relay an operation outcome to the notification sink, keeping the
    /// value on success.
    fn relay<T>(&self, title: &str, result: SarrafResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.sink.notify(Notification::success(title, "done"));
                Some(value)
            }
            Err(err) => {
                self.sink.notify(Notification::error(
                    title,
                    format!("{} ({})", err, err.error_code()),
                ));
                None
            }
        }
    }

    fn admin(&self) -> anyhow::Result<User> {
        self.users
            .login("admin")?
            .context("default admin account missing")
    }
}

/// A runnable scenario.
#[derive(Debug, Clone, Copy)]
pub enum Scenario {
    /// A day at the counter: transfers in both directions, a deposit, a
    /// withdrawal that bounces, confirmation and the approval sweep.
    SettlementDay,
    /// Rate maintenance: a valid update, a rejected spread, history.
    RateBoard,
}

impl Scenario {
    /// Load a scenario by name.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "settlement-day" => Ok(Scenario::SettlementDay),
            "rate-board" => Ok(Scenario::RateBoard),
            _ => Err(anyhow::anyhow!("Unknown scenario: {}", name)),
        }
    }

    /// Run the scenario.
    pub fn run(&self, backoffice: &Backoffice) -> anyhow::Result<()> {
        match self {
            Scenario::SettlementDay => settlement_day(backoffice),
            Scenario::RateBoard => rate_board(backoffice),
        }
    }
}

fn settlement_day(bo: &Backoffice) -> anyhow::Result<()> {
    let admin = bo.admin()?;

    bo.relay(
        "Update rate",
        bo.workflow.rates().update(
            Decimal::from(200),
            Decimal::from(202),
            admin.id,
        ),
    );

    let branch = bo.vaults.create(
        NewVault::named("Branch till")
            .with_description("Counter float")
            .with_balances(Balances::new(Decimal::from(50_000), Decimal::ZERO)),
    )?;

    let customer = bo.customers.create(NewCustomer::named("Fatima").recurring())?;

    // A cash walk-in sells 500 AED.
    let transfer = bo
        .relay(
            "Record transfer",
            bo.workflow.create(
                NewTransaction::transfer(
                    "T-1001",
                    TransferSource::Cash("Ali".to_string()),
                    branch.id,
                    ExchangeDirection::Normal,
                    Decimal::from(500),
                )
                .with_notes("walk-in"),
                admin.id,
            ),
        )
        .context("transfer rejected")?;

    bo.relay("Confirm transfer", bo.workflow.confirm(transfer.id, admin.id));
    bo.relay("Approve transfer", bo.workflow.approve(transfer.id, admin.id));

    // A registered customer buys dirhams.
    if let Some(reverse) = bo.relay(
        "Record reverse transfer",
        bo.workflow.create(
            NewTransaction::transfer(
                "T-1002",
                TransferSource::Customer(customer.id),
                branch.id,
                ExchangeDirection::Reverse,
                Decimal::from(20_200),
            ),
            admin.id,
        ),
    ) {
        bo.relay("Confirm reverse transfer", bo.workflow.confirm(reverse.id, admin.id));
    }

    // Cash movements on the till.
    if let Some(deposit) = bo.relay(
        "Record deposit",
        bo.workflow.create(
            NewTransaction::deposit("D-2001", branch.id, Currency::Aed, Decimal::from(150)),
            admin.id,
        ),
    ) {
        bo.relay("Confirm deposit", bo.workflow.confirm(deposit.id, admin.id));
    }

    // This withdrawal exceeds the till and bounces at confirmation.
    if let Some(withdrawal) = bo.relay(
        "Record withdrawal",
        bo.workflow.create(
            NewTransaction::withdrawal(
                "W-3001",
                branch.id,
                Currency::Aed,
                Decimal::from(10_000),
            ),
            admin.id,
        ),
    ) {
        bo.relay("Confirm withdrawal", bo.workflow.confirm(withdrawal.id, admin.id));
        bo.relay("Cancel withdrawal", bo.workflow.cancel(withdrawal.id));
    }

    for row in bo.reports.vault_rows()? {
        info!(
            vault = %row.name,
            sdg = %row.sdg,
            aed = %row.aed,
            value_aed = %row.value_in_aed,
            "Vault balance"
        );
    }

    bo.users.logout()?;
    Ok(())
}

fn rate_board(bo: &Backoffice) -> anyhow::Result<()> {
    let admin = bo.admin()?;
    let rates = bo.workflow.rates();

    bo.relay(
        "Update rate",
        rates.update(Decimal::from(205), Decimal::from(208), admin.id),
    );
    // Inverted spread: rejected, history untouched.
    bo.relay(
        "Update rate",
        rates.update(Decimal::from(208), Decimal::from(205), admin.id),
    );

    for record in rates.history()? {
        info!(
            buy = %record.buy_rate,
            sell = %record.sell_rate,
            spread = %record.spread(),
            at = %record.updated_at,
            "Rate record"
        );
    }

    bo.users.logout()?;
    Ok(())
}
