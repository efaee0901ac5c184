//! The typed collection store.

use crate::backend::{JsonFileBackend, MemoryBackend, StorageBackend};
use crate::events::{ChangeEvent, ChangeFeed};
use rust_decimal::Decimal;
use sarraf_common::{
    Balances, Customer, ExchangeRate, Result, SarrafError, Transaction, User, UserRole, Vault,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::mpsc::Receiver;
use tracing::info;

/// The five named collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Vaults,
    Customers,
    Rates,
    Transactions,
}

impl Collection {
    /// All collections, in seeding order.
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::Vaults,
        Collection::Customers,
        Collection::Rates,
        Collection::Transactions,
    ];

    /// Backend key for the collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Users => "exchange_users",
            Collection::Vaults => "exchange_vaults",
            Collection::Customers => "exchange_customers",
            Collection::Rates => "exchange_rates",
            Collection::Transactions => "exchange_transactions",
        }
    }
}

/// Backend key for the current-session slot.
const CURRENT_USER_KEY: &str = "exchange_current_user";

/// A set of collection writes applied as one commit.
#[derive(Default)]
pub struct Batch {
    entries: Vec<(&'static str, String)>,
    collections: Vec<Collection>,
}

impl Batch {
    fn put<T: Serialize>(&mut self, collection: Collection, records: &[T]) -> Result<()> {
        let serialized =
            serde_json::to_string(records).map_err(|e| SarrafError::Storage(e.to_string()))?;
        self.entries.push((collection.key(), serialized));
        self.collections.push(collection);
        Ok(())
    }

    /// Stage the users collection.
    pub fn users(&mut self, records: &[User]) -> Result<()> {
        self.put(Collection::Users, records)
    }

    /// Stage the vaults collection.
    pub fn vaults(&mut self, records: &[Vault]) -> Result<()> {
        self.put(Collection::Vaults, records)
    }

    /// Stage the customers collection.
    pub fn customers(&mut self, records: &[Customer]) -> Result<()> {
        self.put(Collection::Customers, records)
    }

    /// Stage the rates collection.
    pub fn rates(&mut self, records: &[ExchangeRate]) -> Result<()> {
        self.put(Collection::Rates, records)
    }

    /// Stage the transactions collection.
    pub fn transactions(&mut self, records: &[Transaction]) -> Result<()> {
        self.put(Collection::Transactions, records)
    }

    /// Check if nothing was staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Persistence provider over the five collections plus the session slot.
///
/// All reads and writes are whole-collection. A [`Batch`] commit writes
/// its collections through the backend as one unit and publishes a single
/// change event, so paired writes (vaults plus transactions during a
/// settlement) cannot be torn apart.
pub struct Store {
    backend: Box<dyn StorageBackend>,
    feed: ChangeFeed,
}

impl Store {
    /// Create a store over an in-memory backend.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()))
    }

    /// Create a store over a JSON file backend.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_backend(Box::new(JsonFileBackend::open(path)?)))
    }

    /// Create a store over a custom backend.
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            feed: ChangeFeed::new(),
        }
    }

    fn get<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        match self.backend.read(collection.key())? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| SarrafError::Storage(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    /// Read all operator accounts.
    pub fn users(&self) -> Result<Vec<User>> {
        self.get(Collection::Users)
    }

    /// Read all vaults.
    pub fn vaults(&self) -> Result<Vec<Vault>> {
        self.get(Collection::Vaults)
    }

    /// Read all customers.
    pub fn customers(&self) -> Result<Vec<Customer>> {
        self.get(Collection::Customers)
    }

    /// Read the rate history, most recent first.
    pub fn rates(&self) -> Result<Vec<ExchangeRate>> {
        self.get(Collection::Rates)
    }

    /// Read all transactions, most recent first.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.get(Collection::Transactions)
    }

    /// Start a batch of collection writes.
    pub fn batch(&self) -> Batch {
        Batch::default()
    }

    /// Commit a batch: one backend write, one change event.
    pub fn commit(&self, batch: Batch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.backend.write(&batch.entries)?;
        self.feed.publish(ChangeEvent {
            collections: batch.collections,
        });
        Ok(())
    }

    /// Replace the users collection.
    pub fn save_users(&self, records: &[User]) -> Result<()> {
        let mut batch = self.batch();
        batch.users(records)?;
        self.commit(batch)
    }

    /// Replace the vaults collection.
    pub fn save_vaults(&self, records: &[Vault]) -> Result<()> {
        let mut batch = self.batch();
        batch.vaults(records)?;
        self.commit(batch)
    }

    /// Replace the customers collection.
    pub fn save_customers(&self, records: &[Customer]) -> Result<()> {
        let mut batch = self.batch();
        batch.customers(records)?;
        self.commit(batch)
    }

    /// Replace the rates collection.
    pub fn save_rates(&self, records: &[ExchangeRate]) -> Result<()> {
        let mut batch = self.batch();
        batch.rates(records)?;
        self.commit(batch)
    }

    /// Replace the transactions collection.
    pub fn save_transactions(&self, records: &[Transaction]) -> Result<()> {
        let mut batch = self.batch();
        batch.transactions(records)?;
        self.commit(batch)
    }

    /// Read the logged-in operator, if any.
    pub fn current_user(&self) -> Result<Option<User>> {
        match self.backend.read(CURRENT_USER_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| SarrafError::Storage(e.to_string())),
            None => Ok(None),
        }
    }

    /// Set or clear the logged-in operator.
    pub fn set_current_user(&self, user: Option<&User>) -> Result<()> {
        match user {
            Some(user) => {
                let serialized =
                    serde_json::to_string(user).map_err(|e| SarrafError::Storage(e.to_string()))?;
                self.backend.write(&[(CURRENT_USER_KEY, serialized)])
            }
            None => self.backend.remove(CURRENT_USER_KEY),
        }
    }

    /// Subscribe to the change feed.
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        self.feed.subscribe()
    }

    /// Seed the default admin user, main vault and opening rate into any
    /// collection that is still empty. Idempotent.
    pub fn seed_defaults(&self) -> Result<()> {
        let mut users = self.users()?;
        if users.is_empty() {
            users.push(User::new("admin", UserRole::Admin));
            self.save_users(&users)?;
            info!("Seeded default admin user");
        }

        if self.vaults()?.is_empty() {
            let vault = Vault::new("Main Vault", Balances::zero())
                .with_description("Primary exchange vault")
                .as_main();
            self.save_vaults(&[vault])?;
            info!("Seeded default main vault");
        }

        if self.rates()?.is_empty() {
            let admin = users[0].id;
            let rate = ExchangeRate::new(Decimal::from(200), Decimal::from(202), admin);
            self.save_rates(&[rate])?;
            info!("Seeded default exchange rate");
        }

        Ok(())
    }

    /// Wipe every collection and the session slot.
    pub fn clear_all(&self) -> Result<()> {
        self.backend.clear()?;
        self.feed.publish(ChangeEvent {
            collections: Collection::ALL.to_vec(),
        });
        info!("Cleared all stored data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections() {
        let store = Store::in_memory();
        assert!(store.users().unwrap().is_empty());
        assert!(store.vaults().unwrap().is_empty());
        assert!(store.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_seed_defaults_idempotent() {
        let store = Store::in_memory();
        store.seed_defaults().unwrap();
        store.seed_defaults().unwrap();

        let users = store.users().unwrap();
        let vaults = store.vaults().unwrap();
        let rates = store.rates().unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "admin");
        assert_eq!(vaults.len(), 1);
        assert!(vaults[0].is_main);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].buy_rate, Decimal::from(200));
        assert_eq!(rates[0].sell_rate, Decimal::from(202));
    }

    #[test]
    fn test_batch_commit_publishes_one_event() {
        let store = Store::in_memory();
        store.seed_defaults().unwrap();
        let rx = store.subscribe();

        let vaults = store.vaults().unwrap();
        let mut batch = store.batch();
        batch.vaults(&vaults).unwrap();
        batch.transactions(&[]).unwrap();
        store.commit(batch).unwrap();

        let event = rx.try_recv().unwrap();
        assert!(event.touches(Collection::Vaults));
        assert!(event.touches(Collection::Transactions));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_session_slot() {
        let store = Store::in_memory();
        assert!(store.current_user().unwrap().is_none());

        let user = User::new("teller", UserRole::Accountant);
        store.set_current_user(Some(&user)).unwrap();
        let current = store.current_user().unwrap().unwrap();
        assert_eq!(current.username, "teller");

        store.set_current_user(None).unwrap();
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn test_clear_all_wipes_and_notifies() {
        let store = Store::in_memory();
        store.seed_defaults().unwrap();
        let rx = store.subscribe();

        store.clear_all().unwrap();

        assert!(store.users().unwrap().is_empty());
        assert!(store.vaults().unwrap().is_empty());
        let event = rx.try_recv().unwrap();
        assert_eq!(event.collections.len(), Collection::ALL.len());
    }
}
