//! Customer registry.

use sarraf_common::{Balances, Customer, CustomerId, Result, SarrafError};
use sarraf_store::Store;
use std::sync::Arc;
use tracing::info;

/// Input for registering a customer.
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    /// Display name.
    pub name: String,
    /// External account number, if any.
    pub account_number: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Opening balances.
    pub balances: Balances,
    /// Whether this is a recurring customer.
    pub is_recurring: bool,
    /// Whether the customer holds a Banak bank account.
    pub has_banak_account: bool,
}

impl NewCustomer {
    /// Start a customer input.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the opening balances.
    pub fn with_balances(mut self, balances: Balances) -> Self {
        self.balances = balances;
        self
    }

    /// Mark as recurring.
    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }
}

/// Operator-facing customer management.
///
/// Customer balances are reference data: they are set here and shown in
/// reports, but the settlement workflow never debits or credits them.
#[derive(Clone)]
pub struct CustomerRegistry {
    store: Arc<Store>,
}

impl CustomerRegistry {
    /// Create a registry over a store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All customers, in registration order.
    pub fn list(&self) -> Result<Vec<Customer>> {
        self.store.customers()
    }

    /// Look up a customer by id.
    pub fn get(&self, id: CustomerId) -> Result<Customer> {
        self.store
            .customers()?
            .into_iter()
            .find(|customer| customer.id == id)
            .ok_or(SarrafError::CustomerNotFound(id))
    }

    /// Register a customer.
    pub fn create(&self, input: NewCustomer) -> Result<Customer> {
        let mut customer = Customer::new(input.name);
        customer.account_number = input.account_number;
        customer.phone = input.phone;
        customer.email = input.email;
        customer.balances = input.balances;
        customer.is_recurring = input.is_recurring;
        customer.has_banak_account = input.has_banak_account;

        let mut customers = self.store.customers()?;
        customers.push(customer.clone());
        self.store.save_customers(&customers)?;

        info!(customer_id = %customer.id, name = %customer.name, "Registered customer");

        Ok(customer)
    }

    /// Replace a customer's balances.
    pub fn update_balances(&self, id: CustomerId, balances: Balances) -> Result<Customer> {
        let mut customers = self.store.customers()?;
        let customer = customers
            .iter_mut()
            .find(|customer| customer.id == id)
            .ok_or(SarrafError::CustomerNotFound(id))?;

        customer.balances = balances;
        let updated = customer.clone();
        self.store.save_customers(&customers)?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn setup() -> CustomerRegistry {
        CustomerRegistry::new(Arc::new(Store::in_memory()))
    }

    #[test]
    fn test_create_and_list() {
        let registry = setup();

        registry
            .create(
                NewCustomer::named("Fatima")
                    .with_balances(Balances::new(dec!(5000), dec!(0)))
                    .recurring(),
            )
            .unwrap();
        registry.create(NewCustomer::named("Omar")).unwrap();

        let customers = registry.list().unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name, "Fatima");
        assert!(customers[0].is_recurring);
        assert_eq!(customers[1].balances, Balances::zero());
    }

    #[test]
    fn test_update_balances() {
        let registry = setup();
        let customer = registry.create(NewCustomer::named("Fatima")).unwrap();

        let updated = registry
            .update_balances(customer.id, Balances::new(dec!(100), dec!(20)))
            .unwrap();

        assert_eq!(updated.balances, Balances::new(dec!(100), dec!(20)));
        assert_eq!(
            registry.get(customer.id).unwrap().balances,
            Balances::new(dec!(100), dec!(20))
        );
    }

    #[test]
    fn test_update_unknown_customer() {
        let registry = setup();
        let missing = CustomerId::new();
        assert!(matches!(
            registry.update_balances(missing, Balances::zero()),
            Err(SarrafError::CustomerNotFound(id)) if id == missing
        ));
    }
}
