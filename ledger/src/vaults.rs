//! Vault registry.

use sarraf_common::{Balances, Result, SarrafError, Vault, VaultId};
use sarraf_store::Store;
use std::sync::Arc;
use tracing::info;

/// Input for creating a vault.
#[derive(Debug, Clone)]
pub struct NewVault {
    /// Display name.
    pub name: String,
    /// Opening balances.
    pub initial_balances: Balances,
    /// Free-text description.
    pub description: Option<String>,
    /// Whether the new vault becomes the main vault.
    pub is_main: bool,
}

impl NewVault {
    /// Start a vault input with zero opening balances.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_balances: Balances::zero(),
            description: None,
            is_main: false,
        }
    }

    /// Set the opening balances.
    pub fn with_balances(mut self, balances: Balances) -> Self {
        self.initial_balances = balances;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Make this the main vault.
    pub fn main(mut self) -> Self {
        self.is_main = true;
        self
    }
}

/// Operator-facing vault management.
///
/// The main-vault flag is a singleton: any operation that sets it clears
/// it on every other vault within the same commit.
#[derive(Clone)]
pub struct VaultRegistry {
    store: Arc<Store>,
}

impl VaultRegistry {
    /// Create a registry over a store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All vaults, in creation order.
    pub fn list(&self) -> Result<Vec<Vault>> {
        self.store.vaults()
    }

    /// Look up a vault by id.
    pub fn get(&self, id: VaultId) -> Result<Vault> {
        self.store
            .vaults()?
            .into_iter()
            .find(|vault| vault.id == id)
            .ok_or(SarrafError::VaultNotFound(id))
    }

    /// The vault designated as main, if any.
    pub fn main_vault(&self) -> Result<Option<Vault>> {
        Ok(self.store.vaults()?.into_iter().find(|vault| vault.is_main))
    }

    /// Create a vault.
    pub fn create(&self, input: NewVault) -> Result<Vault> {
        let mut vaults = self.store.vaults()?;

        let mut vault = Vault::new(input.name, input.initial_balances);
        if let Some(description) = input.description {
            vault = vault.with_description(description);
        }
        if input.is_main {
            for existing in vaults.iter_mut() {
                existing.is_main = false;
            }
            vault = vault.as_main();
        }

        vaults.push(vault.clone());
        self.store.save_vaults(&vaults)?;

        info!(
            vault_id = %vault.id,
            name = %vault.name,
            is_main = vault.is_main,
            "Created vault"
        );

        Ok(vault)
    }

    /// Make the given vault the main vault, clearing the flag elsewhere.
    pub fn designate_main(&self, id: VaultId) -> Result<Vault> {
        let mut vaults = self.store.vaults()?;
        let index = vaults
            .iter()
            .position(|vault| vault.id == id)
            .ok_or(SarrafError::VaultNotFound(id))?;

        for vault in vaults.iter_mut() {
            vault.is_main = false;
        }
        vaults[index].is_main = true;
        self.store.save_vaults(&vaults)?;

        info!(vault_id = %id, "Designated main vault");

        Ok(vaults[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn setup() -> VaultRegistry {
        VaultRegistry::new(Arc::new(Store::in_memory()))
    }

    #[test]
    fn test_create_with_opening_balances() {
        let registry = setup();

        let vault = registry
            .create(
                NewVault::named("Branch")
                    .with_balances(Balances::new(dec!(1000), dec!(50)))
                    .with_description("Branch till"),
            )
            .unwrap();

        assert_eq!(vault.balances, Balances::new(dec!(1000), dec!(50)));
        assert_eq!(vault.initial_balances, vault.balances);
        assert!(!vault.is_main);
    }

    #[test]
    fn test_main_vault_is_singleton() {
        let registry = setup();

        let first = registry.create(NewVault::named("First").main()).unwrap();
        let second = registry.create(NewVault::named("Second").main()).unwrap();

        let vaults = registry.list().unwrap();
        let mains: Vec<_> = vaults.iter().filter(|vault| vault.is_main).collect();
        assert_eq!(mains.len(), 1);
        assert_eq!(mains[0].id, second.id);
        assert!(!registry.get(first.id).unwrap().is_main);
    }

    #[test]
    fn test_designate_main_moves_flag() {
        let registry = setup();

        let first = registry.create(NewVault::named("First").main()).unwrap();
        let second = registry.create(NewVault::named("Second")).unwrap();

        registry.designate_main(second.id).unwrap();

        assert!(!registry.get(first.id).unwrap().is_main);
        assert!(registry.get(second.id).unwrap().is_main);
        assert_eq!(registry.main_vault().unwrap().unwrap().id, second.id);
    }

    #[test]
    fn test_designate_main_unknown_vault() {
        let registry = setup();
        registry.create(NewVault::named("Only").main()).unwrap();

        let missing = VaultId::new();
        assert!(matches!(
            registry.designate_main(missing),
            Err(SarrafError::VaultNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_get_unknown_vault() {
        let registry = setup();
        let missing = VaultId::new();
        assert!(matches!(
            registry.get(missing),
            Err(SarrafError::VaultNotFound(_))
        ));
    }
}
