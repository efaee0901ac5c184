//! Sarraf Registries
//!
//! Operator-facing management of vaults, customers and user accounts.
//! Settlement itself lives in `sarraf-settlement`; this crate covers the
//! records it settles against.

pub mod customers;
pub mod users;
pub mod vaults;

pub use customers::{CustomerRegistry, NewCustomer};
pub use users::UserRegistry;
pub use vaults::{NewVault, VaultRegistry};
