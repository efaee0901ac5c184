//! Sarraf Store
//!
//! Persistence provider for the back office: whole-collection reads and
//! writes over five named collections plus a current-session slot, with
//! a change feed so dependent views update on write instead of polling.
//!
//! # Example
//!
//! ```rust,ignore
//! use sarraf_store::Store;
//!
//! let store = Store::in_memory();
//! store.seed_defaults()?;
//!
//! let feed = store.subscribe();
//! let vaults = store.vaults()?;
//! ```

pub mod backend;
pub mod events;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use events::{ChangeEvent, ChangeFeed};
pub use store::{Batch, Collection, Store};
