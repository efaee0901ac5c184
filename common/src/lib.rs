//! Sarraf Common Types
//!
//! This crate contains shared types used across the Sarraf back office,
//! including identifiers, currency and balance types, the domain records,
//! and the transaction lifecycle definitions.

pub mod currency;
pub mod error;
pub mod identifiers;
pub mod notify;
pub mod records;
pub mod time;
pub mod transaction;

pub use currency::*;
pub use error::*;
pub use identifiers::*;
pub use notify::*;
pub use records::*;
pub use time::*;
pub use transaction::*;
