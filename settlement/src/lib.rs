//! Sarraf Settlement Workflow
//!
//! The transaction state machine: creation, confirmation, approval and
//! cancellation, including currency conversion and profit/loss
//! derivation from exchange-rate spreads.
//!
//! Transactions are created `Pending` with no balance effect. Confirming
//! applies the balance change (credit, checked debit, or converted
//! transfer credit). Approving a normal-direction transfer sweeps the
//! credited amount from the destination vault into the main vault.
//! `Approved` and `Cancelled` are terminal.

pub mod conversion;
pub mod input;
pub mod profit;
pub mod workflow;

pub use input::NewTransaction;
pub use workflow::SettlementWorkflow;
