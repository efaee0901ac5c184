//! Sarraf Rate Service
//!
//! Holds the current buy/sell quote and its append-only history. The
//! head of the history is always the current quote; records are never
//! edited or deleted.

pub mod quote;
pub mod service;

pub use quote::RateQuote;
pub use service::RateService;
