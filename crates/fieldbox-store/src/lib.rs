//! # fieldbox-store
//!
//! In-memory stores for the fieldbox knowledge portal: the authoritative
//! document catalog and the account registry, plus the fixed seed data set
//! both are initialized from at process start.
//!
//! The stores are process-wide singletons with process-lifetime scope. They
//! have explicit construction and a single owner; data is discarded on
//! process exit. Any durable-storage replacement must reproduce the
//! seed-at-start contract and the mutation invariants documented on each
//! store method.

pub mod accounts;
pub mod catalog;
pub mod seed;

pub use accounts::AccountStore;
pub use catalog::CatalogStore;
