//! # fieldbox-core
//!
//! Core types, traits, and abstractions for the fieldbox knowledge portal.
//!
//! This crate provides the domain model (documents, accounts, conversation
//! turns, explanations), the crate-wide error type, and the trait definitions
//! for the generative-model boundary that the other fieldbox crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
