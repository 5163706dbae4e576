//! # EscrowReno Core
//!
//! Core business logic for the EscrowReno signup verification flow.
//! This crate contains the domain entities (rate-limit windows and issued codes),
//! the storage and dispatch contracts implemented by the infrastructure layer,
//! the verification service orchestrating them, and the error types shared
//! by every layer above.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
