//! Port contracts for adapter registration.
//!
//! Ports define infrastructure-agnostic interfaces used by the registry
//! service.

pub mod repository;

pub use repository::{AdapterStore, AdapterStoreError, AdapterStoreResult};
