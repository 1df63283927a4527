//! Adapter registration for the coordinator.
//!
//! Producers ("MCP adapters") announce themselves with the data types they
//! intend to submit. The registry persists each announcement and keeps an
//! in-process view that answers status queries. The module follows the same
//! hexagonal layout as the rest of the crate:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
