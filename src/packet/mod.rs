//! Tagged data packets: intake, per-tag projection and statistics.
//!
//! Every packet is first recorded in a generic log keyed by its id. Packets
//! whose tag has a projection (conversations and code interactions) are then
//! written to a tag-specific store. Projection failures are logged and
//! reported in the receipt but never fail the submission.
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
