//! Adapter store implementations.

pub mod memory;
pub mod sqlite;
