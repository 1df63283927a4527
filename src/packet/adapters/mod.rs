//! Packet log and projection store implementations.

pub mod memory;
pub mod sqlite;
