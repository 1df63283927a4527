//! Port contracts for packet persistence.
//!
//! The generic packet log and the tag-specific projection stores are
//! separate ports: nothing ties their writes together.

pub mod packet_log;
pub mod projection_store;

pub use packet_log::{PacketLog, PacketStoreError, PacketStoreResult};
pub use projection_store::ProjectionStore;
