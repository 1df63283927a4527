//! In-memory packet stores.

mod packet_store;

pub use packet_store::InMemoryPacketStore;
