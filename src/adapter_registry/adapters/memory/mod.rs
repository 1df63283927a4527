//! In-memory adapter store.

mod adapter_store;

pub use adapter_store::InMemoryAdapterStore;
