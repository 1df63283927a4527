//! Application services for adapter registration.

mod registry;

pub use registry::{
    AdapterRegistry, AdapterRegistryError, AdapterRegistryResult, AdapterStatusView,
    RegisterAdapterRequest,
};
