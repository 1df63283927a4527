//! Domain model for adapter registration.
//!
//! An adapter is an external producer of tagged data packets. Registration
//! captures its identity, endpoint, declared data types and lifecycle status.
//! Nothing here touches storage.

mod adapter;
mod error;
mod ids;
mod status;

pub use adapter::{McpAdapter, PersistedAdapterData};
pub use error::{AdapterDomainError, ParseAdapterStatusError};
pub use ids::AdapterId;
pub use status::AdapterStatus;
