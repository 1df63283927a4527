//! MCP coordinator: adapter registry and packet routing hub.
//!
//! Adapters (MCP servers) register themselves with the coordinator and then
//! push tagged data packets to it. Every packet is appended to a durable log;
//! packets carrying a conversation or code-interaction tag are additionally
//! projected into a typed table that can be queried back.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: identifiers, enumerations and records with no infrastructure
//!   dependencies
//! - **Ports**: async traits describing the stores the services need
//! - **Adapters**: in-memory and `SQLite` implementations of those ports
//! - **Services**: the registry, dispatcher and read-side aggregators
//!
//! # Modules
//!
//! - [`adapter_registry`]: adapter registration and status
//! - [`packet`]: packet intake, projection and statistics
//! - [`storage`]: `SQLite` pool and schema bootstrap
//! - [`server`]: HTTP boundary
//! - [`config`]: layered configuration
//! - [`logging`]: tracing subscriber setup

pub mod adapter_registry;
pub mod config;
pub mod logging;
pub mod packet;
pub mod server;
pub mod storage;
