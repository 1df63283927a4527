//! `SQLite` packet log and projection store.

mod models;
mod repository;
mod schema;

pub use repository::SqlitePacketStore;
