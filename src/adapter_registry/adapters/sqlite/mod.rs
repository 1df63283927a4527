//! `SQLite` adapter store.

mod models;
mod repository;
mod schema;

pub use repository::SqliteAdapterStore;
