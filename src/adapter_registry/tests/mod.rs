//! Unit tests for the adapter registry.
