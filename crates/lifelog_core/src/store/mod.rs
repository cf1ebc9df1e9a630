//! Persisted state stores.
//!
//! # Responsibility
//! - Own in-memory state for logs, theme and language.
//! - Rehydrate on `open`, write through on every mutation.
//!
//! # Invariants
//! - Stores are explicitly constructed over an injected `KeyValueStore`;
//!   there is no process-wide instance.
//! - Stores never share keys and never read each other's state.

pub mod language_store;
pub mod log_store;
pub mod persist;
pub mod theme_store;
