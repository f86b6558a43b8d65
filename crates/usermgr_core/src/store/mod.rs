//! In-memory record storage.
//!
//! # Responsibility
//! - Keep the authoritative user collection and its filtered projection.
//! - Stay synchronous and I/O free; remote effects live in `remote`.
//!
//! # Invariants
//! - Store writes check structural shape only (id uniqueness). Field rules are
//!   enforced by callers through `User::validate()`.

pub mod user_store;
