//! Remote user collection adapter.
//!
//! # Responsibility
//! - Define the `UserRemote` contract the service layer depends on.
//! - Provide the `reqwest`-based HTTP implementation and its config.
//!
//! # Invariants
//! - Remote calls never touch the in-memory store.

pub mod config;
pub mod user_api;
