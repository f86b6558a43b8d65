//! Domain model for user records.
//!
//! # Responsibility
//! - Define the canonical user shape shared by store, remote and service.
//! - Own the validation rules a candidate must pass before insertion.
//!
//! # Invariants
//! - Identifier provenance is explicit through `RecordId`.
//! - Validation reports all violated rules, never just the first.

pub mod user;
pub mod validation;
