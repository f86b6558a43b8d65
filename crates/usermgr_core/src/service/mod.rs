//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate remote and store calls into UI-level actions.
//! - Keep adapters (CLI, UI shells) free of business rules.

pub mod user_service;
