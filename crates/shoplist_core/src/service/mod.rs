//! Core use-case services.
//!
//! # Responsibility
//! - Compose store primitives into the client-facing list operations.
//! - Keep CLI and other clients decoupled from store backends.

pub mod list_service;
