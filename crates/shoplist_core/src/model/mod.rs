//! Domain model for the shared shopping list.
//!
//! # Responsibility
//! - Define the canonical item record shared by every store backend.
//!
//! # Invariants
//! - `Item::name` is the only identity; there are no generated IDs.
//! - Duplicate names are representable and never merged.

pub mod item;
