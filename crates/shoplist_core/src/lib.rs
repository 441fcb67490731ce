//! Core domain logic for the shared shopping list.
//! This crate is the single source of truth for list invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{normalize_item_name, Item, ItemValidationError};
pub use service::list_service::{ListService, ListView, ServiceError};
pub use store::json_store::JsonFileStore;
pub use store::memory_store::MemoryStore;
pub use store::sheet_store::{SqliteSheetStore, SHEET_HEADER};
pub use store::{ItemStore, StoreError, StoreResult, UpdateOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
