//! Store contracts and backend implementations.
//!
//! # Responsibility
//! - Define the whole-collection persistence contract used by the service.
//! - Translate backend failures (I/O, JSON, SQLite) into `StoreError`.
//!
//! # Invariants
//! - Every write is durable when the call returns; there is no buffering.
//! - Persisted order is insertion order; stores never sort.
//! - `update_checked` touches only the first record whose name matches exactly.
//! - No lock is held between calls. Concurrent whole-collection rewrites are
//!   last-full-write-wins.

use crate::model::item::Item;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_store;
pub mod memory_store;
pub mod sheet_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend-agnostic store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backing medium could not be read (missing, corrupt, unreachable).
    Unavailable { reason: String },
    /// Backing medium rejected or failed a write.
    WriteFailed { reason: String },
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn write_failed(reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            reason: reason.into(),
        }
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "store_unavailable",
            Self::WriteFailed { .. } => "write_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "store unavailable: {reason}"),
            Self::WriteFailed { reason } => write!(f, "store write failed: {reason}"),
        }
    }
}

impl Error for StoreError {}

/// Result of an in-place update addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A record with that name exists and now holds the requested value.
    Applied,
    /// No record matched; nothing was written.
    NoMatch,
}

/// Persistence contract for the shopping list collection.
pub trait ItemStore {
    /// Returns every persisted item in persisted order.
    fn load_all(&self) -> StoreResult<Vec<Item>>;
    /// Appends one record without checking for duplicates.
    fn append_one(&self, item: &Item) -> StoreResult<()>;
    /// Sets `checked` on the first record named exactly `name`.
    fn update_checked(&self, name: &str, checked: bool) -> StoreResult<UpdateOutcome>;
    /// Discards the collection and persists exactly `items`.
    fn replace_all(&self, items: &[Item]) -> StoreResult<()>;

    /// Empties the collection.
    fn clear(&self) -> StoreResult<()> {
        self.replace_all(&[])
    }
}

impl<S: ItemStore + ?Sized> ItemStore for &S {
    fn load_all(&self) -> StoreResult<Vec<Item>> {
        (**self).load_all()
    }

    fn append_one(&self, item: &Item) -> StoreResult<()> {
        (**self).append_one(item)
    }

    fn update_checked(&self, name: &str, checked: bool) -> StoreResult<UpdateOutcome> {
        (**self).update_checked(name, checked)
    }

    fn replace_all(&self, items: &[Item]) -> StoreResult<()> {
        (**self).replace_all(items)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }
}

impl<S: ItemStore + ?Sized> ItemStore for Box<S> {
    fn load_all(&self) -> StoreResult<Vec<Item>> {
        (**self).load_all()
    }

    fn append_one(&self, item: &Item) -> StoreResult<()> {
        (**self).append_one(item)
    }

    fn update_checked(&self, name: &str, checked: bool) -> StoreResult<UpdateOutcome> {
        (**self).update_checked(name, checked)
    }

    fn replace_all(&self, items: &[Item]) -> StoreResult<()> {
        (**self).replace_all(items)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }
}

/// Sets `checked` on the first item named exactly `name` in an in-memory copy.
///
/// Shared by backends that rewrite the whole collection on every update.
pub(crate) fn apply_checked(items: &mut [Item], name: &str, checked: bool) -> UpdateOutcome {
    match items.iter_mut().find(|item| item.name == name) {
        Some(item) => {
            item.checked = checked;
            UpdateOutcome::Applied
        }
        None => UpdateOutcome::NoMatch,
    }
}
