//! In-process store.
//!
//! Holds the collection in a `Mutex<Vec<Item>>`. The `reachable` switch makes
//! every call fail the way a disconnected backend would, which is how the
//! degraded read path is exercised without touching disk.

use super::{apply_checked, ItemStore, StoreError, StoreResult, UpdateOutcome};
use crate::model::item::Item;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Volatile store for tests and single-process use.
#[derive(Debug)]
pub struct MemoryStore {
    items: Mutex<Vec<Item>>,
    reachable: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Creates a store pre-populated with `items` in the given order.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            reachable: AtomicBool::new(true),
        }
    }

    /// Toggles simulated reachability of the backing medium.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    fn lock_for_read(&self) -> StoreResult<MutexGuard<'_, Vec<Item>>> {
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("memory store is unreachable"));
        }
        self.items
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }

    fn lock_for_write(&self) -> StoreResult<MutexGuard<'_, Vec<Item>>> {
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(StoreError::write_failed("memory store is unreachable"));
        }
        self.items
            .lock()
            .map_err(|_| StoreError::write_failed("memory store lock poisoned"))
    }
}

impl ItemStore for MemoryStore {
    fn load_all(&self) -> StoreResult<Vec<Item>> {
        Ok(self.lock_for_read()?.clone())
    }

    fn append_one(&self, item: &Item) -> StoreResult<()> {
        self.lock_for_write()?.push(item.clone());
        Ok(())
    }

    fn update_checked(&self, name: &str, checked: bool) -> StoreResult<UpdateOutcome> {
        let mut items = self.lock_for_write()?;
        Ok(apply_checked(&mut items, name, checked))
    }

    fn replace_all(&self, items: &[Item]) -> StoreResult<()> {
        *self.lock_for_write()? = items.to_vec();
        Ok(())
    }
}
