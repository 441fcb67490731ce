//! Shopping list use-case service.
//!
//! # Responsibility
//! - Provide the client-facing operations: list, add, toggle, clear checked,
//!   clear all.
//! - Apply name normalization and display ordering on top of any `ItemStore`.
//! - Degrade unreadable stores to an empty list instead of failing reads.
//!
//! # Invariants
//! - Listing is sorted by name, case-sensitive ordinal ascending, stable.
//! - `add_item` never writes when the name is rejected.
//! - Toggling an unknown name is `UpdateOutcome::NoMatch`, not an error.
//! - `clear_checked` is read-then-write over the whole collection. Another
//!   client's write that lands between the two calls is overwritten
//!   (last-full-write-wins). No lock or version check guards that window.

use crate::model::item::{Item, ItemValidationError};
use crate::store::{ItemStore, StoreError, UpdateOutcome};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for list use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Rejected user input. Nothing was written.
    InvalidInput(ItemValidationError),
    /// Backing medium failed a write. Not retried.
    WriteFailed(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::WriteFailed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::WriteFailed(err) => Some(err),
        }
    }
}

impl From<ItemValidationError> for ServiceError {
    fn from(value: ItemValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::WriteFailed(value)
    }
}

/// Sorted list split the way clients render it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    /// Unchecked items, sorted by name.
    pub to_buy: Vec<Item>,
    /// Checked items, sorted by name.
    pub in_cart: Vec<Item>,
}

impl ListView {
    /// Splits an already sorted list, keeping relative order in each half.
    pub fn from_sorted(items: Vec<Item>) -> Self {
        let (in_cart, to_buy): (Vec<Item>, Vec<Item>) =
            items.into_iter().partition(|item| item.checked);
        Self { to_buy, in_cart }
    }

    pub fn to_buy_count(&self) -> usize {
        self.to_buy.len()
    }

    pub fn in_cart_count(&self) -> usize {
        self.in_cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_buy.is_empty() && self.in_cart.is_empty()
    }
}

/// List service facade over an injected store.
pub struct ListService<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> ListService<S> {
    /// Creates a service using the provided store handle.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a fresh snapshot of the list sorted for display.
    ///
    /// An unreadable store yields an empty list; the failure is only logged.
    pub fn list_sorted(&self) -> Vec<Item> {
        let mut items = self.load_or_empty("list");
        items.sort_by(Item::cmp_by_name);
        items
    }

    /// Returns the sorted snapshot split into to-buy and in-cart halves.
    pub fn view(&self) -> ListView {
        ListView::from_sorted(self.list_sorted())
    }

    /// Adds one unchecked item after normalizing its name.
    ///
    /// # Contract
    /// - Blank input fails with `ServiceError::InvalidInput`, no write.
    /// - No uniqueness check: the same name added twice yields two rows.
    /// - Returns the item as persisted.
    pub fn add_item(&self, raw_name: &str) -> Result<Item, ServiceError> {
        let item = match Item::new(raw_name) {
            Ok(item) => item,
            Err(err) => {
                warn!("event=item_add module=service status=rejected error_code=invalid_input");
                return Err(err.into());
            }
        };

        self.store
            .append_one(&item)
            .map_err(|err| write_error("item_add", err))?;
        info!(
            "event=item_add module=service status=ok name_len={}",
            item.name.chars().count()
        );
        Ok(item)
    }

    /// Sets `checked` on the first item named exactly `name`.
    ///
    /// Idempotent. Unknown names return `Ok(UpdateOutcome::NoMatch)` so a
    /// toggle racing with a delete from another client stays harmless.
    pub fn set_checked(&self, name: &str, checked: bool) -> Result<UpdateOutcome, ServiceError> {
        let outcome = self
            .store
            .update_checked(name, checked)
            .map_err(|err| write_error("item_toggle", err))?;
        match outcome {
            UpdateOutcome::Applied => {
                info!("event=item_toggle module=service status=ok checked={checked}")
            }
            UpdateOutcome::NoMatch => {
                info!("event=item_toggle module=service status=no_match checked={checked}")
            }
        }
        Ok(outcome)
    }

    /// Removes every checked item.
    ///
    /// Reads the collection, then rewrites it with the unchecked items. An
    /// unreadable store is treated as empty, so the rewrite leaves an empty
    /// collection behind.
    pub fn clear_checked(&self) -> Result<(), ServiceError> {
        let snapshot = self.load_or_empty("clear_checked");
        self.clear_checked_from(&snapshot)
    }

    /// Write half of `clear_checked`: persists the unchecked items of
    /// `snapshot`, replacing whatever the store currently holds.
    ///
    /// Items written by other clients after `snapshot` was read are lost.
    pub fn clear_checked_from(&self, snapshot: &[Item]) -> Result<(), ServiceError> {
        let kept: Vec<Item> = snapshot
            .iter()
            .filter(|item| !item.checked)
            .cloned()
            .collect();
        self.store
            .replace_all(&kept)
            .map_err(|err| write_error("clear_checked", err))?;
        info!(
            "event=clear_checked module=service status=ok removed={} kept={}",
            snapshot.len() - kept.len(),
            kept.len()
        );
        Ok(())
    }

    /// Removes every item unconditionally.
    pub fn clear_all(&self) -> Result<(), ServiceError> {
        self.store
            .clear()
            .map_err(|err| write_error("clear_all", err))?;
        info!("event=clear_all module=service status=ok");
        Ok(())
    }

    fn load_or_empty(&self, event: &str) -> Vec<Item> {
        match self.store.load_all() {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "event={} module=service status=degraded error_code={} error={}",
                    event,
                    err.code(),
                    err
                );
                Vec::new()
            }
        }
    }
}

fn write_error(event: &str, err: StoreError) -> ServiceError {
    error!(
        "event={} module=service status=error error_code={} error={}",
        event,
        err.code(),
        err
    );
    err.into()
}

#[cfg(test)]
mod tests {
    use super::ListView;
    use crate::model::item::Item;

    #[test]
    fn list_view_partitions_and_keeps_order() {
        let view = ListView::from_sorted(vec![
            Item::with_state("Apple", true),
            Item::with_state("Bread", false),
            Item::with_state("Cider", true),
            Item::with_state("Dates", false),
        ]);

        assert_eq!(
            view.to_buy,
            vec![
                Item::with_state("Bread", false),
                Item::with_state("Dates", false)
            ]
        );
        assert_eq!(
            view.in_cart,
            vec![
                Item::with_state("Apple", true),
                Item::with_state("Cider", true)
            ]
        );
        assert_eq!(view.to_buy_count(), 2);
        assert_eq!(view.in_cart_count(), 2);
        assert!(!view.is_empty());
        assert!(ListView::default().is_empty());
    }
}
