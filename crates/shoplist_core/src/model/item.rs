//! Shopping list item model.
//!
//! # Responsibility
//! - Define the single persisted entity (`name` + `checked`).
//! - Own the name normalization rule applied on insert.
//!
//! # Invariants
//! - A normalized name is trimmed and never empty.
//! - Only the first character is upper-cased; the remainder is kept as typed.
//! - `checked` starts as `false` for newly added items.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors for item input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Name is empty or whitespace-only after trimming.
    EmptyName,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name cannot be empty"),
        }
    }
}

impl Error for ItemValidationError {}

/// One shopping list entry.
///
/// `name` doubles as the identity key for update-by-name operations. Items
/// read back from a store are returned as persisted; normalization only
/// happens on the add path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display text and natural key. Accepts the sheet column name on read.
    #[serde(alias = "nom")]
    pub name: String,
    /// Whether the item is already in the cart.
    #[serde(alias = "coche", default)]
    pub checked: bool,
}

impl Item {
    /// Creates an unchecked item from raw user input.
    ///
    /// # Errors
    /// - Returns `ItemValidationError::EmptyName` when `raw_name` is blank.
    pub fn new(raw_name: &str) -> Result<Self, ItemValidationError> {
        Ok(Self {
            name: normalize_item_name(raw_name)?,
            checked: false,
        })
    }

    /// Builds an item with the given fields verbatim, without normalization.
    ///
    /// Used by store backends and tests that need exact persisted values.
    pub fn with_state(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
        }
    }

    /// Display ordering: case-sensitive ordinal comparison of names.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Normalizes a raw item name: trims surrounding whitespace and upper-cases
/// the first character.
///
/// Upper-casing uses `char::to_uppercase`, so a single character may expand
/// (`ß` becomes `SS`). No locale rules are applied.
///
/// # Errors
/// - Returns `ItemValidationError::EmptyName` when nothing is left after trim.
pub fn normalize_item_name(raw_name: &str) -> Result<String, ItemValidationError> {
    let trimmed = raw_name.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return Err(ItemValidationError::EmptyName);
    };

    let mut normalized = String::with_capacity(trimmed.len());
    normalized.extend(first.to_uppercase());
    normalized.push_str(chars.as_str());
    Ok(normalized)
}
