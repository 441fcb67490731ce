//! Tabular sheet store on SQLite.
//!
//! # Responsibility
//! - Persist the collection as a two-column sheet (`nom`, `coche`).
//! - Keep SQL and cell encoding details inside the store boundary.
//!
//! # Invariants
//! - Column order of the sheet is exactly `SHEET_HEADER`.
//! - `coche` cells are written as the literal strings `TRUE` / `FALSE`.
//! - A cell reads as checked only when its upper-cased text is `TRUE`.
//! - Row order is `row_num ASC`, which follows insertion order.
//! - `replace_all` runs in one immediate transaction.

use super::{ItemStore, StoreError, StoreResult, UpdateOutcome};
use crate::db::migrations::latest_version;
use crate::model::item::Item;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

/// Header row of the tabular layout, in column order.
pub const SHEET_HEADER: [&str; 2] = ["nom", "coche"];

const SHEET_TABLE: &str = "sheet";
const CELL_TRUE: &str = "TRUE";
const CELL_FALSE: &str = "FALSE";

/// SQLite-backed sheet store.
pub struct SqliteSheetStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSheetStore<'conn> {
    /// Creates a store from a migrated connection.
    ///
    /// # Errors
    /// - `StoreError::Unavailable` when the schema version or sheet columns
    ///   do not match what this binary expects.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_sheet_connection_ready(conn).map_err(StoreError::unavailable)?;
        Ok(Self { conn })
    }

    /// Returns the sheet header as stored in the schema, in column order.
    pub fn header(&self) -> StoreResult<Vec<String>> {
        let columns = table_columns(self.conn, SHEET_TABLE)
            .map_err(|err| StoreError::unavailable(err.to_string()))?;
        Ok(columns
            .into_iter()
            .filter(|column| SHEET_HEADER.contains(&column.as_str()))
            .collect())
    }
}

impl ItemStore for SqliteSheetStore<'_> {
    fn load_all(&self) -> StoreResult<Vec<Item>> {
        let read = || -> rusqlite::Result<Vec<Item>> {
            let mut stmt = self.conn.prepare(
                "SELECT nom, coche
                 FROM sheet
                 ORDER BY row_num ASC;",
            )?;
            let mut rows = stmt.query([])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(parse_sheet_row(row)?);
            }
            Ok(items)
        };

        read().map_err(|err| StoreError::unavailable(format!("failed to read sheet: {err}")))
    }

    fn append_one(&self, item: &Item) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO sheet (nom, coche) VALUES (?1, ?2);",
                params![item.name.as_str(), bool_to_cell(item.checked)],
            )
            .map_err(|err| StoreError::write_failed(format!("failed to append row: {err}")))?;
        Ok(())
    }

    fn update_checked(&self, name: &str, checked: bool) -> StoreResult<UpdateOutcome> {
        let changed = self
            .conn
            .execute(
                "UPDATE sheet
                 SET coche = ?1
                 WHERE row_num = (
                    SELECT row_num
                    FROM sheet
                    WHERE nom = ?2
                    ORDER BY row_num ASC
                    LIMIT 1
                 );",
                params![bool_to_cell(checked), name],
            )
            .map_err(|err| StoreError::write_failed(format!("failed to update cell: {err}")))?;

        if changed == 0 {
            return Ok(UpdateOutcome::NoMatch);
        }
        Ok(UpdateOutcome::Applied)
    }

    fn replace_all(&self, items: &[Item]) -> StoreResult<()> {
        let rewrite = || -> rusqlite::Result<()> {
            let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
            tx.execute("DELETE FROM sheet;", [])?;
            {
                let mut insert = tx.prepare("INSERT INTO sheet (nom, coche) VALUES (?1, ?2);")?;
                for item in items {
                    insert.execute(params![item.name.as_str(), bool_to_cell(item.checked)])?;
                }
            }
            tx.commit()
        };

        rewrite().map_err(|err| StoreError::write_failed(format!("failed to rewrite sheet: {err}")))
    }

    fn clear(&self) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM sheet;", [])
            .map_err(|err| StoreError::write_failed(format!("failed to clear sheet: {err}")))?;
        Ok(())
    }
}

fn parse_sheet_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    let name: String = row.get("nom")?;
    let cell: Option<String> = row.get("coche")?;
    Ok(Item::with_state(name, cell_to_bool(cell.as_deref())))
}

/// Encodes a checked flag as a sheet cell.
pub fn bool_to_cell(value: bool) -> &'static str {
    if value {
        CELL_TRUE
    } else {
        CELL_FALSE
    }
}

/// Decodes a sheet cell; anything other than `TRUE` (any case) is unchecked.
pub fn cell_to_bool(cell: Option<&str>) -> bool {
    cell.is_some_and(|value| value.trim().eq_ignore_ascii_case(CELL_TRUE))
}

fn ensure_sheet_connection_ready(conn: &Connection) -> Result<(), String> {
    let expected_version = latest_version();
    let actual_version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(|err| err.to_string())?;
    if actual_version != expected_version {
        return Err(format!(
            "sheet store requires schema version {expected_version}, got {actual_version}"
        ));
    }

    let columns = table_columns(conn, SHEET_TABLE).map_err(|err| err.to_string())?;
    if columns.is_empty() {
        return Err(format!("sheet store requires table `{SHEET_TABLE}`"));
    }
    for column in SHEET_HEADER {
        if !columns.iter().any(|current| current == column) {
            return Err(format!(
                "sheet store requires column `{column}` in table `{SHEET_TABLE}`"
            ));
        }
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get(1)?);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::{bool_to_cell, cell_to_bool};

    #[test]
    fn cells_use_uppercase_literals() {
        assert_eq!(bool_to_cell(true), "TRUE");
        assert_eq!(bool_to_cell(false), "FALSE");
    }

    #[test]
    fn cell_parsing_is_lenient_on_case_only() {
        assert!(cell_to_bool(Some("TRUE")));
        assert!(cell_to_bool(Some("true")));
        assert!(cell_to_bool(Some(" True ")));
        assert!(!cell_to_bool(Some("FALSE")));
        assert!(!cell_to_bool(Some("yes")));
        assert!(!cell_to_bool(Some("1")));
        assert!(!cell_to_bool(None));
    }
}
