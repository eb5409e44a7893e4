//! Repository layer for coil CRUD and aggregate queries
//!
//! Provides high-level database operations for the coils table. Every
//! operation is a single statement; the store-handle is passed in
//! explicitly by the caller, never reached through globals.

use chrono::{NaiveDateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Row};

use super::database::Database;
use super::error::StorageError;
use crate::coil::filter::{BoundValue, ColumnBounds};
use crate::coil::stats::{GapRow, StatsWindow, WindowAggregate};
use crate::coil::{format_timestamp, parse_timestamp, Coil, NewCoil};

impl Database {
    /// Insert a new coil, stamping `created_at` with the current UTC instant
    ///
    /// # Returns
    /// The store-assigned id of the inserted row
    pub fn insert_coil(&self, new_coil: &NewCoil) -> Result<i64, StorageError> {
        let created_at = format_timestamp(Utc::now().naive_utc());
        self.connection().execute(
            "INSERT INTO coils (length, weight, created_at) VALUES (?1, ?2, ?3)",
            params![new_coil.length, new_coil.weight, created_at],
        )?;
        Ok(self.connection().last_insert_rowid())
    }

    /// Check if a coil with the given id exists
    pub fn coil_exists(&self, id: i64) -> Result<bool, StorageError> {
        let count: i64 = self.connection().query_row(
            "SELECT COUNT(*) FROM coils WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Check if a coil has already been soft-deleted
    pub fn is_coil_deleted(&self, id: i64) -> Result<bool, StorageError> {
        let count: i64 = self.connection().query_row(
            "SELECT COUNT(*) FROM coils WHERE id = ?1 AND deleted_at IS NOT NULL",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Soft-delete a coil by stamping `deleted_at`
    ///
    /// The statement re-checks `deleted_at IS NULL`, so a coil deleted by
    /// a concurrent request updates zero rows instead of being stamped
    /// twice.
    ///
    /// # Returns
    /// The number of rows updated (0 or 1)
    pub fn soft_delete_coil(
        &self,
        id: i64,
        deleted_at: NaiveDateTime,
    ) -> Result<usize, StorageError> {
        let changed = self.connection().execute(
            "UPDATE coils SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            params![format_timestamp(deleted_at), id],
        )?;
        Ok(changed)
    }

    /// List coils matching the conjunction of the given column bounds
    ///
    /// Each entry renders as `col >= ? AND col <= ?`; an empty list
    /// returns every row. Row order is the store default.
    pub fn list_coils(&self, bounds: &[ColumnBounds]) -> Result<Vec<Coil>, StorageError> {
        let mut sql = String::from("SELECT id, length, weight, created_at, deleted_at FROM coils");
        let mut sql_params: Vec<Value> = Vec::with_capacity(bounds.len() * 2);

        if !bounds.is_empty() {
            let conditions: Vec<String> = bounds
                .iter()
                .map(|b| format!("{col} >= ? AND {col} <= ?", col = b.column))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));

            for b in bounds {
                sql_params.push(bound_param(&b.lower));
                sql_params.push(bound_param(&b.upper));
            }
        }

        let mut stmt = self.connection().prepare(&sql)?;
        let coils = stmt
            .query_map(params_from_iter(sql_params), map_coil_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(coils)
    }

    /// Aggregate statistics over coils created within the window
    ///
    /// # Returns
    /// `None` when no row falls inside the window; the caller decides how
    /// to surface the empty case.
    pub fn window_aggregate(
        &self,
        window: &StatsWindow,
    ) -> Result<Option<WindowAggregate>, StorageError> {
        let aggregate = self.connection().query_row(
            "SELECT COUNT(*),
                    SUM(CASE WHEN deleted_at IS NOT NULL THEN 1 ELSE 0 END),
                    SUM(length), SUM(weight),
                    MAX(length), MIN(length), MAX(weight), MIN(weight)
             FROM coils
             WHERE created_at >= ?1 AND created_at <= ?2",
            params![format_timestamp(window.from), format_timestamp(window.to)],
            |row| {
                let amount: i64 = row.get(0)?;
                if amount == 0 {
                    return Ok(None);
                }
                Ok(Some(WindowAggregate {
                    amount,
                    deleted_amount: row.get(1)?,
                    total_length: row.get(2)?,
                    total_weight: row.get(3)?,
                    max_length: row.get(4)?,
                    min_length: row.get(5)?,
                    max_weight: row.get(6)?,
                    min_weight: row.get(7)?,
                }))
            },
        )?;
        Ok(aggregate)
    }

    /// Rows created within the window, ordered by id for gap pairing
    pub fn window_rows(&self, window: &StatsWindow) -> Result<Vec<GapRow>, StorageError> {
        let mut stmt = self.connection().prepare(
            "SELECT id, created_at, deleted_at FROM coils
             WHERE created_at >= ?1 AND created_at <= ?2
             ORDER BY id",
        )?;

        let rows = stmt
            .query_map(
                params![format_timestamp(window.from), format_timestamp(window.to)],
                |row| {
                    Ok(GapRow {
                        id: row.get(0)?,
                        created_at: timestamp_column(row, 1)?,
                        deleted_at: optional_timestamp_column(row, 2)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

fn bound_param(value: &BoundValue) -> Value {
    match value {
        BoundValue::Int(v) => Value::Integer(*v),
        BoundValue::Timestamp(ts) => Value::Text(format_timestamp(*ts)),
    }
}

fn map_coil_row(row: &Row<'_>) -> rusqlite::Result<Coil> {
    Ok(Coil {
        id: row.get(0)?,
        length: row.get(1)?,
        weight: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
        deleted_at: optional_timestamp_column(row, 4)?,
    })
}

fn timestamp_column(row: &Row<'_>, index: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(index)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn optional_timestamp_column(
    row: &Row<'_>,
    index: usize,
) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(index)?;
    match raw {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))),
        None => Ok(None),
    }
}
