//! Idempotent maintenance of the destination table: schema, age sweep,
//! count trim.

use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::consts::DATE_FORMAT;
use crate::error::StoreError;
use crate::store::SqlStore;

/// Create the table, a unique index on `uid_field`, and a secondary index on
/// `time_field` (skipped when the two are the same column). Does nothing if
/// the table already exists.
pub(crate) fn check_create_table(
    store: &dyn SqlStore,
    table: &str,
    schema: &[(&str, &str)],
    uid_field: &str,
    time_field: &str,
) -> Result<(), StoreError> {
    if store.table_exists(table)? {
        info!("table {table} already exists");
        return Ok(());
    }
    info!("creating table {table}");
    store.create_table(table, schema)?;
    store.create_index(table, uid_field, true)?;
    if uid_field != time_field {
        store.create_index(table, time_field, false)?;
    }
    Ok(())
}

/// Delete rows whose `time_field` is strictly older than `cutoff`; returns
/// the count. A missing table is logged and counts as zero expired rows so
/// the rest of the run can proceed.
pub(crate) fn clean_old_rows(
    store: &dyn SqlStore,
    table: &str,
    time_field: &str,
    cutoff: NaiveDateTime,
) -> Result<u64, StoreError> {
    if !store.table_exists(table)? {
        error!("{table} table does not exist yet");
        return Ok(0);
    }
    let predicate = format!("{} < '{}'", time_field, cutoff.format(DATE_FORMAT));
    store.delete_rows(table, &predicate)
}

/// Keep only the newest `max_rows` rows by `time_field`; returns how many
/// were dropped.
pub(crate) fn delete_excess_rows(
    store: &dyn SqlStore,
    table: &str,
    row_id_field: &str,
    time_field: &str,
    max_rows: usize,
) -> Result<u64, StoreError> {
    let order = format!("{time_field} desc");
    let ids = store.field_values(table, row_id_field, Some(&order))?;
    let mut num_dropped = 0;
    if ids.len() > max_rows {
        num_dropped = store.delete_rows_by_ids(table, row_id_field, &ids[max_rows..])?;
    }
    if num_dropped > 0 {
        info!("dropped {num_dropped} old rows from {table}");
    }
    Ok(num_dropped)
}
