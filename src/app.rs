//! Orchestration of one sync run.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};
use tracing::{debug, info};

use crate::config::Config;
use crate::consts::{ROW_ID_FIELD, SCHEMA};
use crate::error::SyncError;
use crate::fetch::{self, Transport};
use crate::records::{self, Record};
use crate::store::{SqlStore, maintain};

/// Counts reported at the end of a run.
#[derive(Debug)]
pub(crate) struct RunSummary {
    pub(crate) expired_rows: u64,
    pub(crate) previous_rows: usize,
    pub(crate) new_rows: usize,
    pub(crate) dropped_rows: u64,
}

/// Oldest timestamp kept in the table: now minus the retention window.
fn age_cutoff(max_age_days: i64) -> NaiveDateTime {
    Local::now().naive_local() - TimeDelta::days(max_age_days)
}

/// One full sync: maintain the table, fetch the dataset, insert what is new,
/// prune what is old or excess.
pub(crate) fn run(
    config: &Config,
    store: &dyn SqlStore,
    transport: &dyn Transport,
) -> Result<RunSummary, SyncError> {
    info!("BEGIN");
    let cutoff = age_cutoff(config.max_age_days);

    if config.clear_table_first && store.table_exists(&config.table)? {
        info!("clearing table {} first", config.table);
        store.drop_table(&config.table)?;
    }

    maintain::check_create_table(
        store,
        &config.table,
        SCHEMA,
        &config.uid_field,
        &config.time_field,
    )?;

    let expired_rows = maintain::clean_old_rows(store, &config.table, &config.time_field, cutoff)?;

    let existing = store.field_values(&config.table, &config.uid_field, None)?;
    let previous_rows = existing.len();
    info!("found {previous_rows} existing identifiers");
    for uid in existing.iter().take(10) {
        debug!("existing id: {uid}");
    }
    let existing_ids: HashSet<String> = existing.into_iter().collect();

    let new_rows = process_data(config, store, transport, &existing_ids, cutoff)?;

    let dropped_rows = maintain::delete_excess_rows(
        store,
        &config.table,
        ROW_ID_FIELD,
        &config.time_field,
        config.max_rows,
    )?;

    let summary = RunSummary {
        expired_rows,
        previous_rows,
        new_rows,
        dropped_rows,
    };
    info!(
        "Expired rows: {}, Previous rows: {}, New rows: {}, Dropped rows: {}, Max: {}",
        summary.expired_rows,
        summary.previous_rows,
        summary.new_rows,
        summary.dropped_rows,
        config.max_rows
    );
    info!("SUCCESS");
    Ok(summary)
}

/// Locate the dataset in the source listing, fetch it, and insert the rows
/// that are new; returns how many were inserted.
fn process_data(
    config: &Config,
    store: &dyn SqlStore,
    transport: &dyn Transport,
    existing_ids: &HashSet<String>,
    cutoff: NaiveDateTime,
) -> Result<usize, SyncError> {
    let listing = transport.fetch_text(&config.source_url)?;
    let filename = fetch::select_data_filename(
        listing.lines(),
        &config.filename_suffix,
        &config.filename_contains,
    );
    let url = fetch::join_url(&config.source_url, &filename);
    let lines = fetch::fetch_with_retry(
        transport,
        &url,
        Duration::from_secs(config.timeout_secs),
        Duration::from_secs(config.retry_delay_secs),
        config.strict,
    )?;

    let new_records =
        records::collect_new_records(&lines, existing_ids, cutoff, &config.header_prefix);
    if new_records.is_empty() {
        info!("no new rows to insert");
        return Ok(0);
    }

    let mut batch: Vec<&Record> = new_records.values().collect();
    batch.sort_by_key(|record| record.date);
    let rows: Vec<Vec<String>> = batch.iter().map(|record| record.row()).collect();
    info!("inserting {} new rows", rows.len());
    store.insert_rows(&config.table, SCHEMA, &rows)?;
    Ok(rows.len())
}
