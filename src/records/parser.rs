//! Line parsing and per-run deduplication for the dataset file.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::records::{Record, decimal_year_to_datetime};

/// Whitespace-separated columns a data line must have.
const SCHEMA_WIDTH: usize = 3;

/// Turn raw file lines into records keyed by identifier, keeping only rows
/// strictly newer than `cutoff` whose identifier is not already present.
///
/// Header lines (starting with `header_prefix`) and malformed lines are
/// skipped individually; a bad line never aborts the batch. A duplicate
/// identifier, whether already in `existing_ids` or seen earlier in the same
/// file, keeps the first occurrence and drops the rest.
pub(crate) fn collect_new_records(
    lines: &[String],
    existing_ids: &HashSet<String>,
    cutoff: NaiveDateTime,
    header_prefix: &str,
) -> HashMap<String, Record> {
    let mut new_records = HashMap::new();

    for line in lines {
        if line.is_empty() || line.starts_with(header_prefix) {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != SCHEMA_WIDTH {
            debug!("skipping line with {} tokens: {line:?}", tokens.len());
            continue;
        }
        let parsed = tokens[0].parse::<f64>().ok().and_then(decimal_year_to_datetime);
        let Some(date) = parsed else {
            debug!("skipping line with unparseable date: {line:?}");
            continue;
        };
        let Ok(mass) = tokens[1].parse::<f64>() else {
            debug!("skipping line with unparseable mass: {line:?}");
            continue;
        };
        if date <= cutoff {
            continue;
        }
        let record = Record {
            date,
            mass,
            uncertainty: tokens[2].to_string(),
        };
        let uid = record.uid();
        if existing_ids.contains(&uid) || new_records.contains_key(&uid) {
            debug!("dropping duplicate identifier {uid}");
            continue;
        }
        new_records.insert(uid, record);
    }

    new_records
}
