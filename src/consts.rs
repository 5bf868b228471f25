/// Remote directory publishing the GRACE mass-variability time series.
pub(crate) const SOURCE_URL: &str =
    "https://podaac-ftp.jpl.nasa.gov/allData/tellus/L3/mascon/RL05/JPL/CRI/mass_variability_time_series/";

/// Only listing entries with this extension are dataset candidates.
pub(crate) const FILENAME_SUFFIX: &str = ".txt";

/// Marker distinguishing the Antarctica series from its siblings.
pub(crate) const FILENAME_CONTAINS: &str = "antarctica";

/// Prefix of header lines in the data file, skipped during parsing.
pub(crate) const HEADER_PREFIX: &str = "HDR";

/// Destination table and its fixed column schema.
pub(crate) const CARTO_TABLE: &str = "cli_041_antarctic_ice";
pub(crate) const SCHEMA: &[(&str, &str)] = &[
    ("date", "timestamp"),
    ("mass", "numeric"),
    ("uncertainty", "text"),
];

/// Column holding the record identity and the column rows are aged/trimmed on.
pub(crate) const UID_FIELD: &str = "date";
pub(crate) const TIME_FIELD: &str = "date";

/// Carto's implicit primary key, used for the count trim.
pub(crate) const ROW_ID_FIELD: &str = "cartodb_id";

/// Retention ceilings: newest rows kept, and nothing older than 20 years.
pub(crate) const MAX_ROWS: usize = 10_000_000;
pub(crate) const MAX_AGE_DAYS: i64 = 365 * 20;

/// Resilient-fetch budget: overall deadline and fixed delay between attempts.
pub(crate) const TIMEOUT_SECS: u64 = 300;
pub(crate) const RETRY_DELAY_SECS: u64 = 5;

/// Timestamp format used for record identifiers: "2016-07-02 00:00:00"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
