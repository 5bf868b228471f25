//! Fractional-year to calendar-timestamp conversion.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Convert a fractional year (e.g. `2016.5`) to the timestamp at the
/// equivalent fractional position within that calendar year.
///
/// The whole part picks the year; the remainder is scaled by the exact number
/// of seconds in that year, so leap years land differently from common years.
/// The offset is truncated to whole seconds, which keeps values just below
/// `year + 1` inside `year`. Non-finite input and out-of-range years yield
/// `None`.
pub(crate) fn decimal_year_to_datetime(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }
    let whole = value.trunc();
    if whole < f64::from(i32::MIN) || whole > f64::from(i32::MAX) {
        return None;
    }
    let year = whole as i32;
    let base = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let next = NaiveDate::from_ymd_opt(year + 1, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let year_seconds = (next - base).num_seconds() as f64;
    let offset = (year_seconds * (value - whole)).trunc() as i64;
    base.checked_add_signed(Duration::seconds(offset))
}
