//! Dataset records: the typed row, fractional-year dates, line parsing.

pub(crate) mod date;
pub(crate) mod parser;

pub(crate) use date::decimal_year_to_datetime;
pub(crate) use parser::collect_new_records;

use chrono::NaiveDateTime;

use crate::consts::DATE_FORMAT;

/// One measurement row destined for the destination table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record {
    pub(crate) date: NaiveDateTime,
    pub(crate) mass: f64,
    pub(crate) uncertainty: String,
}

impl Record {
    /// Identifier the row is deduplicated under: the formatted date.
    pub(crate) fn uid(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Column values in schema order (date, mass, uncertainty).
    pub(crate) fn row(&self) -> Vec<String> {
        vec![self.uid(), self.mass.to_string(), self.uncertainty.clone()]
    }
}
