//! Destination-store access: the SQL seam, the Carto client, maintenance.

pub(crate) mod carto;
pub(crate) mod maintain;
#[cfg(test)]
pub(crate) mod mock;

use crate::error::StoreError;

/// SQL operations the sync run needs from the destination store.
///
/// Mirrors the Carto SQL API surface; tests substitute an in-memory store.
pub(crate) trait SqlStore {
    fn table_exists(&self, table: &str) -> Result<bool, StoreError>;

    fn create_table(&self, table: &str, schema: &[(&str, &str)]) -> Result<(), StoreError>;

    /// `unique` turns the index into a uniqueness constraint on `field`.
    fn create_index(&self, table: &str, field: &str, unique: bool) -> Result<(), StoreError>;

    /// Delete rows matching a SQL predicate; returns the number deleted.
    fn delete_rows(&self, table: &str, predicate: &str) -> Result<u64, StoreError>;

    /// All values of one column, optionally ordered by an `ORDER BY` body.
    fn field_values(
        &self,
        table: &str,
        field: &str,
        order: Option<&str>,
    ) -> Result<Vec<String>, StoreError>;

    /// Delete the rows whose `field` value appears in `ids`; returns the
    /// number deleted.
    fn delete_rows_by_ids(
        &self,
        table: &str,
        field: &str,
        ids: &[String],
    ) -> Result<u64, StoreError>;

    /// Batched insert of rows shaped like `schema`.
    fn insert_rows(
        &self,
        table: &str,
        schema: &[(&str, &str)],
        rows: &[Vec<String>],
    ) -> Result<(), StoreError>;

    fn drop_table(&self, table: &str) -> Result<(), StoreError>;
}
