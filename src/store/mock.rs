//! In-memory stand-in for the destination store, shared by maintainer and
//! orchestrator tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::store::SqlStore;

fn missing_table() -> StoreError {
    StoreError::Api {
        status: 404,
        body: "relation does not exist".to_string(),
    }
}

/// Rows keyed by their uid (column 0), which in this store doubles as the
/// row id. Keys are formatted timestamps, so map order is chronological.
pub(crate) struct MockStore {
    pub(crate) table: RefCell<Option<BTreeMap<String, Vec<String>>>>,
    pub(crate) calls: RefCell<Vec<String>>,
}

impl MockStore {
    /// An existing, empty table.
    pub(crate) fn new() -> Self {
        Self {
            table: RefCell::new(Some(BTreeMap::new())),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn without_table() -> Self {
        Self {
            table: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn with_rows(rows: &[[&str; 3]]) -> Self {
        let store = Self::new();
        {
            let mut table = store.table.borrow_mut();
            let map = table.as_mut().unwrap();
            for row in rows {
                map.insert(row[0].to_string(), row.iter().map(|v| v.to_string()).collect());
            }
        }
        store
    }

    pub(crate) fn row_count(&self) -> usize {
        self.table.borrow().as_ref().map_or(0, BTreeMap::len)
    }

    /// Uids in chronological order.
    pub(crate) fn uids(&self) -> Vec<String> {
        self.table
            .borrow()
            .as_ref()
            .map_or_else(Vec::new, |map| map.keys().cloned().collect())
    }

    /// Mutating calls in invocation order, for asserting what ran.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SqlStore for MockStore {
    fn table_exists(&self, _table: &str) -> Result<bool, StoreError> {
        Ok(self.table.borrow().is_some())
    }

    fn create_table(&self, table: &str, _schema: &[(&str, &str)]) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(format!("create_table {table}"));
        *self.table.borrow_mut() = Some(BTreeMap::new());
        Ok(())
    }

    fn create_index(&self, _table: &str, field: &str, unique: bool) -> Result<(), StoreError> {
        self.calls
            .borrow_mut()
            .push(format!("create_index {field} unique={unique}"));
        Ok(())
    }

    fn delete_rows(&self, _table: &str, predicate: &str) -> Result<u64, StoreError> {
        self.calls.borrow_mut().push(format!("delete_rows {predicate}"));
        let mut table = self.table.borrow_mut();
        let rows = table.as_mut().ok_or_else(missing_table)?;
        // The maintainer only ever issues "<field> < '<timestamp>'", and the
        // timestamp format compares chronologically as a string.
        let (_, rest) = predicate.split_once(" < '").expect("unsupported predicate");
        let value = rest.trim_end_matches('\'');
        let before = rows.len();
        rows.retain(|uid, _| uid.as_str() >= value);
        Ok((before - rows.len()) as u64)
    }

    fn field_values(
        &self,
        _table: &str,
        field: &str,
        order: Option<&str>,
    ) -> Result<Vec<String>, StoreError> {
        let table = self.table.borrow();
        let rows = table.as_ref().ok_or_else(missing_table)?;
        assert!(
            field == "date" || field == "cartodb_id",
            "unsupported field {field}"
        );
        let ascending: Vec<String> = rows.keys().cloned().collect();
        Ok(match order {
            Some(order) if order.ends_with("desc") => ascending.into_iter().rev().collect(),
            _ => ascending,
        })
    }

    fn delete_rows_by_ids(
        &self,
        _table: &str,
        _field: &str,
        ids: &[String],
    ) -> Result<u64, StoreError> {
        self.calls.borrow_mut().push(format!("delete_ids {}", ids.len()));
        let mut table = self.table.borrow_mut();
        let rows = table.as_mut().ok_or_else(missing_table)?;
        let before = rows.len();
        for id in ids {
            rows.remove(id);
        }
        Ok((before - rows.len()) as u64)
    }

    fn insert_rows(
        &self,
        _table: &str,
        _schema: &[(&str, &str)],
        rows: &[Vec<String>],
    ) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(format!("insert_rows {}", rows.len()));
        let mut table = self.table.borrow_mut();
        let map = table.as_mut().ok_or_else(missing_table)?;
        for row in rows {
            map.insert(row[0].clone(), row.clone());
        }
        Ok(())
    }

    fn drop_table(&self, _table: &str) -> Result<(), StoreError> {
        self.calls.borrow_mut().push("drop_table".to_string());
        let mut table = self.table.borrow_mut();
        if table.is_none() {
            return Err(missing_table());
        }
        *table = None;
        Ok(())
    }
}
