//! Client for the Carto SQL API.
//!
//! Every operation is a form-encoded POST of `q` (the SQL statement) and
//! `api_key` to `{endpoint}/api/v2/sql`; adding `format=csv` turns a SELECT
//! into a CSV dump. JSON responses carry `total_rows` for statements that
//! touch rows.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::StoreError;
use crate::store::SqlStore;

/// Rows per INSERT statement; larger payloads get rejected by the API.
const INSERT_CHUNK: usize = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// The full cartodb_id dump can exceed ureq's default 10 MB body cap.
const CSV_BODY_LIMIT: u64 = 512 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct SqlResponse {
    #[serde(default)]
    total_rows: u64,
}

pub(crate) struct CartoClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
}

impl CartoClient {
    /// `api_base` overrides the default `https://{user}.carto.com` host, for
    /// on-prem endpoints.
    pub(crate) fn new(user: &str, api_key: &str, api_base: Option<&str>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            endpoint: endpoint_for(user, api_base),
            api_key: api_key.to_string(),
        }
    }

    /// POST one statement; non-2xx responses become `StoreError::Api`.
    fn send(&self, q: &str, format: Option<&str>) -> Result<ureq::Body, StoreError> {
        debug!("carto query: {q}");
        let mut form = vec![("q", q), ("api_key", self.api_key.as_str())];
        if let Some(format) = format {
            form.push(("format", format));
        }
        let response = self
            .agent
            .post(&self.endpoint)
            .config()
            .http_status_as_error(false)
            .build()
            .send_form(form)?;
        let status = response.status();
        let mut body = response.into_body();
        if !status.is_success() {
            let text = body.read_to_string().unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(body)
    }

    fn execute(&self, q: &str) -> Result<SqlResponse, StoreError> {
        let mut body = self.send(q, None)?;
        let parsed = serde_json::from_reader(body.as_reader())?;
        Ok(parsed)
    }

    /// Run a SELECT as a CSV dump, dropping the header line.
    fn query_csv(&self, q: &str) -> Result<Vec<String>, StoreError> {
        let mut body = self.send(q, Some("csv"))?;
        let text = body.with_config().limit(CSV_BODY_LIMIT).read_to_string()?;
        Ok(text
            .lines()
            .skip(1)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl SqlStore for CartoClient {
    fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        match self.execute(&format!("SELECT * FROM \"{table}\" LIMIT 0")) {
            Ok(_) => Ok(true),
            Err(StoreError::Api { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create_table(&self, table: &str, schema: &[(&str, &str)]) -> Result<(), StoreError> {
        self.execute(&create_table_sql(table, schema))?;
        Ok(())
    }

    fn create_index(&self, table: &str, field: &str, unique: bool) -> Result<(), StoreError> {
        self.execute(&create_index_sql(table, field, unique))?;
        Ok(())
    }

    fn delete_rows(&self, table: &str, predicate: &str) -> Result<u64, StoreError> {
        let response = self.execute(&format!("DELETE FROM \"{table}\" WHERE {predicate}"))?;
        Ok(response.total_rows)
    }

    fn field_values(
        &self,
        table: &str,
        field: &str,
        order: Option<&str>,
    ) -> Result<Vec<String>, StoreError> {
        let order_sql = match order {
            Some(order) => format!(" ORDER BY {order}"),
            None => String::new(),
        };
        self.query_csv(&format!("SELECT {field} FROM \"{table}\"{order_sql}"))
    }

    fn delete_rows_by_ids(
        &self,
        table: &str,
        field: &str,
        ids: &[String],
    ) -> Result<u64, StoreError> {
        let response = self.execute(&format!(
            "DELETE FROM \"{table}\" WHERE {field} IN ({})",
            ids.join(",")
        ))?;
        Ok(response.total_rows)
    }

    fn insert_rows(
        &self,
        table: &str,
        schema: &[(&str, &str)],
        rows: &[Vec<String>],
    ) -> Result<(), StoreError> {
        for chunk in rows.chunks(INSERT_CHUNK) {
            self.execute(&insert_sql(table, schema, chunk))?;
        }
        Ok(())
    }

    fn drop_table(&self, table: &str) -> Result<(), StoreError> {
        self.execute(&format!("DROP TABLE \"{table}\""))?;
        Ok(())
    }
}

fn endpoint_for(user: &str, api_base: Option<&str>) -> String {
    match api_base {
        Some(base) => format!("{}/api/v2/sql", base.trim_end_matches('/')),
        None => format!("https://{user}.carto.com/api/v2/sql"),
    }
}

fn create_table_sql(table: &str, schema: &[(&str, &str)]) -> String {
    let columns: Vec<String> = schema
        .iter()
        .map(|(name, col_type)| format!("{name} {col_type}"))
        .collect();
    format!("CREATE TABLE \"{table}\" ({})", columns.join(", "))
}

fn create_index_sql(table: &str, field: &str, unique: bool) -> String {
    let unique_sql = if unique { "UNIQUE " } else { "" };
    format!("CREATE {unique_sql}INDEX ON \"{table}\" ({field})")
}

fn insert_sql(table: &str, schema: &[(&str, &str)], rows: &[Vec<String>]) -> String {
    let fields: Vec<&str> = schema.iter().map(|(name, _)| *name).collect();
    let values: Vec<String> = rows
        .iter()
        .map(|row| {
            let formatted: Vec<String> = row
                .iter()
                .zip(schema)
                .map(|(value, (_, col_type))| format_value(value, col_type))
                .collect();
            format!("({})", formatted.join(","))
        })
        .collect();
    format!(
        "INSERT INTO \"{table}\" ({}) VALUES {}",
        fields.join(", "),
        values.join(",")
    )
}

/// Numeric column types go in bare; everything else is quoted with `''`
/// escaping.
fn format_value(value: &str, col_type: &str) -> String {
    match col_type {
        "numeric" | "int" | "integer" | "float" | "double precision" => value.to_string(),
        _ => format!("'{}'", value.replace('\'', "''")),
    }
}
