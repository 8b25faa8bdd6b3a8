use futures_util::StreamExt;
use sqlx::MySqlPool;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

use super::error::StoreError;
use crate::model::income::{IncomeRecord, PayrollField};

/// Reads the income table straight from MySQL.
pub struct MySqlIncomeStore {
    pool: MySqlPool,
    sql: String,
}

/// `SELECT` over every column, timestamps as RFC 3339 text, newest first.
pub fn select_all_sql(table: &str) -> String {
    let mut columns = vec![
        "CAST(`id` AS SIGNED) AS `id`".to_string(),
        "`owner`".to_string(),
        "DATE_FORMAT(`time`, '%Y-%m-%dT%H:%i:%sZ') AS `time`".to_string(),
    ];
    columns.extend(
        PayrollField::iter().map(|f| format!("CAST(`{0}` AS DOUBLE) AS `{0}`", f.name())),
    );
    columns.push("DATE_FORMAT(`created_at`, '%Y-%m-%dT%H:%i:%sZ') AS `created_at`".to_string());
    columns.push("DATE_FORMAT(`updated_at`, '%Y-%m-%dT%H:%i:%sZ') AS `updated_at`".to_string());

    format!(
        "SELECT {} FROM `{}` ORDER BY `time` DESC",
        columns.join(", "),
        table
    )
}

impl MySqlIncomeStore {
    pub fn new(pool: MySqlPool, table: &str) -> Self {
        Self {
            pool,
            sql: select_all_sql(table),
        }
    }

    #[instrument(name = "mysql_fetch_all", skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<IncomeRecord>, StoreError> {
        let mut stream = sqlx::query_as::<_, IncomeRecord>(&self.sql).fetch(&self.pool);

        let mut records = Vec::new();
        while let Some(row) = stream.next().await {
            records.push(row?);
        }

        debug!(count = records.len(), "Income rows loaded");
        Ok(records)
    }
}
