use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    model::{
        income::{ColumnValue, IncomeRecord},
        labels::FieldLabels,
    },
    utils::format::{display_month, format_number, parse_time},
};

/// Columns hidden from every table.
pub const DEFAULT_HIDDEN_COLUMNS: [&str; 4] = ["id", "owner", "created_at", "updated_at"];

pub const EMPTY_PLACEHOLDER: &str = "暂无数据";
pub const MISSING_CELL: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TableColumn {
    #[schema(example = "base_salary")]
    pub key: String,
    #[schema(example = "基本工资")]
    pub header: String,
}

/// The record table, every cell already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct IncomeTable {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    /// Set when there is nothing to show.
    #[schema(example = "暂无数据", nullable = true)]
    pub placeholder: Option<String>,
}

fn is_date_column(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("time") || lower.contains("date")
}

fn format_cell(column: &str, value: Option<ColumnValue<'_>>) -> String {
    match value {
        None => MISSING_CELL.to_string(),
        Some(ColumnValue::Number(n)) => format_number(n),
        Some(ColumnValue::Text(text)) if is_date_column(column) && parse_time(text).is_some() => {
            display_month(text)
        }
        Some(ColumnValue::Text(text)) => text.to_string(),
    }
}

/// Build the table in record order, hiding metadata plus `exclude`.
pub fn build_table(records: &[IncomeRecord], labels: &FieldLabels, exclude: &[String]) -> IncomeTable {
    if records.is_empty() {
        return IncomeTable {
            columns: Vec::new(),
            rows: Vec::new(),
            placeholder: Some(EMPTY_PLACEHOLDER.to_string()),
        };
    }

    let keys: Vec<&str> = IncomeRecord::column_names()
        .into_iter()
        .filter(|name| !DEFAULT_HIDDEN_COLUMNS.contains(name))
        .filter(|name| !exclude.iter().any(|e| e == name))
        .collect();

    let columns = keys
        .iter()
        .map(|key| TableColumn {
            key: key.to_string(),
            header: labels.label(key).to_string(),
        })
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            keys.iter()
                .map(|key| format_cell(key, record.column(key)))
                .collect()
        })
        .collect();

    IncomeTable {
        columns,
        rows,
        placeholder: None,
    }
}

/// `2024年01月-2024年06月(6)` heading over the non-empty times.
pub fn time_range(records: &[IncomeRecord]) -> Option<String> {
    let mut times: Vec<&str> = records
        .iter()
        .map(|r| r.time.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    times.sort_unstable();

    let (first, last) = (times.first()?, times.last()?);
    Some(format!(
        "{}-{}({})",
        display_month(first),
        display_month(last),
        times.len()
    ))
}
