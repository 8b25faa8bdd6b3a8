use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    model::{income::FieldSign, other_income::OtherIncomeEntry},
    state::{LoadStatus, Snapshot},
    stats::breakdown::BreakdownMode,
    view::{DashboardCharts, summary::StatLine, table::IncomeTable},
};

/// Everything the dashboard page renders, in one response.
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub loading: bool,
    pub status: LoadStatus,
    #[schema(nullable = true)]
    pub error: Option<String>,
    #[schema(example = "2024年01月-2024年06月(6)", nullable = true)]
    pub time_range: Option<String>,
    pub stats: Vec<StatLine>,
    /// Absent while there are no records.
    #[schema(nullable = true)]
    pub charts: Option<DashboardCharts>,
    pub other_income: Vec<String>,
    pub table: IncomeTable,
}

impl DashboardResponse {
    pub fn new(snapshot: &Snapshot, loading: bool, other_income: &[OtherIncomeEntry]) -> Self {
        let has_records = !snapshot.records.is_empty();
        Self {
            loading,
            status: snapshot.status,
            error: snapshot.error.clone(),
            time_range: snapshot.time_range.clone(),
            stats: snapshot.stats.clone(),
            charts: has_records.then(|| snapshot.charts.clone()),
            other_income: if has_records {
                other_income.iter().map(OtherIncomeEntry::display_line).collect()
            } else {
                Vec::new()
            },
            table: snapshot.table.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub loading: bool,
    pub status: LoadStatus,
    pub stats: Vec<StatLine>,
}

#[derive(Serialize, ToSchema)]
pub struct OtherIncomeResponse {
    pub entries: Vec<OtherIncomeEntry>,
    #[schema(example = json!(["2024-1 年终奖 100 换算为月均 4364.5", "2024-3 退税 875.16"]))]
    pub lines: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FieldInfo {
    #[schema(example = "base_salary")]
    pub name: String,
    #[schema(example = "基本工资")]
    pub label: String,
    pub sign: FieldSign,
}

#[derive(Serialize, ToSchema)]
pub struct RefreshResponse {
    pub status: LoadStatus,
    #[schema(example = 12)]
    pub count: usize,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct TableQuery {
    /// Comma separated column names to hide on top of the defaults.
    #[schema(example = "rent,tax")]
    pub exclude: Option<String>,
}

impl TableQuery {
    pub fn excluded(&self) -> Vec<String> {
        self.exclude
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct BreakdownQuery {
    #[schema(example = "expenses")]
    pub mode: BreakdownMode,
}
