use crate::model::{
    income::{FieldSign, IncomeRecord},
    other_income::OtherIncomeEntry,
};
use crate::models::{
    BreakdownQuery, DashboardResponse, FieldInfo, OtherIncomeResponse, RefreshResponse,
    StatsResponse, TableQuery,
};
use crate::state::LoadStatus;
use crate::stats::{SeriesPoint, breakdown::BreakdownMode};
use crate::view::{
    DashboardCharts,
    chart::{LineChart, LineDataset},
    summary::StatLine,
    table::{IncomeTable, TableColumn},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Income Dashboard API",
        version = "1.0.0",
        description = r#"
## Personal Income Dashboard

Monthly payroll rows are read from a remote `income` table and turned into
the numbers and charts of a personal take-home dashboard.

### 🔹 What it serves
- **Statistics**
  - Pre-tax, deduction and take-home totals, monthly average, annual projections
- **Charts**
  - Take-home vs. hard expense trend
  - Per-item deduction and income lines
- **Table**
  - Every record with translated headers, `YYYY年MM月` months and grouped numbers
- **Other income**
  - Year-end bonus and tax refund kept outside the table

### 📦 Response Format
- JSON-based responses, read-only
- `POST /api/income/refresh` reloads the records from the store

---
Built with **Rust**, **Actix Web**, **SQLx**, **reqwest** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::income::get_dashboard,
        crate::api::income::list_records,
        crate::api::income::get_summary,
        crate::api::income::get_charts,
        crate::api::income::get_breakdown,
        crate::api::income::get_table,
        crate::api::income::get_other_income,
        crate::api::income::list_fields,
        crate::api::income::refresh
    ),
    components(
        schemas(
            DashboardResponse,
            StatsResponse,
            OtherIncomeResponse,
            RefreshResponse,
            FieldInfo,
            FieldSign,
            TableQuery,
            BreakdownQuery,
            BreakdownMode,
            IncomeRecord,
            OtherIncomeEntry,
            LoadStatus,
            SeriesPoint,
            StatLine,
            DashboardCharts,
            LineChart,
            LineDataset,
            IncomeTable,
            TableColumn
        )
    ),
    tags(
        (name = "Dashboard", description = "Whole dashboard snapshot"),
        (name = "Income", description = "Income records, statistics and charts"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/dashboard",
            "/api/income/records",
            "/api/income/summary",
            "/api/income/charts",
            "/api/income/breakdown",
            "/api/income/table",
            "/api/income/other",
            "/api/income/fields",
            "/api/income/refresh",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
