pub mod chart;
pub mod summary;
pub mod table;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    model::{income::IncomeRecord, labels::FieldLabels},
    stats::{
        aggregate::compute_trend_series,
        breakdown::{BreakdownMode, compute_breakdown},
    },
};
use chart::{EXPENSES_TITLE, INCOME_TITLE, LineChart, breakdown_chart, trend_chart};

/// The three dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardCharts {
    pub trend: LineChart,
    pub expenses: LineChart,
    pub income: LineChart,
}

pub fn build_charts(records: &[IncomeRecord], labels: &FieldLabels) -> DashboardCharts {
    let expenses = compute_breakdown(records, labels, BreakdownMode::Expenses);
    let income = compute_breakdown(records, labels, BreakdownMode::Income);

    DashboardCharts {
        trend: trend_chart(&compute_trend_series(records)),
        expenses: breakdown_chart(EXPENSES_TITLE, &expenses),
        income: breakdown_chart(INCOME_TITLE, &income),
    }
}
