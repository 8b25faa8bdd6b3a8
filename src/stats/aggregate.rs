use super::{SeriesPoint, sorted_by_time};
use crate::{model::income::IncomeRecord, utils::format::month_label};

pub const ACTUAL_INCOME_LABEL: &str = "实际收入";
pub const HARD_EXPENSE_LABEL: &str = "硬性支出";

/// Take-home amount of one month: every numeric field, signs included.
pub fn net_value(record: &IncomeRecord) -> f64 {
    record.numeric_values().fold(0.0, |acc, (_, v)| acc + v)
}

/// Magnitude of one month's deductions.
pub fn deduction_total(record: &IncomeRecord) -> f64 {
    let negatives = record
        .numeric_values()
        .map(|(_, v)| v)
        .filter(|v| *v < 0.0)
        .fold(0.0, |acc, v| acc + v);
    0.0 - negatives
}

/// Totals, averages and annual projections over a record list.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeSummary {
    pub record_count: usize,
    pub total_pre_tax: f64,
    pub total_deductions: f64,
    pub total_post_tax: f64,
    pub average_monthly_post_tax: f64,
    pub estimated_annual_post_tax: f64,
    pub estimated_annual_pre_tax: f64,
}

impl IncomeSummary {
    /// Metrics under their display keys, in display order.
    pub fn metrics(&self) -> [(&'static str, f64); 6] {
        [
            ("totalIncomeAfterTax", self.total_post_tax),
            ("totalIncomeBeforeTax", self.total_pre_tax),
            ("totalExpenses", self.total_deductions),
            ("averageMonthlyIncome", self.average_monthly_post_tax),
            ("estimatedAnnualIncomeAfterTax", self.estimated_annual_post_tax),
            ("estimatedAnnualIncomeBeforeTax", self.estimated_annual_pre_tax),
        ]
    }
}

/// Summary over `records`.
///
/// An empty list divides by zero: the averages and projections come back as
/// NaN. Callers skip the call for an empty list.
pub fn compute_summary(records: &[IncomeRecord]) -> IncomeSummary {
    let sorted = sorted_by_time(records);
    let total_post_tax = sorted.iter().fold(0.0, |acc, r| acc + net_value(r));
    let total_deductions = sorted.iter().fold(0.0, |acc, r| acc + deduction_total(r));
    let total_pre_tax = total_post_tax + total_deductions;

    let count = sorted.len() as f64;
    let average_monthly_post_tax = total_post_tax / count;

    IncomeSummary {
        record_count: sorted.len(),
        total_pre_tax,
        total_deductions,
        total_post_tax,
        average_monthly_post_tax,
        estimated_annual_post_tax: average_monthly_post_tax * 12.0,
        estimated_annual_pre_tax: (total_pre_tax / count) * 12.0,
    }
}

/// The two lines of the take-home trend chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    pub actual_income: Vec<SeriesPoint>,
    pub expenses: Vec<SeriesPoint>,
}

pub fn compute_trend_series(records: &[IncomeRecord]) -> TrendSeries {
    let mut trend = TrendSeries::default();
    for record in sorted_by_time(records) {
        let time = month_label(&record.time);
        trend.actual_income.push(SeriesPoint {
            time: time.clone(),
            value: net_value(record),
            category: ACTUAL_INCOME_LABEL.to_string(),
        });
        trend.expenses.push(SeriesPoint {
            time,
            value: deduction_total(record),
            category: HARD_EXPENSE_LABEL.to_string(),
        });
    }
    trend
}
