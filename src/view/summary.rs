use serde::Serialize;
use utoipa::ToSchema;

use crate::{model::labels::FieldLabels, stats::aggregate::IncomeSummary, utils::format::format_number};

/// One row of the statistics list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatLine {
    #[schema(example = "totalIncomeAfterTax")]
    pub key: String,
    #[schema(example = "至今到手总收入")]
    pub label: String,
    /// Null when the metric is not a finite number.
    #[schema(example = 14000.0, nullable = true)]
    pub value: Option<f64>,
    #[schema(example = "14,000")]
    pub display: String,
}

pub fn stat_lines(summary: &IncomeSummary, labels: &FieldLabels) -> Vec<StatLine> {
    summary
        .metrics()
        .into_iter()
        .map(|(key, value)| StatLine {
            key: key.to_string(),
            label: labels.label(key).to_string(),
            value: value.is_finite().then_some(value),
            display: format_number(value),
        })
        .collect()
}
