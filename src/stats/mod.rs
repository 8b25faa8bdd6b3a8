pub mod aggregate;
pub mod breakdown;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{model::income::IncomeRecord, utils::format::parse_time};

/// One point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SeriesPoint {
    #[schema(example = "2024-03")]
    pub time: String,
    pub value: f64,
    #[schema(example = "房租")]
    pub category: String,
}

/// Records in ascending time order. Stable; unparseable times sort first.
pub fn sorted_by_time(records: &[IncomeRecord]) -> Vec<&IncomeRecord> {
    let mut sorted: Vec<&IncomeRecord> = records.iter().collect();
    sorted.sort_by_key(|r| parse_time(&r.time));
    sorted
}
