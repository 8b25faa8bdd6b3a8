use std::collections::BTreeSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::stats::{
    SeriesPoint,
    aggregate::{ACTUAL_INCOME_LABEL, HARD_EXPENSE_LABEL, TrendSeries},
};

pub const TREND_TITLE: &str = "到手/支出趋势";
pub const EXPENSES_TITLE: &str = "硬性支出分项";
pub const INCOME_TITLE: &str = "收入分项";

const LINE_TENSION: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    #[schema(example = "房租")]
    pub label: String,
    pub data: Vec<f64>,
    #[schema(example = "hsl(0, 70%, 50%)")]
    pub border_color: String,
    #[schema(example = "hsl(0, 70%, 80%)")]
    pub background_color: String,
    #[schema(example = 0.3)]
    pub tension: f64,
}

/// A line chart ready for the front end: x-axis labels plus one dataset per line.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LineChart {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
}

/// Points of one category, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub category: String,
    pub points: Vec<(String, f64)>,
}

impl CategorySeries {
    /// First value recorded for `time`, if any.
    pub fn value_at(&self, time: &str) -> Option<f64> {
        self.points.iter().find(|(t, _)| t == time).map(|(_, v)| *v)
    }
}

/// Group points by category, categories in first-appearance order.
pub fn group_by_category(points: &[SeriesPoint]) -> Vec<CategorySeries> {
    let mut groups: Vec<CategorySeries> = Vec::new();
    for point in points {
        let entry = (point.time.clone(), point.value);
        match groups.iter_mut().find(|g| g.category == point.category) {
            Some(group) => group.points.push(entry),
            None => groups.push(CategorySeries {
                category: point.category.clone(),
                points: vec![entry],
            }),
        }
    }
    groups
}

/// Sorted union of every time label across categories.
pub fn time_axis(groups: &[CategorySeries]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|g| g.points.iter().map(|(t, _)| t.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One line per category; a month a category never hit plots as 0.
pub fn breakdown_chart(title: &str, points: &[SeriesPoint]) -> LineChart {
    let groups = group_by_category(points);
    let labels = time_axis(&groups);

    let datasets = groups
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            let hue = (idx * 60) % 360;
            LineDataset {
                label: group.category.clone(),
                data: labels
                    .iter()
                    .map(|t| group.value_at(t).unwrap_or(0.0))
                    .collect(),
                border_color: format!("hsl({hue}, 70%, 50%)"),
                background_color: format!("hsl({hue}, 70%, 80%)"),
                tension: LINE_TENSION,
            }
        })
        .collect();

    LineChart {
        title: title.to_string(),
        labels,
        datasets,
    }
}

pub fn trend_chart(trend: &TrendSeries) -> LineChart {
    LineChart {
        title: TREND_TITLE.to_string(),
        labels: trend.actual_income.iter().map(|p| p.time.clone()).collect(),
        datasets: vec![
            LineDataset {
                label: ACTUAL_INCOME_LABEL.to_string(),
                data: trend.actual_income.iter().map(|p| p.value).collect(),
                border_color: "rgb(75, 192, 192)".to_string(),
                background_color: "rgba(75, 192, 192, 0.2)".to_string(),
                tension: LINE_TENSION,
            },
            LineDataset {
                label: HARD_EXPENSE_LABEL.to_string(),
                data: trend.expenses.iter().map(|p| p.value).collect(),
                border_color: "rgb(255, 99, 132)".to_string(),
                background_color: "rgba(255, 99, 132, 0.2)".to_string(),
                tension: LINE_TENSION,
            },
        ],
    }
}
