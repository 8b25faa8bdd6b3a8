use serde::Deserialize;
use utoipa::ToSchema;

use super::{SeriesPoint, sorted_by_time};
use crate::{
    model::{
        income::{IncomeRecord, PayrollField},
        labels::FieldLabels,
    },
    utils::format::month_label,
};

/// Which side of the payslip a breakdown chart shows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownMode {
    /// Strictly negative fields, as positive magnitudes.
    Expenses,
    /// Non-negative fields, leave deduction excluded.
    Income,
}

impl BreakdownMode {
    fn admits(self, field: PayrollField, value: f64) -> bool {
        match self {
            BreakdownMode::Expenses => value < 0.0,
            BreakdownMode::Income => field != PayrollField::LeaveDeduction && value >= 0.0,
        }
    }

    fn plotted(self, value: f64) -> f64 {
        match self {
            BreakdownMode::Expenses => -value,
            BreakdownMode::Income => value,
        }
    }
}

/// Per-field points for the breakdown charts, oldest record first.
///
/// Expenses are ordered by descending raw value within a record, income by
/// ascending value. The first two points of the finished list are swapped
/// whenever there are at least two; existing dashboards depend on that order.
pub fn compute_breakdown(
    records: &[IncomeRecord],
    labels: &FieldLabels,
    mode: BreakdownMode,
) -> Vec<SeriesPoint> {
    let mut points = Vec::new();

    for record in sorted_by_time(records) {
        let time = month_label(&record.time);

        let mut fields: Vec<(PayrollField, f64)> = record.numeric_values().collect();
        match mode {
            BreakdownMode::Expenses => fields.sort_by(|a, b| b.1.total_cmp(&a.1)),
            BreakdownMode::Income => fields.sort_by(|a, b| a.1.total_cmp(&b.1)),
        }

        points.extend(
            fields
                .into_iter()
                .filter(|(field, value)| mode.admits(*field, *value))
                .map(|(field, value)| SeriesPoint {
                    time: time.clone(),
                    value: mode.plotted(value),
                    category: labels.label(field.name()).to_string(),
                }),
        );
    }

    if points.len() > 1 {
        points.swap(0, 1);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        income::{PayrollField::*, arb_months, record},
        labels::FIELD_LABELS,
    };
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    fn months() -> Vec<IncomeRecord> {
        vec![
            record(
                "2024-02-01T00:00:00Z",
                &[
                    (BaseSalary, 10000.0),
                    (OvertimeMeal, 400.0),
                    (Tax, -1200.0),
                    (Rent, -2000.0),
                    (LeaveDeduction, -300.0),
                ],
            ),
            record(
                "2024-01-01T00:00:00Z",
                &[
                    (BaseSalary, 10000.0),
                    (HousingFund, 0.0),
                    (Tax, -1000.0),
                    (Rent, -2000.0),
                    (MedicalInsurance, -200.0),
                ],
            ),
        ]
    }

    /// Undo the leading swap to inspect the natural order.
    fn unswapped(mut points: Vec<SeriesPoint>) -> Vec<SeriesPoint> {
        if points.len() > 1 {
            points.swap(0, 1);
        }
        points
    }

    #[test]
    fn expenses_are_positive_and_ordered_per_record() {
        let points = compute_breakdown(&months(), &FIELD_LABELS, BreakdownMode::Expenses);
        assert!(points.iter().all(|p| p.value > 0.0));

        let natural = unswapped(points);
        let cats: Vec<(&str, &str, f64)> = natural
            .iter()
            .map(|p| (p.time.as_str(), p.category.as_str(), p.value))
            .collect();
        assert_eq!(
            cats,
            vec![
                ("2024-01", "医疗保险", 200.0),
                ("2024-01", "个人所得税", 1000.0),
                ("2024-01", "房租", 2000.0),
                ("2024-02", "请假扣款", 300.0),
                ("2024-02", "个人所得税", 1200.0),
                ("2024-02", "房租", 2000.0),
            ]
        );
    }

    #[test]
    fn expenses_raw_values_never_increase_within_a_month() {
        let natural = unswapped(compute_breakdown(
            &months(),
            &FIELD_LABELS,
            BreakdownMode::Expenses,
        ));
        for pair in natural.windows(2).filter(|w| w[0].time == w[1].time) {
            assert!(-pair[0].value >= -pair[1].value);
        }
    }

    #[test]
    fn income_is_non_negative_ascending_and_skips_leave_deduction() {
        let points = compute_breakdown(&months(), &FIELD_LABELS, BreakdownMode::Income);
        assert!(points.iter().all(|p| p.value >= 0.0));
        assert!(points.iter().all(|p| p.category != "请假扣款"));

        let natural = unswapped(points);
        let cats: Vec<(&str, &str)> = natural
            .iter()
            .map(|p| (p.time.as_str(), p.category.as_str()))
            .collect();
        assert_eq!(
            cats,
            vec![
                ("2024-01", "公积金"),
                ("2024-01", "基本工资"),
                ("2024-02", "加班餐补"),
                ("2024-02", "基本工资"),
            ]
        );
        for pair in natural.windows(2).filter(|w| w[0].time == w[1].time) {
            assert!(pair[0].value <= pair[1].value);
        }
    }

    #[test]
    fn leading_pair_is_swapped() {
        let points = compute_breakdown(&months(), &FIELD_LABELS, BreakdownMode::Expenses);
        assert_eq!(points[0].category, "个人所得税");
        assert_eq!(points[1].category, "医疗保险");
        assert_eq!(points[2].category, "房租");
    }

    #[test]
    fn single_point_is_left_alone() {
        let records = vec![record("2024-01-01", &[(BaseSalary, 10000.0), (Rent, -2000.0)])];
        let points = compute_breakdown(&records, &FIELD_LABELS, BreakdownMode::Expenses);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 2000.0);
        assert!(compute_breakdown(&[], &FIELD_LABELS, BreakdownMode::Income).is_empty());
    }

    #[test]
    fn missing_label_falls_back_to_field_name() {
        let labels = FieldLabels::new([("tax", "个人所得税")]);
        let records = vec![record("2024-03-15T00:00:00Z", &[(Tax, -10.0), (Rent, -20.0)])];
        let points = compute_breakdown(&records, &labels, BreakdownMode::Expenses);
        let cats: Vec<&str> = points.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(cats, vec!["rent", "个人所得税"]);
        assert_eq!(points[0].time, "2024-03");
    }

    proptest! {
        #![proptest_config(Config::with_cases(128))]
        #[test]
        fn expenses_keep_every_negative_cell_in_order(records in arb_months()) {
            let points = compute_breakdown(&records, &FIELD_LABELS, BreakdownMode::Expenses);
            let negatives = records
                .iter()
                .flat_map(|r| r.numeric_values())
                .filter(|(_, v)| *v < 0.0)
                .count();
            prop_assert_eq!(points.len(), negatives);
            prop_assert!(points.iter().all(|p| p.value > 0.0));

            if points.len() > 1 && points[0].time == points[1].time {
                prop_assert!(points[0].value >= points[1].value);
            }

            let natural = unswapped(points);
            prop_assert!(natural.windows(2).all(|w| w[0].time <= w[1].time));
            for pair in natural.windows(2).filter(|w| w[0].time == w[1].time) {
                prop_assert!(pair[0].value <= pair[1].value);
            }
        }

        #[test]
        fn income_keeps_non_negative_cells_in_order(records in arb_months()) {
            let points = compute_breakdown(&records, &FIELD_LABELS, BreakdownMode::Income);
            let kept = records
                .iter()
                .flat_map(|r| r.numeric_values())
                .filter(|(f, v)| *f != LeaveDeduction && *v >= 0.0)
                .count();
            prop_assert_eq!(points.len(), kept);
            prop_assert!(points.iter().all(|p| p.value >= 0.0 && p.category != "请假扣款"));

            if points.len() > 1 && points[0].time == points[1].time {
                prop_assert!(points[0].value >= points[1].value);
            }

            let natural = unswapped(points);
            prop_assert!(natural.windows(2).all(|w| w[0].time <= w[1].time));
            for pair in natural.windows(2).filter(|w| w[0].time == w[1].time) {
                prop_assert!(pair[0].value <= pair[1].value);
            }
        }
    }
}
