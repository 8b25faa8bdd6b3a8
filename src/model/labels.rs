use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Display names for record columns, keyed by raw column name.
#[derive(Debug, Clone, Default)]
pub struct FieldLabels {
    labels: HashMap<String, String>,
}

impl FieldLabels {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Translated label, or the raw name when the table has no entry.
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        self.labels.get(name).map(String::as_str).unwrap_or(name)
    }
}

pub static FIELD_LABELS: Lazy<FieldLabels> = Lazy::new(|| {
    FieldLabels::new([
        ("time", "时间-年月"),
        ("base_salary", "基本工资"),
        ("overtime_meal", "加班餐补"),
        ("housing_fund", "公积金"),
        ("leave_deduction", "请假扣款"),
        ("housing_fund_deduction", "公积金扣款"),
        ("medical_insurance", "医疗保险"),
        ("pension_insurance", "养老保险"),
        ("unemployment_insurance", "失业保险"),
        ("tax", "个人所得税"),
        ("rent", "房租"),
    ])
});

/// Labels for the summary metrics and the year-end adjustments.
pub static KEY_LABELS: Lazy<FieldLabels> = Lazy::new(|| {
    FieldLabels::new([
        ("totalIncomeBeforeTax", "至今税前总收入"),
        ("totalExpenses", "至今税金房租总支出"),
        ("totalIncomeAfterTax", "至今到手总收入"),
        ("averageMonthlyIncome", "至今平均到手月入"),
        ("yearEndBonus", "年终"),
        ("yearEndBonusMonthly", "年终换算为月均"),
        ("totalIncomeAfterYearEnd", "年终后到手总收入"),
        ("averageMonthlyIncomeAfterYearEnd", "年终后平均到手月入"),
        ("estimatedAnnualIncomeBeforeTax", "预计税前年入"),
        ("estimatedAnnualIncomeAfterTax", "预计到手年入"),
        ("estimatedAnnualIncomeAfterYearEnd", "年终后预计到手年入"),
    ])
});
