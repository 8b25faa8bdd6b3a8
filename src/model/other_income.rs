use once_cell::sync::Lazy;
use serde::Serialize;
use utoipa::ToSchema;

/// A one-off adjustment kept outside the record store.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OtherIncomeEntry {
    #[schema(example = "2024-1")]
    pub time: String,

    #[schema(example = 100.0, nullable = true)]
    pub year_end_bonus: Option<f64>,

    #[schema(example = 4364.5, nullable = true)]
    pub year_end_bonus_monthly: Option<f64>,

    #[schema(example = 875.16, nullable = true)]
    pub tax_refund: Option<f64>,
}

impl OtherIncomeEntry {
    /// `2024-1 年终奖 100 换算为月均 4364.5`, `2024-3 退税 875.16`
    pub fn display_line(&self) -> String {
        let mut line = self.time.clone();
        if let Some(bonus) = self.year_end_bonus {
            line.push_str(&format!(" 年终奖 {bonus}"));
            if let Some(monthly) = self.year_end_bonus_monthly {
                line.push_str(&format!(" 换算为月均 {monthly}"));
            }
        }
        if let Some(refund) = self.tax_refund {
            line.push_str(&format!(" 退税 {refund}"));
        }
        line
    }
}

pub static OTHER_INCOME: Lazy<Vec<OtherIncomeEntry>> = Lazy::new(|| {
    vec![
        OtherIncomeEntry {
            time: "2024-1".to_string(),
            year_end_bonus: Some(100.0),
            year_end_bonus_monthly: Some(4364.5),
            tax_refund: None,
        },
        OtherIncomeEntry {
            time: "2024-3".to_string(),
            year_end_bonus: None,
            year_end_bonus_monthly: None,
            tax_refund: Some(875.16),
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_and_refund_lines() {
        let lines: Vec<String> = OTHER_INCOME.iter().map(|e| e.display_line()).collect();
        assert_eq!(lines, vec!["2024-1 年终奖 100 换算为月均 4364.5", "2024-3 退税 875.16"]);
    }

    #[test]
    fn bare_entry_shows_only_time() {
        let entry = OtherIncomeEntry {
            time: "2025-2".to_string(),
            year_end_bonus: None,
            year_end_bonus_monthly: Some(1.0),
            tax_refund: None,
        };
        assert_eq!(entry.display_line(), "2025-2");
    }
}
