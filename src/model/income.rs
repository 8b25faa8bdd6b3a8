use serde::{Deserialize, Deserializer, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// Direction a payroll component usually moves take-home pay.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldSign {
    Addition,
    Deduction,
}

/// Signed payroll columns of the `income` table, in column order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PayrollField {
    BaseSalary,
    OvertimeMeal,
    HousingFund,
    LeaveDeduction,
    HousingFundDeduction,
    MedicalInsurance,
    PensionInsurance,
    UnemploymentInsurance,
    Tax,
    Rent,
}

impl PayrollField {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Conventional sign only. Aggregation looks at the stored value.
    pub fn sign(self) -> FieldSign {
        match self {
            PayrollField::BaseSalary | PayrollField::OvertimeMeal | PayrollField::HousingFund => {
                FieldSign::Addition
            }
            _ => FieldSign::Deduction,
        }
    }
}

/// One month of payroll for one owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "owner": "me",
        "time": "2024-03-15T00:00:00Z",
        "base_salary": 10000.0,
        "tax": -1000.0,
        "rent": -2000.0
    })
)]
pub struct IncomeRecord {
    pub id: Option<i64>,
    pub owner: Option<String>,

    #[schema(example = "2024-03-15T00:00:00Z")]
    pub time: String,

    #[serde(default, deserialize_with = "number_or_none")]
    pub base_salary: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub overtime_meal: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub housing_fund: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub leave_deduction: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub housing_fund_deduction: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub medical_insurance: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub pension_insurance: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub unemployment_insurance: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub tax: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub rent: Option<f64>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Payroll cells that are not JSON numbers count as absent.
fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::Value::deserialize(deserializer)?.as_f64())
}

/// A single cell of a record, looked up by column name.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl IncomeRecord {
    pub fn value(&self, field: PayrollField) -> Option<f64> {
        match field {
            PayrollField::BaseSalary => self.base_salary,
            PayrollField::OvertimeMeal => self.overtime_meal,
            PayrollField::HousingFund => self.housing_fund,
            PayrollField::LeaveDeduction => self.leave_deduction,
            PayrollField::HousingFundDeduction => self.housing_fund_deduction,
            PayrollField::MedicalInsurance => self.medical_insurance,
            PayrollField::PensionInsurance => self.pension_insurance,
            PayrollField::UnemploymentInsurance => self.unemployment_insurance,
            PayrollField::Tax => self.tax,
            PayrollField::Rent => self.rent,
        }
    }

    pub fn set_value(&mut self, field: PayrollField, value: Option<f64>) {
        let slot = match field {
            PayrollField::BaseSalary => &mut self.base_salary,
            PayrollField::OvertimeMeal => &mut self.overtime_meal,
            PayrollField::HousingFund => &mut self.housing_fund,
            PayrollField::LeaveDeduction => &mut self.leave_deduction,
            PayrollField::HousingFundDeduction => &mut self.housing_fund_deduction,
            PayrollField::MedicalInsurance => &mut self.medical_insurance,
            PayrollField::PensionInsurance => &mut self.pension_insurance,
            PayrollField::UnemploymentInsurance => &mut self.unemployment_insurance,
            PayrollField::Tax => &mut self.tax,
            PayrollField::Rent => &mut self.rent,
        };
        *slot = value;
    }

    /// Present numeric fields in column order. NaN and infinities are skipped.
    pub fn numeric_values(&self) -> impl Iterator<Item = (PayrollField, f64)> + '_ {
        PayrollField::iter().filter_map(move |field| {
            self.value(field)
                .filter(|v| v.is_finite())
                .map(|v| (field, v))
        })
    }

    /// Every column name in table order.
    pub fn column_names() -> Vec<&'static str> {
        let mut names = vec!["id", "owner", "time"];
        names.extend(PayrollField::iter().map(PayrollField::name));
        names.extend(["created_at", "updated_at"]);
        names
    }

    pub fn column(&self, name: &str) -> Option<ColumnValue<'_>> {
        match name {
            "id" => self.id.map(|id| ColumnValue::Number(id as f64)),
            "owner" => self.owner.as_deref().map(ColumnValue::Text),
            "time" => Some(ColumnValue::Text(&self.time)),
            "created_at" => self.created_at.as_deref().map(ColumnValue::Text),
            "updated_at" => self.updated_at.as_deref().map(ColumnValue::Text),
            other => other
                .parse::<PayrollField>()
                .ok()
                .and_then(|field| self.value(field))
                .map(ColumnValue::Number),
        }
    }
}

#[cfg(test)]
pub(crate) fn record(time: &str, values: &[(PayrollField, f64)]) -> IncomeRecord {
    let mut record = IncomeRecord {
        owner: Some("me".to_string()),
        time: time.to_string(),
        ..Default::default()
    };
    for (field, value) in values {
        record.set_value(*field, Some(*value));
    }
    record
}

/// Up to twelve consecutive months of 2024, each cell absent or a signed amount.
#[cfg(test)]
pub(crate) fn arb_months() -> impl proptest::strategy::Strategy<Value = Vec<IncomeRecord>> {
    use proptest::prelude::*;

    prop::collection::vec(
        prop::collection::vec(prop::option::of(-20_000.0f64..20_000.0), 10),
        1..=12,
    )
    .prop_map(|months| {
        months
            .into_iter()
            .enumerate()
            .map(|(i, cells)| {
                let mut r = record(&format!("2024-{:02}-01T00:00:00Z", i + 1), &[]);
                for (field, cell) in PayrollField::iter().zip(cells) {
                    r.set_value(field, cell);
                }
                r
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_column_names() {
        assert_eq!(PayrollField::HousingFundDeduction.name(), "housing_fund_deduction");
        for field in PayrollField::iter() {
            assert_eq!(field.name().parse::<PayrollField>().unwrap(), field);
        }
    }

    #[test]
    fn numeric_values_follow_column_order_and_skip_missing() {
        let r = record(
            "2024-01-01",
            &[(PayrollField::Rent, -2000.0), (PayrollField::BaseSalary, 10000.0)],
        );
        let values: Vec<_> = r.numeric_values().collect();
        assert_eq!(
            values,
            vec![(PayrollField::BaseSalary, 10000.0), (PayrollField::Rent, -2000.0)]
        );
    }

    #[test]
    fn deserializes_rows_with_nulls_and_unknown_columns() {
        let raw = r#"{
            "id": 7,
            "owner": "me",
            "time": "2024-03-15T00:00:00+00:00",
            "base_salary": 12000,
            "tax": -800.5,
            "rent": null,
            "note": "ignored"
        }"#;
        let r: IncomeRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(r.id, Some(7));
        assert_eq!(r.base_salary, Some(12000.0));
        assert_eq!(r.tax, Some(-800.5));
        assert_eq!(r.rent, None);
        assert_eq!(r.numeric_values().count(), 2);
    }

    #[test]
    fn non_numeric_cells_do_not_sink_the_load() {
        let raw = r#"[
            {"time": "2024-02-01T00:00:00Z", "base_salary": 10000, "tax": "n/a", "rent": true},
            {"time": "2024-01-01T00:00:00Z", "base_salary": "10000", "tax": -1000}
        ]"#;
        let rows: Vec<IncomeRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].base_salary, Some(10000.0));
        assert_eq!(rows[0].tax, None);
        assert_eq!(rows[0].rent, None);
        assert_eq!(rows[1].base_salary, None);
        assert_eq!(rows[1].tax, Some(-1000.0));
        assert_eq!(rows[1].numeric_values().count(), 1);
    }

    #[test]
    fn column_lookup_covers_metadata_and_fields() {
        let r = record("2024-03-15", &[(PayrollField::Tax, -1.0)]);
        assert_eq!(r.column("time"), Some(ColumnValue::Text("2024-03-15")));
        assert_eq!(r.column("tax"), Some(ColumnValue::Number(-1.0)));
        assert_eq!(r.column("rent"), None);
        assert_eq!(r.column("nope"), None);
        assert_eq!(IncomeRecord::column_names().len(), 15);
    }

    #[test]
    fn deduction_columns_carry_deduction_sign() {
        assert_eq!(PayrollField::BaseSalary.sign(), FieldSign::Addition);
        assert_eq!(PayrollField::LeaveDeduction.sign(), FieldSign::Deduction);
        assert_eq!(PayrollField::Rent.sign(), FieldSign::Deduction);
    }
}
