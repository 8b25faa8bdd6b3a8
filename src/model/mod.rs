pub mod income;
pub mod labels;
pub mod other_income;
