//! # FLP Cost Model
//!
//! 年化成本推導：由每日需求/容量與一次性建置成本推導年度模型參數

pub mod annualize;

// Re-export 主要類型
pub use annualize::{AnnualFacility, AnnualWarehouse, CostCalculator};
