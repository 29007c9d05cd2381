//! 規劃配置模型

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{FlpError, Result};

/// 規劃配置
///
/// 選擇集合是配置輸入，不從完整資料集推導。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// 年度換算天數
    pub horizon_days: u32,

    /// 建置成本攤提期數（年）
    pub amortization_periods: u32,

    /// 年度總成本預算上限
    pub budget: Decimal,

    /// 必須開設的倉庫數量（恰好 K 座）
    pub required_open_count: usize,

    /// 納入規劃的設施ID
    pub selected_facilities: Vec<String>,

    /// 納入規劃的候選倉庫ID
    pub selected_warehouses: Vec<String>,
}

impl PlanningConfig {
    /// 創建新的規劃配置
    ///
    /// 年度換算天數預設 365，攤提期數預設 10。
    pub fn new(
        budget: Decimal,
        required_open_count: usize,
        selected_facilities: Vec<String>,
        selected_warehouses: Vec<String>,
    ) -> Self {
        Self {
            horizon_days: 365,
            amortization_periods: 10,
            budget,
            required_open_count,
            selected_facilities,
            selected_warehouses,
        }
    }

    /// 建構器模式：設置年度換算天數
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// 建構器模式：設置攤提期數
    pub fn with_amortization_periods(mut self, periods: u32) -> Self {
        self.amortization_periods = periods;
        self
    }

    /// 驗證配置
    ///
    /// 檢查選擇集合非空、設施與倉庫 ID 空間互斥、預算與攤提期數合法。
    pub fn validate(&self) -> Result<()> {
        if self.selected_facilities.is_empty() {
            return Err(FlpError::EmptySelection("selected_facilities"));
        }
        if self.selected_warehouses.is_empty() {
            return Err(FlpError::EmptySelection("selected_warehouses"));
        }

        let facility_ids: BTreeSet<&str> =
            self.selected_facilities.iter().map(String::as_str).collect();
        for warehouse_id in &self.selected_warehouses {
            if facility_ids.contains(warehouse_id.as_str()) {
                return Err(FlpError::OverlappingIds(warehouse_id.clone()));
            }
        }

        if self.budget < Decimal::ZERO {
            return Err(FlpError::NegativeValue {
                entity_id: "config".to_string(),
                field: "budget",
                value: self.budget,
            });
        }

        if self.amortization_periods == 0 {
            return Err(FlpError::ZeroAmortization);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> PlanningConfig {
        PlanningConfig::new(
            Decimal::from(1_500_000),
            2,
            vec!["FAC_1".to_string(), "FAC_2".to_string()],
            vec!["WH_A".to_string(), "WH_B".to_string(), "WH_C".to_string()],
        )
    }

    #[test]
    fn test_defaults() {
        let config = base_config();

        assert_eq!(config.horizon_days, 365);
        assert_eq!(config.amortization_periods, 10);
        assert_eq!(config.required_open_count, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = base_config()
            .with_horizon_days(360)
            .with_amortization_periods(5);

        assert_eq!(config.horizon_days, 360);
        assert_eq!(config.amortization_periods, 5);
    }

    #[test]
    fn test_empty_selection_rejected() {
        let mut config = base_config();
        config.selected_facilities.clear();

        assert!(matches!(
            config.validate().unwrap_err(),
            FlpError::EmptySelection("selected_facilities")
        ));
    }

    #[test]
    fn test_overlapping_id_spaces_rejected() {
        let mut config = base_config();
        config.selected_warehouses.push("FAC_1".to_string());

        assert!(matches!(
            config.validate().unwrap_err(),
            FlpError::OverlappingIds(id) if id == "FAC_1"
        ));
    }

    #[test]
    fn test_negative_budget_rejected() {
        let mut config = base_config();
        config.budget = Decimal::from(-1);

        assert!(matches!(
            config.validate().unwrap_err(),
            FlpError::NegativeValue { field: "budget", .. }
        ));
    }

    #[test]
    fn test_zero_amortization_rejected() {
        let config = base_config().with_amortization_periods(0);

        assert!(matches!(
            config.validate().unwrap_err(),
            FlpError::ZeroAmortization
        ));
    }
}
