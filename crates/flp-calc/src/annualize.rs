//! 年化推導
//!
//! 成本模型是純函數：輸出只依賴單一實體自身的欄位與時界參數，
//! 不讀取其他實體、不修改來源記錄。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flp_core::{Facility, FlpError, GeoPoint, Result, Warehouse};

/// 年化後的設施
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualFacility {
    /// 設施ID
    pub id: String,

    /// 設施名稱
    pub name: String,

    /// 地理座標
    pub position: GeoPoint,

    /// 年度需求量 = 每日需求 × 年度天數
    pub annual_demand: Decimal,
}

/// 年化後的倉庫
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualWarehouse {
    /// 倉庫ID
    pub id: String,

    /// 地理座標
    pub position: GeoPoint,

    /// 年度容量 = 每日容量 × 年度天數
    pub annual_capacity: Decimal,

    /// 年化固定成本 = 建置成本 / 攤提期數 + 營運成本 × 年度天數
    pub annual_fixed_cost: Decimal,
}

/// 年化計算器
pub struct CostCalculator;

impl CostCalculator {
    /// 設施年化
    ///
    /// 負的每日需求是無效輸入，在模型建構前即拒絕。
    pub fn annualize_facility(facility: &Facility, horizon_days: u32) -> Result<AnnualFacility> {
        if facility.daily_demand < Decimal::ZERO {
            return Err(FlpError::NegativeValue {
                entity_id: facility.id.clone(),
                field: "daily_demand",
                value: facility.daily_demand,
            });
        }

        let annual_demand = facility.daily_demand * Decimal::from(horizon_days);
        tracing::trace!(facility = %facility.id, %annual_demand, "設施年化完成");

        Ok(AnnualFacility {
            id: facility.id.clone(),
            name: facility.name.clone(),
            position: facility.position,
            annual_demand,
        })
    }

    /// 倉庫年化
    ///
    /// 負的容量或成本是無效輸入；攤提期數必須大於零。
    pub fn annualize_warehouse(
        warehouse: &Warehouse,
        horizon_days: u32,
        amortization_periods: u32,
    ) -> Result<AnnualWarehouse> {
        if warehouse.daily_capacity < Decimal::ZERO {
            return Err(FlpError::NegativeValue {
                entity_id: warehouse.id.clone(),
                field: "daily_capacity",
                value: warehouse.daily_capacity,
            });
        }
        if warehouse.construction_cost < Decimal::ZERO {
            return Err(FlpError::NegativeValue {
                entity_id: warehouse.id.clone(),
                field: "construction_cost",
                value: warehouse.construction_cost,
            });
        }
        if warehouse.operational_cost < Decimal::ZERO {
            return Err(FlpError::NegativeValue {
                entity_id: warehouse.id.clone(),
                field: "operational_cost",
                value: warehouse.operational_cost,
            });
        }
        if amortization_periods == 0 {
            return Err(FlpError::ZeroAmortization);
        }

        let horizon = Decimal::from(horizon_days);
        let annual_capacity = warehouse.daily_capacity * horizon;
        let annual_fixed_cost = warehouse.construction_cost / Decimal::from(amortization_periods)
            + warehouse.operational_cost * horizon;

        tracing::trace!(
            warehouse = %warehouse.id,
            %annual_capacity,
            %annual_fixed_cost,
            "倉庫年化完成"
        );

        Ok(AnnualWarehouse {
            id: warehouse.id.clone(),
            position: warehouse.position,
            annual_capacity,
            annual_fixed_cost,
        })
    }
}
