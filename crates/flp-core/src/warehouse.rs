//! 候選倉庫模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// 候選倉庫
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    /// 倉庫ID（外部主鍵，全域唯一）
    pub id: String,

    /// 地理座標
    pub position: GeoPoint,

    /// 每日出貨容量
    pub daily_capacity: Decimal,

    /// 一次性建置成本
    pub construction_cost: Decimal,

    /// 每日營運成本
    pub operational_cost: Decimal,
}

impl Warehouse {
    /// 創建新的倉庫記錄
    pub fn new(id: String, position: GeoPoint, daily_capacity: Decimal) -> Self {
        Self {
            id,
            position,
            daily_capacity,
            construction_cost: Decimal::ZERO,
            operational_cost: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置建置成本
    pub fn with_construction_cost(mut self, cost: Decimal) -> Self {
        self.construction_cost = cost;
        self
    }

    /// 建構器模式：設置每日營運成本
    pub fn with_operational_cost(mut self, cost: Decimal) -> Self {
        self.operational_cost = cost;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_warehouse() {
        let warehouse = Warehouse::new(
            "WH_NORTH".to_string(),
            GeoPoint::new(24.81, 120.99),
            Decimal::from(400),
        );

        assert_eq!(warehouse.id, "WH_NORTH");
        assert_eq!(warehouse.daily_capacity, Decimal::from(400));
        assert_eq!(warehouse.construction_cost, Decimal::ZERO);
        assert_eq!(warehouse.operational_cost, Decimal::ZERO);
    }

    #[test]
    fn test_warehouse_builder() {
        let warehouse = Warehouse::new(
            "WH_SOUTH".to_string(),
            GeoPoint::new(24.77, 121.00),
            Decimal::from(350),
        )
        .with_construction_cost(Decimal::from(2_000_000))
        .with_operational_cost(Decimal::from(300));

        assert_eq!(warehouse.construction_cost, Decimal::from(2_000_000));
        assert_eq!(warehouse.operational_cost, Decimal::from(300));
    }
}
