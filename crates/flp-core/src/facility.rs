//! 消耗點（設施）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// 設施（需求消耗點）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    /// 設施ID（外部主鍵，全域唯一）
    pub id: String,

    /// 設施名稱（顯示用）
    pub name: String,

    /// 地理座標
    pub position: GeoPoint,

    /// 每日需求量
    pub daily_demand: Decimal,
}

impl Facility {
    /// 創建新的設施記錄
    pub fn new(id: String, position: GeoPoint, daily_demand: Decimal) -> Self {
        let name = id.clone();
        Self {
            id,
            name,
            position,
            daily_demand,
        }
    }

    /// 建構器模式：設置顯示名稱
    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_facility() {
        let facility = Facility::new(
            "MED_CENTER".to_string(),
            GeoPoint::new(24.79, 121.00),
            Decimal::from(120),
        );

        assert_eq!(facility.id, "MED_CENTER");
        assert_eq!(facility.name, "MED_CENTER");
        assert_eq!(facility.daily_demand, Decimal::from(120));
    }

    #[test]
    fn test_facility_builder() {
        let facility = Facility::new(
            "LIBRARY".to_string(),
            GeoPoint::new(24.80, 121.01),
            Decimal::from(50),
        )
        .with_name("總圖書館".to_string());

        assert_eq!(facility.id, "LIBRARY");
        assert_eq!(facility.name, "總圖書館");
    }
}
