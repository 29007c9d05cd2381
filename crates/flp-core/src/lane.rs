//! 運輸路線模型
//!
//! 路線是稀疏關係：只有輸入中存在的 (倉庫, 設施) 配對才是可行出貨路徑。
//! 查詢未定義的配對是錯誤，而不是默認為零成本。

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{FlpError, Result};

/// 運輸路線（有序配對：倉庫 -> 設施）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    /// 起點倉庫ID
    pub warehouse_id: String,

    /// 終點設施ID
    pub facility_id: String,

    /// 單位運輸成本
    pub unit_cost: Decimal,
}

impl Lane {
    /// 創建新的路線記錄
    pub fn new(warehouse_id: String, facility_id: String, unit_cost: Decimal) -> Self {
        Self {
            warehouse_id,
            facility_id,
            unit_cost,
        }
    }
}

/// 路線表（按鍵排序，保證走訪順序可重現）
#[derive(Debug, Clone, Default)]
pub struct LaneTable {
    lanes: BTreeMap<(String, String), Decimal>,
}

impl LaneTable {
    /// 由路線記錄建表
    ///
    /// 拒絕負成本與重複配對。
    pub fn new(lanes: Vec<Lane>) -> Result<Self> {
        let mut table = BTreeMap::new();

        for lane in lanes {
            if lane.unit_cost < Decimal::ZERO {
                return Err(FlpError::NegativeValue {
                    entity_id: format!("{} -> {}", lane.warehouse_id, lane.facility_id),
                    field: "unit_cost",
                    value: lane.unit_cost,
                });
            }

            let key = (lane.warehouse_id, lane.facility_id);
            if table.contains_key(&key) {
                return Err(FlpError::DuplicateLane {
                    warehouse_id: key.0,
                    facility_id: key.1,
                });
            }
            table.insert(key, lane.unit_cost);
        }

        Ok(Self { lanes: table })
    }

    /// 檢查配對是否有定義路線
    pub fn contains(&self, warehouse_id: &str, facility_id: &str) -> bool {
        self.lanes
            .contains_key(&(warehouse_id.to_string(), facility_id.to_string()))
    }

    /// 查詢單位運輸成本
    ///
    /// 未定義的配對回傳 `MissingLane` 錯誤。
    pub fn unit_cost(&self, warehouse_id: &str, facility_id: &str) -> Result<Decimal> {
        self.lanes
            .get(&(warehouse_id.to_string(), facility_id.to_string()))
            .copied()
            .ok_or_else(|| FlpError::MissingLane {
                warehouse_id: warehouse_id.to_string(),
                facility_id: facility_id.to_string(),
            })
    }

    /// 按 (倉庫ID, 設施ID) 排序走訪所有路線
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Decimal)> {
        self.lanes
            .iter()
            .map(|((w, f), cost)| (w.as_str(), f.as_str(), *cost))
    }

    /// 路線數量
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// 是否為空表
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
