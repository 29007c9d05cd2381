//! 問題建構器
//!
//! 由選擇集合、年化成本模型與路線表建構 MILP 問題：
//! 每座候選倉庫一個二元開設變數；每條有定義路線的 (倉庫, 設施)
//! 配對一個非負流量變數。沒有路線的配對不產生變數。

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use flp_calc::{AnnualFacility, AnnualWarehouse};
use flp_core::{
    Comparison, FlpError, GeoPoint, LaneTable, LinearExpr, MilpProgram, PlanningConfig, Result,
    Sense, VarDomain, VarId,
};

/// 模型中的設施節點（係數已轉為浮點數）
#[derive(Debug, Clone)]
pub struct FacilityNode {
    /// 設施ID
    pub id: String,

    /// 設施名稱
    pub name: String,

    /// 地理座標
    pub position: GeoPoint,

    /// 年度需求量
    pub annual_demand: f64,
}

/// 模型中的倉庫節點（係數已轉為浮點數）
#[derive(Debug, Clone)]
pub struct WarehouseNode {
    /// 倉庫ID
    pub id: String,

    /// 地理座標
    pub position: GeoPoint,

    /// 年度容量
    pub annual_capacity: f64,

    /// 年化固定成本
    pub annual_fixed_cost: f64,
}

/// 建構完成的網路模型
///
/// 持有 MILP 問題以及解讀結果所需的變數對照表。
#[derive(Debug)]
pub struct NetworkModel {
    program: MilpProgram,
    facilities: Vec<FacilityNode>,
    warehouses: Vec<WarehouseNode>,
    open_vars: Vec<VarId>,
    flow_vars: Vec<(usize, usize, VarId)>,
}

impl NetworkModel {
    /// 建構網路模型
    ///
    /// 所有配置錯誤（缺少需求/倉庫資料、路線端點未知、K 超過候選數）
    /// 都在建立任何變數之前回報，不會交給求解器判定。
    pub fn build(
        facilities: &[AnnualFacility],
        warehouses: &[AnnualWarehouse],
        lanes: &LaneTable,
        config: &PlanningConfig,
    ) -> Result<NetworkModel> {
        tracing::info!(
            facilities = config.selected_facilities.len(),
            warehouses = config.selected_warehouses.len(),
            lanes = lanes.len(),
            "開始建構網路模型"
        );

        let facility_index: BTreeMap<&str, &AnnualFacility> =
            facilities.iter().map(|f| (f.id.as_str(), f)).collect();
        let warehouse_index: BTreeMap<&str, &AnnualWarehouse> =
            warehouses.iter().map(|w| (w.id.as_str(), w)).collect();

        // 路線端點必須指向已知實體
        for (warehouse_id, facility_id, _) in lanes.iter() {
            if !warehouse_index.contains_key(warehouse_id)
                || !facility_index.contains_key(facility_id)
            {
                return Err(FlpError::UnknownLaneEndpoint {
                    warehouse_id: warehouse_id.to_string(),
                    facility_id: facility_id.to_string(),
                });
            }
        }

        // 選擇集合解析：排序去重，保證建構順序可重現
        let selected_facilities: BTreeSet<&str> = config
            .selected_facilities
            .iter()
            .map(String::as_str)
            .collect();
        let selected_warehouses: BTreeSet<&str> = config
            .selected_warehouses
            .iter()
            .map(String::as_str)
            .collect();

        if config.required_open_count > selected_warehouses.len() {
            return Err(FlpError::OpenCountExceedsCandidates {
                required: config.required_open_count,
                available: selected_warehouses.len(),
            });
        }

        let mut facility_nodes = Vec::with_capacity(selected_facilities.len());
        for &id in &selected_facilities {
            let record = facility_index
                .get(id)
                .ok_or_else(|| FlpError::MissingFacility(id.to_string()))?;
            facility_nodes.push(FacilityNode {
                id: record.id.clone(),
                name: record.name.clone(),
                position: record.position,
                annual_demand: decimal_to_f64(record.annual_demand, &record.id)?,
            });
        }

        let mut warehouse_nodes = Vec::with_capacity(selected_warehouses.len());
        for &id in &selected_warehouses {
            let record = warehouse_index
                .get(id)
                .ok_or_else(|| FlpError::MissingWarehouse(id.to_string()))?;
            warehouse_nodes.push(WarehouseNode {
                id: record.id.clone(),
                position: record.position,
                annual_capacity: decimal_to_f64(record.annual_capacity, &record.id)?,
                annual_fixed_cost: decimal_to_f64(record.annual_fixed_cost, &record.id)?,
            });
        }

        let mut program = MilpProgram::new(Sense::Minimize);

        // 開設變數：每座候選倉庫一個二元變數
        let open_vars: Vec<VarId> = warehouse_nodes
            .iter()
            .map(|w| program.add_variable(format!("open_{}", w.id), VarDomain::Binary))
            .collect();

        // 流量變數：僅建立於有定義路線的配對，並快取其單位成本
        let mut flow_vars = Vec::new();
        let mut flow_costs = Vec::new();
        for (w_idx, warehouse) in warehouse_nodes.iter().enumerate() {
            for (f_idx, facility) in facility_nodes.iter().enumerate() {
                if !lanes.contains(&warehouse.id, &facility.id) {
                    continue;
                }
                let unit_cost = decimal_to_f64(
                    lanes.unit_cost(&warehouse.id, &facility.id)?,
                    &warehouse.id,
                )?;
                let var = program.add_variable(
                    format!("ship_{}_{}", warehouse.id, facility.id),
                    VarDomain::NonNegative,
                );
                flow_vars.push((w_idx, f_idx, var));
                flow_costs.push(unit_cost);
            }
        }

        // 目標式：年化固定成本 + 變動運輸成本
        let mut objective = LinearExpr::new();
        for (w_idx, warehouse) in warehouse_nodes.iter().enumerate() {
            objective.add_term(open_vars[w_idx], warehouse.annual_fixed_cost);
        }
        for (&(_, _, var), &unit_cost) in flow_vars.iter().zip(&flow_costs) {
            objective.add_term(var, unit_cost);
        }

        // 每座設施的年度需求必須恰好被滿足
        for (f_idx, facility) in facility_nodes.iter().enumerate() {
            let mut inflow = LinearExpr::new();
            for &(_, flow_f, var) in &flow_vars {
                if flow_f == f_idx {
                    inflow.add_term(var, 1.0);
                }
            }
            program.add_constraint(
                format!("demand_{}", facility.id),
                inflow,
                Comparison::Equal,
                facility.annual_demand,
            );
        }

        // 容量連動：出貨量 - 容量 × 開設 ≤ 0
        // 容量本身就是流量的上界，因此直接作為 big-M 係數
        for (w_idx, warehouse) in warehouse_nodes.iter().enumerate() {
            let mut outflow = LinearExpr::new();
            for &(flow_w, _, var) in &flow_vars {
                if flow_w == w_idx {
                    outflow.add_term(var, 1.0);
                }
            }
            outflow.add_term(open_vars[w_idx], -warehouse.annual_capacity);
            program.add_constraint(
                format!("capacity_{}", warehouse.id),
                outflow,
                Comparison::LessEqual,
                0.0,
            );
        }

        // 恰好開設 K 座倉庫
        let mut open_count = LinearExpr::new();
        for &var in &open_vars {
            open_count.add_term(var, 1.0);
        }
        program.add_constraint(
            "open_count",
            open_count,
            Comparison::Equal,
            config.required_open_count as f64,
        );

        // 年度總成本不得超過預算
        program.add_constraint(
            "budget",
            objective.clone(),
            Comparison::LessEqual,
            decimal_to_f64(config.budget, "config.budget")?,
        );

        program.set_objective(objective);

        tracing::info!(
            variables = program.num_variables(),
            constraints = program.constraints().len(),
            "網路模型建構完成"
        );

        Ok(NetworkModel {
            program,
            facilities: facility_nodes,
            warehouses: warehouse_nodes,
            open_vars,
            flow_vars,
        })
    }

    /// MILP 問題
    pub fn program(&self) -> &MilpProgram {
        &self.program
    }

    /// 設施節點（按ID排序）
    pub fn facilities(&self) -> &[FacilityNode] {
        &self.facilities
    }

    /// 倉庫節點（按ID排序）
    pub fn warehouses(&self) -> &[WarehouseNode] {
        &self.warehouses
    }

    /// 開設變數（與倉庫節點平行）
    pub fn open_vars(&self) -> &[VarId] {
        &self.open_vars
    }

    /// 流量變數：(倉庫索引, 設施索引, 變數)
    pub fn flow_vars(&self) -> &[(usize, usize, VarId)] {
        &self.flow_vars
    }
}

fn decimal_to_f64(value: Decimal, context: &str) -> Result<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FlpError::NumericConversion(format!("{context}: {value}")))
}
