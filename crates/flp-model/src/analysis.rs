//! 解讀與一致性檢核
//!
//! 把求解器回傳的變數指派轉成營運報告，並重新驗證所有約束。
//! 檢核失敗代表求解器回傳了數值不一致的「最佳解」，
//! 屬於契約違反，與無可行解是不同的錯誤。

use serde::{Deserialize, Serialize};

use flp_core::{Assignment, FlpError, PlanningConfig, Result, SolveStatus};
use rust_decimal::prelude::ToPrimitive;

use crate::builder::NetworkModel;

/// 一致性檢核的相對容差
pub const TOLERANCE: f64 = 1e-6;

/// 路由流量的有效下限；低於此值視為零流量
pub const FLOW_EPSILON: f64 = 1e-6;

/// 路由表項目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    /// 起點倉庫ID
    pub warehouse_id: String,

    /// 終點設施ID
    pub facility_id: String,

    /// 年度出貨量
    pub units: f64,
}

/// 單一倉庫的結果摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseSummary {
    /// 倉庫ID
    pub warehouse_id: String,

    /// 是否開設
    pub open: bool,

    /// 年度出貨量
    pub shipped_units: f64,

    /// 容量利用率（0 到 1；未開設為 0）
    pub utilization: f64,
}

/// 規劃結果報告
///
/// 呈現層（主控台、JSON、地圖）都只是本結構的消費者。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    /// 求解狀態
    pub status: SolveStatus,

    /// 年度總成本（目標值）
    pub total_cost: f64,

    /// 年度總配送量（所有設施年度需求的總和）
    pub total_units: f64,

    /// 平均單位成本；總量為零時無定義
    pub cost_per_unit: Option<f64>,

    /// 剩餘預算
    pub remaining_budget: f64,

    /// 各倉庫摘要（按ID排序）
    pub warehouses: Vec<WarehouseSummary>,

    /// 路由表：所有流量為正的配對，按 (倉庫ID, 設施ID) 排序
    pub routes: Vec<RouteEntry>,
}

/// 解讀器
pub struct SolutionAnalyst;

impl SolutionAnalyst {
    /// 解讀變數指派並重新檢核約束
    pub fn analyze(
        model: &NetworkModel,
        assignment: &Assignment,
        config: &PlanningConfig,
        status: SolveStatus,
    ) -> Result<PlanReport> {
        let program = model.program();

        if assignment.len() != program.num_variables() {
            return Err(FlpError::InconsistentSolution(format!(
                "變數數量不符：宣告 {}，回傳 {}",
                program.num_variables(),
                assignment.len()
            )));
        }

        // 每座設施的入向流量必須等於年度需求
        let mut inflows = vec![0.0; model.facilities().len()];
        let mut outflows = vec![0.0; model.warehouses().len()];
        for &(w_idx, f_idx, var) in model.flow_vars() {
            let flow = assignment.value(var);
            inflows[f_idx] += flow;
            outflows[w_idx] += flow;
        }

        for (f_idx, facility) in model.facilities().iter().enumerate() {
            if !close(inflows[f_idx], facility.annual_demand) {
                return Err(FlpError::InconsistentSolution(format!(
                    "設施 {} 的入向流量 {} 不等於年度需求 {}",
                    facility.id, inflows[f_idx], facility.annual_demand
                )));
            }
        }

        // 開設判定、容量檢核與未開設即零流量
        let mut open_count = 0usize;
        let mut summaries = Vec::with_capacity(model.warehouses().len());
        for (w_idx, warehouse) in model.warehouses().iter().enumerate() {
            let open = assignment.value(model.open_vars()[w_idx]) > 0.5;
            let shipped = outflows[w_idx];

            if open {
                open_count += 1;
                if !within_upper(shipped, warehouse.annual_capacity) {
                    return Err(FlpError::InconsistentSolution(format!(
                        "倉庫 {} 的出貨量 {} 超過年度容量 {}",
                        warehouse.id, shipped, warehouse.annual_capacity
                    )));
                }
            } else if shipped.abs() > FLOW_EPSILON {
                return Err(FlpError::InconsistentSolution(format!(
                    "未開設的倉庫 {} 仍有出貨量 {}",
                    warehouse.id, shipped
                )));
            }

            let utilization = if open && warehouse.annual_capacity > 0.0 {
                (shipped / warehouse.annual_capacity).min(1.0)
            } else {
                0.0
            };

            summaries.push(WarehouseSummary {
                warehouse_id: warehouse.id.clone(),
                open,
                shipped_units: shipped,
                utilization,
            });
        }

        if open_count != config.required_open_count {
            return Err(FlpError::InconsistentSolution(format!(
                "開設倉庫數 {} 不等於要求的 {}",
                open_count, config.required_open_count
            )));
        }

        // 目標值必須與重新計算吻合，且不得超過預算
        let total_cost = assignment.objective_value();
        let recomputed = program.objective().evaluate(assignment);
        if !close(total_cost, recomputed) {
            return Err(FlpError::InconsistentSolution(format!(
                "目標值 {total_cost} 與重新計算的 {recomputed} 不符"
            )));
        }

        let budget = config
            .budget
            .to_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FlpError::NumericConversion(format!("config.budget: {}", config.budget)))?;
        if !within_upper(total_cost, budget) {
            return Err(FlpError::InconsistentSolution(format!(
                "年度總成本 {total_cost} 超過預算 {budget}"
            )));
        }

        let total_units: f64 = model.facilities().iter().map(|f| f.annual_demand).sum();
        let cost_per_unit = if total_units > 0.0 {
            Some(total_cost / total_units)
        } else {
            None
        };

        // 路由表：流量為正的配對，按 (倉庫ID, 設施ID) 排序
        let mut routes: Vec<RouteEntry> = model
            .flow_vars()
            .iter()
            .filter_map(|&(w_idx, f_idx, var)| {
                let units = assignment.value(var);
                (units > FLOW_EPSILON).then(|| RouteEntry {
                    warehouse_id: model.warehouses()[w_idx].id.clone(),
                    facility_id: model.facilities()[f_idx].id.clone(),
                    units,
                })
            })
            .collect();
        routes.sort_by(|a, b| {
            (a.warehouse_id.as_str(), a.facility_id.as_str())
                .cmp(&(b.warehouse_id.as_str(), b.facility_id.as_str()))
        });

        tracing::info!(
            total_cost,
            total_units,
            open_count,
            routes = routes.len(),
            "解讀完成，一致性檢核通過"
        );

        Ok(PlanReport {
            status,
            total_cost,
            total_units,
            cost_per_unit,
            remaining_budget: budget - total_cost,
            warehouses: summaries,
            routes,
        })
    }
}

/// 相對容差等式比較（帶 1.0 的絕對下限）
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// 上界比較：允許相對容差內的輕微超出
fn within_upper(value: f64, bound: f64) -> bool {
    value <= bound + TOLERANCE * bound.abs().max(1.0)
}
