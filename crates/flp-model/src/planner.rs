//! 規劃管線
//!
//! 固定的執行順序：驗證配置 → 年化 → 建構模型 → 求解 → 解讀。
//! 任一階段失敗即中止，後續階段不會執行。

use flp_core::{Facility, FlpError, LaneTable, MilpSolver, PlanningConfig, Result, SolveOutcome, Warehouse};

use flp_calc::CostCalculator;

use crate::analysis::{PlanReport, SolutionAnalyst};
use crate::builder::NetworkModel;

/// 規劃器
///
/// 持有配置，對任意資料集與求解器執行完整管線。
pub struct Planner {
    config: PlanningConfig,
}

impl Planner {
    /// 創建新的規劃器
    pub fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    /// 規劃配置
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 執行完整規劃管線
    ///
    /// 配置或資料錯誤在呼叫求解器之前回報；
    /// 求解器回報無可行解、無界或引擎錯誤時轉為 [`FlpError::NoOptimalSolution`]。
    /// 逾時但已有可行解時照常解讀，報告狀態標記為逾時。
    pub fn plan(
        &self,
        facilities: &[Facility],
        warehouses: &[Warehouse],
        lanes: &LaneTable,
        solver: &dyn MilpSolver,
    ) -> Result<PlanReport> {
        self.config.validate()?;

        tracing::info!(
            facilities = facilities.len(),
            warehouses = warehouses.len(),
            lanes = lanes.len(),
            k = self.config.required_open_count,
            "開始規劃"
        );

        // 整批年化；選擇集合的篩選交給模型建構器
        let annual_facilities = facilities
            .iter()
            .map(|f| CostCalculator::annualize_facility(f, self.config.horizon_days))
            .collect::<Result<Vec<_>>>()?;
        let annual_warehouses = warehouses
            .iter()
            .map(|w| {
                CostCalculator::annualize_warehouse(
                    w,
                    self.config.horizon_days,
                    self.config.amortization_periods,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let model = NetworkModel::build(&annual_facilities, &annual_warehouses, lanes, &self.config)?;

        let outcome = solver.solve(model.program());
        let status = outcome.status();

        match outcome {
            SolveOutcome::Optimal(assignment) => {
                SolutionAnalyst::analyze(&model, &assignment, &self.config, status)
            }
            SolveOutcome::TimedOut { best: Some(assignment) } => {
                tracing::warn!("求解逾時，以當前可行解產生報告");
                SolutionAnalyst::analyze(&model, &assignment, &self.config, status)
            }
            SolveOutcome::TimedOut { best: None }
            | SolveOutcome::Infeasible
            | SolveOutcome::Unbounded => {
                tracing::warn!(?status, "求解未產生可用解");
                Err(FlpError::NoOptimalSolution(status))
            }
            SolveOutcome::Error(message) => {
                tracing::error!(%message, "求解引擎錯誤");
                Err(FlpError::NoOptimalSolution(status))
            }
        }
    }
}
