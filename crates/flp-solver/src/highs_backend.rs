//! HiGHS 求解後端
//!
//! 將後端無關的 [`MilpProgram`] 轉譯為 HiGHS 的列式問題並求解，
//! 並把每一種引擎狀態顯式對映回 [`SolveOutcome`]。

use highs::{Col, HighsModelStatus, RowProblem, Sense as HighsSense};

use flp_core::{
    Assignment, Comparison, MilpProgram, MilpSolver, Sense, SolveOutcome, VarDomain,
};

/// HiGHS 求解器
///
/// 求解是阻塞呼叫；可設置時間上限，逾時回傳 `TimedOut`
/// 並附上當前已知的可行解（若有）。
#[derive(Debug, Clone, Default)]
pub struct HighsSolver {
    /// 時間上限（秒）；`None` 表示不限制
    time_limit_secs: Option<f64>,
}

impl HighsSolver {
    /// 創建新的求解器（不限時）
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置時間上限（秒）
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_secs = Some(seconds);
        self
    }
}

impl MilpSolver for HighsSolver {
    fn solve(&self, program: &MilpProgram) -> SolveOutcome {
        let n_vars = program.num_variables();

        tracing::info!(
            variables = n_vars,
            constraints = program.constraints().len(),
            "提交問題至 HiGHS"
        );

        // 目標係數按變數彙總（宣告順序即欄索引）
        let mut objective_coefficients = vec![0.0; n_vars];
        for (var, coefficient) in program.objective().terms() {
            objective_coefficients[var.index()] += coefficient;
        }

        let mut problem = RowProblem::new();
        let cols: Vec<Col> = program
            .variables()
            .iter()
            .enumerate()
            .map(|(i, def)| match def.domain {
                // 整數性必須在建立欄位時指定
                VarDomain::Binary => {
                    problem.add_column_with_integrality(objective_coefficients[i], 0.0..=1.0, true)
                }
                VarDomain::NonNegative => problem.add_column(objective_coefficients[i], 0.0..),
            })
            .collect();

        for constraint in program.constraints() {
            let terms: Vec<(Col, f64)> = constraint
                .expr
                .terms()
                .map(|(var, coefficient)| (cols[var.index()], coefficient))
                .collect();

            match constraint.comparison {
                Comparison::LessEqual => problem.add_row(..=constraint.rhs, terms),
                Comparison::GreaterEqual => problem.add_row(constraint.rhs.., terms),
                Comparison::Equal => problem.add_row(constraint.rhs..=constraint.rhs, terms),
            };
        }

        let sense = match program.sense() {
            Sense::Minimize => HighsSense::Minimise,
            Sense::Maximize => HighsSense::Maximise,
        };

        let mut model = problem.optimise(sense);
        model.set_option("output_flag", false);
        if let Some(seconds) = self.time_limit_secs {
            model.set_option("time_limit", seconds);
        }

        let solved = model.solve();
        let status = solved.status();

        match status {
            HighsModelStatus::Optimal => {
                let solution = solved.get_solution();
                let values: Vec<f64> = cols.iter().map(|&col| solution[col]).collect();
                let objective = solved.objective_value();

                tracing::info!(objective, "HiGHS 回傳最佳解");
                SolveOutcome::Optimal(Assignment::new(values, objective))
            }
            HighsModelStatus::Infeasible => {
                tracing::warn!("HiGHS 判定無可行解");
                SolveOutcome::Infeasible
            }
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                tracing::warn!(?status, "HiGHS 判定目標無界");
                SolveOutcome::Unbounded
            }
            HighsModelStatus::ReachedTimeLimit => {
                // 逾時：若引擎已有完整且有限的 incumbent 則一併回傳
                let solution = solved.get_solution();
                let values = solution.columns().to_vec();
                let best = if values.len() == n_vars && values.iter().all(|v| v.is_finite()) {
                    Some(Assignment::new(values, solved.objective_value()))
                } else {
                    None
                };

                tracing::warn!(has_incumbent = best.is_some(), "HiGHS 達到時間上限");
                SolveOutcome::TimedOut { best }
            }
            other => {
                tracing::error!(status = ?other, "HiGHS 回傳非預期狀態");
                SolveOutcome::Error(format!("HiGHS 狀態: {other:?}"))
            }
        }
    }
}
