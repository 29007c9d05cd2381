//! 求解器介面契約
//!
//! 以後端無關的方式描述線性/混合整數規劃：變數宣告、線性約束與目標式。
//! 具體求解引擎只需實作 [`MilpSolver`]，即可替換而不影響模型建構。

use serde::{Deserialize, Serialize};

/// 決策變數識別碼（宣告順序索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(usize);

impl VarId {
    /// 宣告順序索引
    pub fn index(self) -> usize {
        self.0
    }
}

/// 變數值域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    /// 0/1 整數變數
    Binary,
    /// 非負連續變數
    NonNegative,
}

/// 變數宣告
#[derive(Debug, Clone)]
pub struct VariableDef {
    /// 變數名稱（除錯與模型傾印用）
    pub name: String,

    /// 值域
    pub domain: VarDomain,
}

/// 線性表達式（變數係數對的總和）
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    /// 創建空表達式
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一項係數
    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    /// 走訪所有項
    pub fn terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.terms.iter().copied()
    }

    /// 在給定的變數值下計算表達式的值
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * assignment.value(var))
            .sum()
    }

    /// 項數
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// 是否為空表達式
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// 約束比較方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// 小於等於
    LessEqual,
    /// 大於等於
    GreaterEqual,
    /// 等於
    Equal,
}

/// 線性約束：表達式與界限的比較
#[derive(Debug, Clone)]
pub struct Constraint {
    /// 約束名稱（除錯與違反回報用）
    pub name: String,

    /// 左側線性表達式
    pub expr: LinearExpr,

    /// 比較方向
    pub comparison: Comparison,

    /// 右側界限
    pub rhs: f64,
}

/// 目標方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// 最小化
    Minimize,
    /// 最大化
    Maximize,
}

/// 混合整數線性規劃問題
#[derive(Debug, Clone)]
pub struct MilpProgram {
    variables: Vec<VariableDef>,
    objective: LinearExpr,
    sense: Sense,
    constraints: Vec<Constraint>,
}

impl MilpProgram {
    /// 創建新的問題
    pub fn new(sense: Sense) -> Self {
        Self {
            variables: Vec::new(),
            objective: LinearExpr::new(),
            sense,
            constraints: Vec::new(),
        }
    }

    /// 宣告一個決策變數，回傳其識別碼
    pub fn add_variable(&mut self, name: impl Into<String>, domain: VarDomain) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(VariableDef {
            name: name.into(),
            domain,
        });
        id
    }

    /// 設置目標式
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// 追加一條約束
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        comparison: Comparison,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            expr,
            comparison,
            rhs,
        });
    }

    /// 變數宣告清單（按宣告順序）
    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    /// 變數數量
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// 目標式
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// 目標方向
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// 約束清單
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// 求解狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// 找到最佳解
    Optimal,
    /// 無可行解
    Infeasible,
    /// 目標無界
    Unbounded,
    /// 達到時間上限
    TimedOut,
    /// 求解引擎錯誤
    SolverError,
}

/// 變數值指派（求解輸出，產生後不再修改）
#[derive(Debug, Clone)]
pub struct Assignment {
    values: Vec<f64>,
    objective_value: f64,
}

impl Assignment {
    /// 由變數值（按宣告順序）與目標值創建指派
    pub fn new(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            values,
            objective_value,
        }
    }

    /// 查詢變數值
    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.index()]
    }

    /// 目標值
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// 變數數量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否沒有任何變數值
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 求解結果
///
/// 每個狀態都必須被呼叫端顯式處理；無可行解與無界絕不等同於零成本解。
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// 最佳解
    Optimal(Assignment),
    /// 逾時；若求解器已有可行解則一併回傳
    TimedOut { best: Option<Assignment> },
    /// 無可行解
    Infeasible,
    /// 目標無界
    Unbounded,
    /// 引擎層錯誤
    Error(String),
}

impl SolveOutcome {
    /// 對應的求解狀態
    pub fn status(&self) -> SolveStatus {
        match self {
            SolveOutcome::Optimal(_) => SolveStatus::Optimal,
            SolveOutcome::TimedOut { .. } => SolveStatus::TimedOut,
            SolveOutcome::Infeasible => SolveStatus::Infeasible,
            SolveOutcome::Unbounded => SolveStatus::Unbounded,
            SolveOutcome::Error(_) => SolveStatus::SolverError,
        }
    }
}

/// MILP 求解能力
///
/// 求解是整條管線唯一的阻塞步驟；實作可自行支援時間上限。
pub trait MilpSolver {
    /// 求解問題
    fn solve(&self, program: &MilpProgram) -> SolveOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_declaration_order() {
        let mut program = MilpProgram::new(Sense::Minimize);
        let x = program.add_variable("x", VarDomain::Binary);
        let y = program.add_variable("y", VarDomain::NonNegative);

        assert_eq!(x.index(), 0);
        assert_eq!(y.index(), 1);
        assert_eq!(program.num_variables(), 2);
        assert_eq!(program.variables()[0].name, "x");
        assert_eq!(program.variables()[1].domain, VarDomain::NonNegative);
    }

    #[test]
    fn test_expression_evaluation() {
        let mut program = MilpProgram::new(Sense::Minimize);
        let x = program.add_variable("x", VarDomain::NonNegative);
        let y = program.add_variable("y", VarDomain::NonNegative);

        let mut expr = LinearExpr::new();
        expr.add_term(x, 2.0);
        expr.add_term(y, 0.5);

        let assignment = Assignment::new(vec![3.0, 4.0], 0.0);
        assert_eq!(expr.evaluate(&assignment), 8.0);
    }

    #[test]
    fn test_constraint_listing() {
        let mut program = MilpProgram::new(Sense::Minimize);
        let x = program.add_variable("x", VarDomain::NonNegative);

        let mut expr = LinearExpr::new();
        expr.add_term(x, 1.0);
        program.add_constraint("cap_x", expr, Comparison::LessEqual, 10.0);

        assert_eq!(program.constraints().len(), 1);
        assert_eq!(program.constraints()[0].name, "cap_x");
        assert_eq!(program.constraints()[0].comparison, Comparison::LessEqual);
        assert_eq!(program.constraints()[0].rhs, 10.0);
    }

    #[test]
    fn test_outcome_status_mapping() {
        let assignment = Assignment::new(vec![1.0], 5.0);

        assert_eq!(
            SolveOutcome::Optimal(assignment.clone()).status(),
            SolveStatus::Optimal
        );
        assert_eq!(
            SolveOutcome::TimedOut {
                best: Some(assignment)
            }
            .status(),
            SolveStatus::TimedOut
        );
        assert_eq!(SolveOutcome::Infeasible.status(), SolveStatus::Infeasible);
        assert_eq!(SolveOutcome::Unbounded.status(), SolveStatus::Unbounded);
        assert_eq!(
            SolveOutcome::Error("boom".to_string()).status(),
            SolveStatus::SolverError
        );
    }
}
