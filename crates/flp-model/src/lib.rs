//! # FLP Model
//!
//! 問題建構、解讀與規劃管線：
//! 由年化成本模型與路線表建構 MILP 問題，將求解結果轉為營運報告

pub mod analysis;
pub mod builder;
pub mod planner;

// Re-export 主要類型
pub use analysis::{PlanReport, RouteEntry, SolutionAnalyst, WarehouseSummary};
pub use builder::{FacilityNode, NetworkModel, WarehouseNode};
pub use planner::Planner;
