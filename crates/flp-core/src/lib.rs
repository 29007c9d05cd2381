//! # FLP Core
//!
//! 核心資料模型、規劃配置與求解器介面契約

pub mod config;
pub mod facility;
pub mod geo;
pub mod lane;
pub mod program;
pub mod warehouse;

// Re-export 主要類型
pub use config::PlanningConfig;
pub use facility::Facility;
pub use geo::GeoPoint;
pub use lane::{Lane, LaneTable};
pub use program::{
    Assignment, Comparison, Constraint, LinearExpr, MilpProgram, MilpSolver, Sense, SolveOutcome,
    SolveStatus, VarDomain, VarId,
};
pub use warehouse::Warehouse;

use rust_decimal::Decimal;

/// FLP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum FlpError {
    #[error("實體 {entity_id} 的欄位 {field} 不可為負值: {value}")]
    NegativeValue {
        entity_id: String,
        field: &'static str,
        value: Decimal,
    },

    #[error("攤提期數必須大於零")]
    ZeroAmortization,

    #[error("找不到設施需求資料: {0}")]
    MissingFacility(String),

    #[error("找不到倉庫資料: {0}")]
    MissingWarehouse(String),

    #[error("運輸路線引用了未知端點: {warehouse_id} -> {facility_id}")]
    UnknownLaneEndpoint {
        warehouse_id: String,
        facility_id: String,
    },

    #[error("重複的運輸路線: {warehouse_id} -> {facility_id}")]
    DuplicateLane {
        warehouse_id: String,
        facility_id: String,
    },

    #[error("未定義的運輸路線: {warehouse_id} -> {facility_id}")]
    MissingLane {
        warehouse_id: String,
        facility_id: String,
    },

    #[error("選擇集合不可為空: {0}")]
    EmptySelection(&'static str),

    #[error("設施與倉庫的 ID 空間必須互斥，發現重複: {0}")]
    OverlappingIds(String),

    #[error("要求開設 {required} 座倉庫，但候選倉庫僅 {available} 座")]
    OpenCountExceedsCandidates { required: usize, available: usize },

    #[error("數值無法轉換為浮點數: {0}")]
    NumericConversion(String),

    #[error("求解器未回傳最佳解，狀態: {0:?}")]
    NoOptimalSolution(SolveStatus),

    #[error("求解結果未通過一致性檢核: {0}")]
    InconsistentSolution(String),

    #[error("匯出失敗，路由引用了缺少座標的實體: {0}")]
    MissingCoordinates(String),
}

pub type Result<T> = std::result::Result<T, FlpError>;
