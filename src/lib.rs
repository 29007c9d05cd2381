//! # FLP - 設施選址與配送規劃引擎
//!
//! 工作區總入口：由候選倉庫、需求設施與運輸路線建構
//! 混合整數線性規劃問題，求解年度總成本最小的倉庫開設方案，
//! 並把結果轉為營運報告與 GeoJSON 地圖。
//!
//! - [`flp_core`]：領域模型、錯誤類型與求解器契約
//! - [`flp_calc`]：年化成本模型
//! - [`flp_solver`]：HiGHS 求解後端
//! - [`flp_model`]：問題建構、解讀與規劃管線
//! - [`flp_export`]：GeoJSON 匯出

pub use flp_calc;
pub use flp_core;
pub use flp_export;
pub use flp_model;
pub use flp_solver;
