//! # FLP Solver
//!
//! HiGHS 求解後端：實作 [`flp_core::MilpSolver`] 介面契約

pub mod highs_backend;

// Re-export 主要類型
pub use highs_backend::HighsSolver;
