//! # FLP Export
//!
//! 結果呈現層：把規劃報告轉為 GeoJSON 地圖文件

pub mod geojson;

pub use geojson::MapExporter;
