//! 地理座標模型

use serde::{Deserialize, Serialize};

/// 地理座標（WGS84 經緯度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// 緯度
    pub lat: f64,

    /// 經度
    pub lon: f64,
}

impl GeoPoint {
    /// 創建新的座標
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
