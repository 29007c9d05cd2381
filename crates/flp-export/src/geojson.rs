//! GeoJSON 地圖匯出
//!
//! 把規劃報告轉為單一 FeatureCollection：設施與倉庫為 Point，
//! 路由為 LineString。樣式屬性（顏色、線寬）直接寫入 feature
//! 的 properties，前端地圖庫可原樣取用。

use serde_json::{json, Value};

use flp_core::{Facility, FlpError, Result, Warehouse};
use flp_model::PlanReport;

/// 路由線寬的基準值
const BASE_ROUTE_WEIGHT: f64 = 2.0;

/// 路由線寬隨流量比例增加的最大幅度
const ROUTE_WEIGHT_SPAN: f64 = 6.0;

/// 開設倉庫的標記顏色
const OPEN_COLOR: &str = "green";

/// 未開設倉庫的標記顏色
const CLOSED_COLOR: &str = "gray";

/// 設施的標記顏色
const FACILITY_COLOR: &str = "blue";

/// 地圖匯出器
pub struct MapExporter;

impl MapExporter {
    /// 把規劃報告轉為 GeoJSON FeatureCollection
    ///
    /// `facilities` 與 `warehouses` 提供座標與名稱；報告中引用的
    /// 每個實體ID都必須能在其中找到，否則回傳 `MissingCoordinates`。
    pub fn to_geojson(
        report: &PlanReport,
        facilities: &[Facility],
        warehouses: &[Warehouse],
    ) -> Result<Value> {
        let mut features = Vec::new();

        for summary in &report.warehouses {
            let warehouse = find_warehouse(warehouses, &summary.warehouse_id)?;

            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [warehouse.position.lon, warehouse.position.lat],
                },
                "properties": {
                    "kind": "warehouse",
                    "id": warehouse.id,
                    "open": summary.open,
                    "shipped_units": summary.shipped_units,
                    "utilization": summary.utilization,
                    "marker-color": if summary.open { OPEN_COLOR } else { CLOSED_COLOR },
                },
            }));
        }

        for facility in facilities {
            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [facility.position.lon, facility.position.lat],
                },
                "properties": {
                    "kind": "facility",
                    "id": facility.id,
                    "tooltip": facility.name,
                    "marker-color": FACILITY_COLOR,
                },
            }));
        }

        // 線寬按流量佔最大路由流量的比例縮放
        let max_flow = report
            .routes
            .iter()
            .map(|r| r.units)
            .fold(0.0_f64, f64::max);

        for route in &report.routes {
            let warehouse = find_warehouse(warehouses, &route.warehouse_id)?;
            let facility = facilities
                .iter()
                .find(|f| f.id == route.facility_id)
                .ok_or_else(|| FlpError::MissingCoordinates(route.facility_id.clone()))?;

            let weight = if max_flow > 0.0 {
                BASE_ROUTE_WEIGHT + (route.units / max_flow) * ROUTE_WEIGHT_SPAN
            } else {
                BASE_ROUTE_WEIGHT
            };

            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [
                        [warehouse.position.lon, warehouse.position.lat],
                        [facility.position.lon, facility.position.lat],
                    ],
                },
                "properties": {
                    "kind": "route",
                    "warehouse_id": route.warehouse_id,
                    "facility_id": route.facility_id,
                    "units": route.units,
                    "stroke-width": weight,
                },
            }));
        }

        tracing::info!(features = features.len(), "GeoJSON 匯出完成");

        Ok(json!({
            "type": "FeatureCollection",
            "features": features,
            "properties": {
                "center": map_center(facilities),
                "total_cost": report.total_cost,
                "status": report.status,
            },
        }))
    }
}

fn find_warehouse<'a>(warehouses: &'a [Warehouse], id: &str) -> Result<&'a Warehouse> {
    warehouses
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| FlpError::MissingCoordinates(id.to_string()))
}

/// 地圖中心：設施座標的算術平均（[緯度, 經度]）
fn map_center(facilities: &[Facility]) -> [f64; 2] {
    if facilities.is_empty() {
        return [0.0, 0.0];
    }

    let n = facilities.len() as f64;
    let lat = facilities.iter().map(|f| f.position.lat).sum::<f64>() / n;
    let lon = facilities.iter().map(|f| f.position.lon).sum::<f64>() / n;
    [lat, lon]
}

#[cfg(test)]
mod tests {
    use super::*;
    use flp_core::{GeoPoint, SolveStatus};
    use flp_model::{RouteEntry, WarehouseSummary};
    use rust_decimal::Decimal;

    fn facility(id: &str, name: &str, lat: f64, lon: f64) -> Facility {
        Facility::new(id.to_string(), GeoPoint::new(lat, lon), Decimal::from(100))
            .with_name(name.to_string())
    }

    fn warehouse(id: &str, lat: f64, lon: f64) -> Warehouse {
        Warehouse::new(id.to_string(), GeoPoint::new(lat, lon), Decimal::from(500))
    }

    fn report() -> PlanReport {
        PlanReport {
            status: SolveStatus::Optimal,
            total_cost: 123_000.0,
            total_units: 73_000.0,
            cost_per_unit: Some(123_000.0 / 73_000.0),
            remaining_budget: 877_000.0,
            warehouses: vec![
                WarehouseSummary {
                    warehouse_id: "WH_A".to_string(),
                    open: true,
                    shipped_units: 73_000.0,
                    utilization: 0.4,
                },
                WarehouseSummary {
                    warehouse_id: "WH_B".to_string(),
                    open: false,
                    shipped_units: 0.0,
                    utilization: 0.0,
                },
            ],
            routes: vec![
                RouteEntry {
                    warehouse_id: "WH_A".to_string(),
                    facility_id: "FAC_1".to_string(),
                    units: 43_800.0,
                },
                RouteEntry {
                    warehouse_id: "WH_A".to_string(),
                    facility_id: "FAC_2".to_string(),
                    units: 29_200.0,
                },
            ],
        }
    }

    fn dataset() -> (Vec<Facility>, Vec<Warehouse>) {
        let facilities = vec![
            facility("FAC_1", "醫學中心", 24.80, 121.00),
            facility("FAC_2", "工學院", 24.78, 120.98),
        ];
        let warehouses = vec![warehouse("WH_A", 24.81, 120.99), warehouse("WH_B", 24.77, 121.02)];
        (facilities, warehouses)
    }

    fn features_of_kind<'a>(doc: &'a Value, kind: &str) -> Vec<&'a Value> {
        doc["features"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|f| f["properties"]["kind"] == kind)
            .collect()
    }

    #[test]
    fn test_feature_collection_layout() {
        let (facilities, warehouses) = dataset();
        let doc = MapExporter::to_geojson(&report(), &facilities, &warehouses).unwrap();

        assert_eq!(doc["type"], "FeatureCollection");
        assert_eq!(features_of_kind(&doc, "warehouse").len(), 2);
        assert_eq!(features_of_kind(&doc, "facility").len(), 2);
        assert_eq!(features_of_kind(&doc, "route").len(), 2);
    }

    #[test]
    fn test_warehouse_coloring_follows_open_state() {
        let (facilities, warehouses) = dataset();
        let doc = MapExporter::to_geojson(&report(), &facilities, &warehouses).unwrap();

        let markers = features_of_kind(&doc, "warehouse");
        assert_eq!(markers[0]["properties"]["marker-color"], "green");
        assert_eq!(markers[1]["properties"]["marker-color"], "gray");
    }

    #[test]
    fn test_facility_tooltip_uses_display_name() {
        let (facilities, warehouses) = dataset();
        let doc = MapExporter::to_geojson(&report(), &facilities, &warehouses).unwrap();

        let markers = features_of_kind(&doc, "facility");
        assert_eq!(markers[0]["properties"]["tooltip"], "醫學中心");
    }

    #[test]
    fn test_route_weight_scales_with_flow() {
        let (facilities, warehouses) = dataset();
        let doc = MapExporter::to_geojson(&report(), &facilities, &warehouses).unwrap();

        let routes = features_of_kind(&doc, "route");
        // 最大流量的路由取得完整線寬 2 + 6 = 8
        let heaviest = routes[0]["properties"]["stroke-width"].as_f64().unwrap();
        assert!((heaviest - 8.0).abs() < 1e-9);

        // 29_200 / 43_800 的比例
        let lighter = routes[1]["properties"]["stroke-width"].as_f64().unwrap();
        assert!((lighter - (2.0 + 6.0 * 29_200.0 / 43_800.0)).abs() < 1e-9);
    }

    #[test]
    fn test_geojson_coordinates_are_lon_lat() {
        let (facilities, warehouses) = dataset();
        let doc = MapExporter::to_geojson(&report(), &facilities, &warehouses).unwrap();

        let marker = &features_of_kind(&doc, "facility")[0];
        let coordinates = marker["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coordinates[0].as_f64().unwrap(), 121.00);
        assert_eq!(coordinates[1].as_f64().unwrap(), 24.80);
    }

    #[test]
    fn test_center_is_mean_of_facility_positions() {
        let (facilities, warehouses) = dataset();
        let doc = MapExporter::to_geojson(&report(), &facilities, &warehouses).unwrap();

        let center = doc["properties"]["center"].as_array().unwrap();
        assert!((center[0].as_f64().unwrap() - 24.79).abs() < 1e-9);
        assert!((center[1].as_f64().unwrap() - 120.99).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_route_entity_rejected() {
        let (facilities, _) = dataset();
        let warehouses = vec![warehouse("WH_A", 24.81, 120.99)];

        let err = MapExporter::to_geojson(&report(), &facilities, &warehouses).unwrap_err();
        assert!(matches!(err, FlpError::MissingCoordinates(id) if id == "WH_B"));
    }

    #[test]
    fn test_no_routes_uses_base_weight_everywhere() {
        let (facilities, warehouses) = dataset();
        let mut empty = report();
        empty.routes.clear();

        let doc = MapExporter::to_geojson(&empty, &facilities, &warehouses).unwrap();
        assert!(features_of_kind(&doc, "route").is_empty());
    }
}
