//! 校園物流選址示例
//!
//! 6 座校園設施、3 座候選倉庫，在預算內恰好開設 2 座，
//! 求年度總成本最小的配送方案並輸出 GeoJSON 地圖。

use flp_core::{Facility, GeoPoint, Lane, LaneTable, PlanningConfig, Warehouse};
use flp_export::MapExporter;
use flp_model::Planner;
use flp_solver::HighsSolver;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== 校園物流選址示例 ===\n");

    // 需求設施（每日需求量）
    let facilities = vec![
        facility("MED_CENTER", "醫學中心", 24.7925, 121.0020, 120),
        facility("ENG_BUILDING", "工程館", 24.7880, 120.9965, 80),
        facility("SCIENCE_HALL", "理學館", 24.7942, 120.9938, 60),
        facility("DORM_A", "第一宿舍", 24.7858, 121.0051, 150),
        facility("DORM_B", "第二宿舍", 24.7902, 121.0087, 140),
        facility("LIBRARY", "總圖書館", 24.7951, 121.0005, 50),
    ];

    // 候選倉庫（每日容量、建置成本、每日營運成本）
    let warehouses = vec![
        warehouse("WH_NORTH", 24.8103, 120.9902, 400, 2_000_000, 300),
        warehouse("WH_SOUTH", 24.7712, 121.0048, 350, 1_800_000, 280),
        warehouse("WH_EAST", 24.7933, 121.0214, 300, 1_500_000, 250),
    ];

    // 運輸路線（稀疏：沒有列出的配對不可出貨）
    let lanes = LaneTable::new(vec![
        lane("WH_NORTH", "MED_CENTER", 2),
        lane("WH_NORTH", "ENG_BUILDING", 2),
        lane("WH_NORTH", "SCIENCE_HALL", 1),
        lane("WH_NORTH", "DORM_A", 3),
        lane("WH_NORTH", "DORM_B", 3),
        lane("WH_NORTH", "LIBRARY", 1),
        lane("WH_SOUTH", "MED_CENTER", 3),
        lane("WH_SOUTH", "ENG_BUILDING", 2),
        lane("WH_SOUTH", "SCIENCE_HALL", 3),
        lane("WH_SOUTH", "DORM_A", 1),
        lane("WH_SOUTH", "DORM_B", 2),
        lane("WH_SOUTH", "LIBRARY", 3),
        lane("WH_EAST", "MED_CENTER", 3),
        lane("WH_EAST", "DORM_B", 1),
        lane("WH_EAST", "LIBRARY", 2),
    ])?;

    // 年度預算 150 萬，恰好開設 2 座倉庫
    let config = PlanningConfig::new(
        Decimal::from(1_500_000),
        2,
        facilities.iter().map(|f| f.id.clone()).collect(),
        warehouses.iter().map(|w| w.id.clone()).collect(),
    );

    let planner = Planner::new(config);
    let report = planner.plan(&facilities, &warehouses, &lanes, &HighsSolver::new())?;

    println!("年度總成本:   {:.0}", report.total_cost);
    println!("年度配送量:   {:.0}", report.total_units);
    if let Some(unit_cost) = report.cost_per_unit {
        println!("平均單位成本: {unit_cost:.2}");
    }
    println!("剩餘預算:     {:.0}\n", report.remaining_budget);

    println!("倉庫摘要:");
    for summary in &report.warehouses {
        println!(
            "  - {}: 開設={}, 出貨={:.0}, 利用率={:.1}%",
            summary.warehouse_id,
            summary.open,
            summary.shipped_units,
            summary.utilization * 100.0
        );
    }

    println!("\n路由表:");
    for route in &report.routes {
        println!(
            "  - {} -> {}: {:.0} 單位",
            route.warehouse_id, route.facility_id, route.units
        );
    }

    // 輸出地圖
    let doc = MapExporter::to_geojson(&report, &facilities, &warehouses)?;
    std::fs::write("campus_plan.geojson", serde_json::to_string_pretty(&doc)?)?;
    println!("\n地圖已輸出至 campus_plan.geojson");

    Ok(())
}

fn facility(id: &str, name: &str, lat: f64, lon: f64, daily_demand: i64) -> Facility {
    Facility::new(
        id.to_string(),
        GeoPoint::new(lat, lon),
        Decimal::from(daily_demand),
    )
    .with_name(name.to_string())
}

fn warehouse(
    id: &str,
    lat: f64,
    lon: f64,
    daily_capacity: i64,
    construction: i64,
    operational: i64,
) -> Warehouse {
    Warehouse::new(
        id.to_string(),
        GeoPoint::new(lat, lon),
        Decimal::from(daily_capacity),
    )
    .with_construction_cost(Decimal::from(construction))
    .with_operational_cost(Decimal::from(operational))
}

fn lane(warehouse_id: &str, facility_id: &str, unit_cost: i64) -> Lane {
    Lane::new(
        warehouse_id.to_string(),
        facility_id.to_string(),
        Decimal::from(unit_cost),
    )
}
