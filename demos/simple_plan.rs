//! 簡單選址規劃示例

use flp_core::{Facility, GeoPoint, Lane, LaneTable, PlanningConfig, Warehouse};
use flp_model::Planner;
use flp_solver::HighsSolver;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    println!("=== 簡單選址規劃示例 ===\n");

    // 兩座候選倉庫、一座設施
    let facilities = vec![Facility::new(
        "STORE-001".to_string(),
        GeoPoint::new(25.033, 121.565),
        Decimal::from(200),
    )];

    let warehouses = vec![
        Warehouse::new(
            "WH-WEST".to_string(),
            GeoPoint::new(25.040, 121.500),
            Decimal::from(500),
        )
        .with_construction_cost(Decimal::from(800_000))
        .with_operational_cost(Decimal::from(100)),
        Warehouse::new(
            "WH-EAST".to_string(),
            GeoPoint::new(25.030, 121.620),
            Decimal::from(500),
        )
        .with_construction_cost(Decimal::from(600_000))
        .with_operational_cost(Decimal::from(120)),
    ];

    let lanes = LaneTable::new(vec![
        Lane::new("WH-WEST".to_string(), "STORE-001".to_string(), Decimal::from(3)),
        Lane::new("WH-EAST".to_string(), "STORE-001".to_string(), Decimal::from(2)),
    ])?;

    // 預算 50 萬，恰好開 1 座
    let config = PlanningConfig::new(
        Decimal::from(500_000),
        1,
        vec!["STORE-001".to_string()],
        vec!["WH-WEST".to_string(), "WH-EAST".to_string()],
    );

    let planner = Planner::new(config);
    let report = planner.plan(&facilities, &warehouses, &lanes, &HighsSolver::new())?;

    println!("年度總成本: {:.0}", report.total_cost);
    println!("剩餘預算:   {:.0}", report.remaining_budget);
    for summary in &report.warehouses {
        println!(
            "  - 倉庫 {}: 開設={}, 利用率={:.1}%",
            summary.warehouse_id,
            summary.open,
            summary.utilization * 100.0
        );
    }

    Ok(())
}
