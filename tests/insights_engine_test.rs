// ==========================================
// 洞察引擎集成测试
// ==========================================
// 测试目标: 异常 → 预测 → 建议 → 摘要 的端到端行为
// ==========================================

mod test_helpers;

use chrono::{TimeZone, Utc};
use factory_ops::domain::records::{InventoryItem, ProductionRecord};
use factory_ops::domain::types::{DataKind, ForecastKind, Severity};
use factory_ops::insights::{generate_insights, InsightsService};
use test_helpers::{create_import_service, write_csv};

/// 前 7 天均值 previous_avg,后 7 天均值 recent_avg 的日期连续序列
fn two_week_series(previous_avg: f64, recent_avg: f64) -> Vec<ProductionRecord> {
    (0..14)
        .map(|i| ProductionRecord {
            id: None,
            date: Utc.with_ymd_and_hms(2025, 6, 1 + i as u32, 0, 0, 0).unwrap(),
            product_type: "Cement Block".to_string(),
            quantity: if i < 7 { previous_avg } else { recent_avg },
            target: 0.0,
            waste_kg: 0.0,
            order_id: None,
            import_batch_id: None,
        })
        .collect()
}

fn inventory_item(name: &str, stock: f64, min: f64, unit: &str) -> InventoryItem {
    InventoryItem {
        id: None,
        item_name: name.to_string(),
        stock_kg: stock,
        min_stock_kg: min,
        unit: unit.to_string(),
        last_updated: Utc::now(),
        import_batch_id: None,
    }
}

#[test]
fn test_paint_scenario_full_chain() {
    // 库存 40L / 最低 100L: 异常 + 预测 + 建议须同时成立
    let inventory = vec![inventory_item("Paint", 40.0, 100.0, "L")];

    let report = generate_insights(&[], &inventory, &[], &[]);

    // 异常: high + 单位格式化证据
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].severity, Severity::High);
    assert_eq!(report.anomalies[0].evidence, "Current: 40L, Minimum: 100L");

    // 预测: 40 / (100 × 0.05) = 8 天
    assert_eq!(report.forecasts.len(), 1);
    assert_eq!(report.forecasts[0].days_to_depletion, 8);
    assert_eq!(report.forecasts[0].kind, ForecastKind::Inventory);

    // 建议: P1（高严重度异常）+ P2（补货窗口）
    assert_eq!(report.recommendations.len(), 2);
    assert_eq!(report.recommendations[0].priority, 1);
    assert_eq!(report.recommendations[1].priority, 2);
    assert_eq!(
        report.recommendations[1].action,
        "Order Paint within next 3 days"
    );
    assert_eq!(
        report.recommendations[1].estimated_impact,
        "Maintain 8 days buffer stock"
    );

    assert_eq!(
        report.summary,
        "Factory operations overview: 1 issue detected requiring attention. \
         1 forecast alert for inventory management. "
    );
}

#[test]
fn test_drop_threshold_boundary() {
    // 正好 -10%: 不触发（严格小于）
    let report = generate_insights(&two_week_series(100.0, 90.0), &[], &[], &[]);
    assert!(report.anomalies.is_empty());

    // -10.001%: medium
    let report = generate_insights(&two_week_series(100.0, 89.999), &[], &[], &[]);
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].severity, Severity::Medium);

    // -20.001%: high
    let report = generate_insights(&two_week_series(100.0, 79.999), &[], &[], &[]);
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].severity, Severity::High);
}

#[test]
fn test_depletion_floor_scenario() {
    // 最低库存 0 → 日耗下限 0.1 → 5 / 0.1 = 50 天,不预警不除零
    let inventory = vec![inventory_item("Grease", 5.0, 0.0, "kg")];

    let report = generate_insights(&[], &inventory, &[], &[]);

    assert!(report.forecasts.is_empty());
    // 库存高于最低值,也无异常;落入兜底建议
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].priority, 3);
}

#[test]
fn test_trend_window_mismatch_between_rules() {
    // 数组顺序与日期顺序相反: 异常检测按日期切窗,趋势预测按数组切窗。
    // 数组前 7 条为近期日期(6/8-6/14,产量 50),后 7 条为早期日期(6/1-6/7,产量 100)。
    let mut production = Vec::new();
    for i in 0..7 {
        production.push(ProductionRecord {
            id: None,
            date: Utc.with_ymd_and_hms(2025, 6, 8 + i, 0, 0, 0).unwrap(),
            product_type: "Cement Block".to_string(),
            quantity: 50.0,
            target: 0.0,
            waste_kg: 0.0,
            order_id: None,
            import_batch_id: None,
        });
    }
    for i in 0..7 {
        production.push(ProductionRecord {
            id: None,
            date: Utc.with_ymd_and_hms(2025, 6, 1 + i, 0, 0, 0).unwrap(),
            product_type: "Cement Block".to_string(),
            quantity: 100.0,
            target: 0.0,
            waste_kg: 0.0,
            order_id: None,
            import_batch_id: None,
        });
    }

    let report = generate_insights(&production, &[], &[], &[]);

    // 按日期: 近 7 天均值 50 vs 前 7 天 100 → -50% → high 异常
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].severity, Severity::High);

    // 按数组: 末 7 条恒为 100 → 斜率 0 → 无趋势条目
    assert!(report.forecasts.is_empty());
}

#[tokio::test]
async fn test_insights_service_over_imported_data() {
    let (store, import_service) = create_import_service();

    let file = write_csv("itemName,stockKg,minStockKg,unit\nPaint,40,100,L\n");
    let report = import_service
        .import_file(file.path(), DataKind::Inventory)
        .await
        .unwrap();
    assert!(!report.is_blocked());

    let insights = InsightsService::new(store);
    let first = insights.refresh().await.unwrap();

    assert_eq!(first.anomalies.len(), 1);
    assert_eq!(first.forecasts.len(), 1);
    assert_eq!(first.recommendations.len(), 2);

    // 重复刷新结果一致（无隐藏状态）
    let second = insights.refresh().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_store_fallback_summary() {
    let (store, _service) = create_import_service();
    let insights = InsightsService::new(store);

    let report = insights.refresh().await.unwrap();

    assert!(report.anomalies.is_empty());
    assert!(report.forecasts.is_empty());
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(
        report.recommendations[0].action,
        "Continue current operations - all metrics healthy"
    );
    assert!(report
        .summary
        .starts_with("Factory operations overview: All systems operating normally. "));
}
