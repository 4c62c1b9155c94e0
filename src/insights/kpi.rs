// ==========================================
// 工厂运营管理系统 - 驾驶舱 KPI 快照
// ==========================================
// 依据: Ops_Dashboard_Notes_v0.1.md - 首屏指标卡
// 职责: 四类集合 → 仪表盘头部指标的纯聚合
// ==========================================

use crate::domain::records::{InventoryItem, ProductionRecord, SaleRecord, WorkerRecord};
use serde::{Deserialize, Serialize};

// ==========================================
// KpiSnapshot - 指标快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub total_production: f64,    // 总产量（件）
    pub average_production: f64,  // 平均单条记录产量（无记录时 0）
    pub waste_ratio_pct: f64,     // 总废料比（每 100 件 kg,无产量时 0）
    pub total_revenue: f64,       // 总销售收入
    pub pending_deliveries: usize, // 未交付销售单数
    pub low_stock_items: usize,   // 低于最低库存的物料数
    pub total_tasks_done: i64,    // 工人完成任务总数
}

/// KPI 聚合主入口
pub fn compute_kpis(
    production: &[ProductionRecord],
    inventory: &[InventoryItem],
    sales: &[SaleRecord],
    workers: &[WorkerRecord],
) -> KpiSnapshot {
    let total_production: f64 = production.iter().map(|r| r.quantity).sum();
    let average_production = if production.is_empty() {
        0.0
    } else {
        total_production / production.len() as f64
    };

    let total_waste: f64 = production.iter().map(|r| r.waste_kg).sum();
    let waste_ratio_pct = if total_production > 0.0 {
        total_waste / total_production * 100.0
    } else {
        0.0
    };

    KpiSnapshot {
        total_production,
        average_production,
        waste_ratio_pct,
        total_revenue: sales.iter().map(|s| s.revenue).sum(),
        pending_deliveries: sales.iter().filter(|s| !s.delivered).count(),
        low_stock_items: inventory
            .iter()
            .filter(|i| i.stock_kg < i.min_stock_kg)
            .count(),
        total_tasks_done: workers.iter().map(|w| w.tasks_done).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_empty_collections_yield_zeroed_snapshot() {
        let snapshot = compute_kpis(&[], &[], &[], &[]);

        assert_eq!(snapshot.total_production, 0.0);
        assert_eq!(snapshot.average_production, 0.0);
        assert_eq!(snapshot.waste_ratio_pct, 0.0);
        assert_eq!(snapshot.pending_deliveries, 0);
    }

    #[test]
    fn test_aggregation() {
        let production = vec![
            ProductionRecord {
                id: None,
                date: Utc::now(),
                product_type: "Brick".to_string(),
                quantity: 400.0,
                target: 500.0,
                waste_kg: 10.0,
                order_id: None,
                import_batch_id: None,
            },
            ProductionRecord {
                id: None,
                date: Utc::now(),
                product_type: "Brick".to_string(),
                quantity: 600.0,
                target: 500.0,
                waste_kg: 15.0,
                order_id: None,
                import_batch_id: None,
            },
        ];
        let inventory = vec![InventoryItem {
            id: None,
            item_name: "Paint".to_string(),
            stock_kg: 40.0,
            min_stock_kg: 100.0,
            unit: "L".to_string(),
            last_updated: Utc::now(),
            import_batch_id: None,
        }];
        let sales = vec![
            SaleRecord {
                id: None,
                date: Utc::now(),
                customer: "Acme".to_string(),
                product_type: "Brick".to_string(),
                amount: 200.0,
                revenue: 15000.0,
                delivered: true,
                import_batch_id: None,
            },
            SaleRecord {
                id: None,
                date: Utc::now(),
                customer: "Acme".to_string(),
                product_type: "Brick".to_string(),
                amount: 100.0,
                revenue: 7000.0,
                delivered: false,
                import_batch_id: None,
            },
        ];
        let workers = vec![WorkerRecord {
            id: None,
            date: Utc::now(),
            name: "Li Wei".to_string(),
            shift: "morning".to_string(),
            tasks_done: 14,
            import_batch_id: None,
        }];

        let snapshot = compute_kpis(&production, &inventory, &sales, &workers);

        assert_eq!(snapshot.total_production, 1000.0);
        assert_eq!(snapshot.average_production, 500.0);
        assert_eq!(snapshot.waste_ratio_pct, 2.5);
        assert_eq!(snapshot.total_revenue, 22000.0);
        assert_eq!(snapshot.pending_deliveries, 1);
        assert_eq!(snapshot.low_stock_items, 1);
        assert_eq!(snapshot.total_tasks_done, 14);
    }
}
