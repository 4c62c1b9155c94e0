// ==========================================
// 工厂运营管理系统 - 异常检测器
// ==========================================
// 依据: Insights_Rules_v0.2.md - 2.1 异常规则
// 职责: 产量下滑 / 废料上升 / 库存告急 三类启发式检测
// ==========================================
// 红线: 纯函数,不读存储不落库,相同输入集合产出相同结果
// 发射顺序: 产量下滑 → 废料上升 → 按集合顺序逐条库存告急
// ==========================================

use crate::domain::insight::Anomaly;
use crate::domain::records::{InventoryItem, ProductionRecord, WorkerRecord};
use crate::domain::types::Severity;
use crate::insights::thresholds::{
    MIN_TREND_SAMPLES, PRODUCTION_DROP_PCT, PRODUCTION_DROP_SEVERE_PCT, TREND_WINDOW,
    WASTE_GROWTH_FACTOR,
};

/// 异常检测主入口
///
/// workers 为保留输入: 当前没有以工人记录驱动的规则
pub fn detect_anomalies(
    production: &[ProductionRecord],
    inventory: &[InventoryItem],
    _workers: &[WorkerRecord],
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    // 趋势类规则需要两个完整窗口,样本不足直接跳过（非错误）
    if production.len() >= MIN_TREND_SAMPLES {
        let mut sorted: Vec<&ProductionRecord> = production.iter().collect();
        sorted.sort_by_key(|r| r.date);

        let recent = &sorted[sorted.len() - TREND_WINDOW..];
        let previous = &sorted[sorted.len() - 2 * TREND_WINDOW..sorted.len() - TREND_WINDOW];

        if let Some(anomaly) = production_drop_anomaly(recent, previous) {
            anomalies.push(anomaly);
        }
        if let Some(anomaly) = waste_growth_anomaly(recent, previous) {
            anomalies.push(anomaly);
        }
    }

    for item in inventory {
        if item.stock_kg < item.min_stock_kg {
            anomalies.push(low_stock_anomaly(item));
        }
    }

    anomalies
}

fn quantity_avg(window: &[&ProductionRecord]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().map(|r| r.quantity).sum::<f64>() / window.len() as f64
}

/// 产量下滑: 周环比变化 < -10% 触发,< -20% 升为 high
fn production_drop_anomaly(
    recent: &[&ProductionRecord],
    previous: &[&ProductionRecord],
) -> Option<Anomaly> {
    let recent_avg = quantity_avg(recent);
    let previous_avg = quantity_avg(previous);
    if previous_avg <= 0.0 {
        // 前期均值为零时环比无定义,跳过
        return None;
    }

    let change = (recent_avg - previous_avg) / previous_avg * 100.0;
    if change >= PRODUCTION_DROP_PCT {
        return None;
    }

    let severity = if change < PRODUCTION_DROP_SEVERE_PCT {
        Severity::High
    } else {
        Severity::Medium
    };

    Some(Anomaly {
        issue: format!("Production decreased by {:.1}%", change.abs()),
        evidence: format!(
            "Recent 7-day average {} units vs previous {} units",
            recent_avg.round(),
            previous_avg.round()
        ),
        likely_causes: vec![
            "Raw material shortage".to_string(),
            "Equipment downtime".to_string(),
            "Worker absenteeism".to_string(),
        ],
        immediate_action: "Review raw material stock and equipment status".to_string(),
        severity,
    })
}

/// 废料上升: 近期废料比超过前期 1.2 倍触发
fn waste_growth_anomaly(
    recent: &[&ProductionRecord],
    previous: &[&ProductionRecord],
) -> Option<Anomaly> {
    let recent_qty: f64 = recent.iter().map(|r| r.quantity).sum();
    let previous_qty: f64 = previous.iter().map(|r| r.quantity).sum();
    if recent_qty <= 0.0 || previous_qty <= 0.0 {
        // 任一窗口无产量,废料比无定义,跳过
        return None;
    }

    let recent_ratio = recent.iter().map(|r| r.waste_kg).sum::<f64>() / recent_qty;
    let previous_ratio = previous.iter().map(|r| r.waste_kg).sum::<f64>() / previous_qty;
    if recent_ratio <= previous_ratio * WASTE_GROWTH_FACTOR {
        return None;
    }

    Some(Anomaly {
        issue: "Waste ratio increased".to_string(),
        evidence: format!(
            "Current waste {:.1}kg per 100 units vs previous {:.1}kg per 100 units",
            recent_ratio * 100.0,
            previous_ratio * 100.0
        ),
        likely_causes: vec![
            "Quality control gaps".to_string(),
            "Raw material quality variation".to_string(),
            "Operator training gaps".to_string(),
        ],
        immediate_action: "Inspect quality checkpoints and review operator training".to_string(),
        severity: Severity::Medium,
    })
}

/// 库存告急: stock < min 即触发,一律 high
fn low_stock_anomaly(item: &InventoryItem) -> Anomaly {
    Anomaly {
        issue: format!("Critically low stock: {}", item.item_name),
        evidence: format!(
            "Current: {}{}, Minimum: {}{}",
            item.stock_kg, item.unit, item.min_stock_kg, item.unit
        ),
        likely_causes: vec![
            "Consumption faster than planned".to_string(),
            "Replenishment order delayed".to_string(),
        ],
        immediate_action: format!("Reorder {} immediately", item.item_name),
        severity: Severity::High,
    }
}
