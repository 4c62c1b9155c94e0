// ==========================================
// 工厂运营管理系统 - 洞察聚合器
// ==========================================
// 依据: Insights_Rules_v0.2.md - 3. 聚合与摘要
// 职责: 异常 → 预测 → 建议 → 摘要 的端到端纯函数
// ==========================================
// 红线: 幂等纯函数,无隐藏状态,可随"刷新"操作反复调用
// ==========================================

use crate::domain::insight::{Anomaly, Forecast, InsightsReport};
use crate::domain::records::{InventoryItem, ProductionRecord, SaleRecord, WorkerRecord};
use crate::insights::anomaly::detect_anomalies;
use crate::insights::forecast::generate_forecasts;
use crate::insights::recommendation::generate_recommendations;

/// 摘要文本拼装（单复数按计数自然处理）
pub fn compose_summary(anomalies: &[Anomaly], forecasts: &[Forecast]) -> String {
    let mut summary = String::from("Factory operations overview: ");

    if anomalies.is_empty() {
        summary.push_str("All systems operating normally. ");
    } else {
        let n = anomalies.len();
        summary.push_str(&format!(
            "{} issue{} detected requiring attention. ",
            n,
            if n == 1 { "" } else { "s" }
        ));
    }

    if !forecasts.is_empty() {
        let m = forecasts.len();
        summary.push_str(&format!(
            "{} forecast alert{} for inventory management. ",
            m,
            if m == 1 { "" } else { "s" }
        ));
    }

    summary
}

/// 洞察聚合主入口
///
/// sales 为保留输入: 当前规则集未使用销售记录
pub fn generate_insights(
    production: &[ProductionRecord],
    inventory: &[InventoryItem],
    _sales: &[SaleRecord],
    workers: &[WorkerRecord],
) -> InsightsReport {
    let anomalies = detect_anomalies(production, inventory, workers);
    let forecasts = generate_forecasts(production, inventory);
    let recommendations = generate_recommendations(&anomalies, &forecasts);
    let summary = compose_summary(&anomalies, &forecasts);

    InsightsReport {
        anomalies,
        forecasts,
        recommendations,
        summary,
    }
}
