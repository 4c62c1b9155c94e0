// ==========================================
// 工厂运营管理系统 - 建议生成器
// ==========================================
// 依据: Insights_Rules_v0.2.md - 2.3 建议规则
// 职责: 由异常/预测机械推导行动建议
// ==========================================
// 优先级: 1 高严重度异常 > 2 补货窗口 > 3 兜底
// 输出按优先级升序稳定排序（同级保持发射顺序）
// ==========================================

use crate::domain::insight::{Anomaly, Forecast, Recommendation};
use crate::domain::types::{Difficulty, ForecastKind, Severity};
use crate::insights::thresholds::REORDER_URGENCY_DAYS;

/// 建议生成主入口
pub fn generate_recommendations(
    anomalies: &[Anomaly],
    forecasts: &[Forecast],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for anomaly in anomalies {
        if anomaly.severity == Severity::High {
            recommendations.push(Recommendation {
                action: anomaly.immediate_action.clone(),
                estimated_impact: "Critical - prevent production stoppage".to_string(),
                difficulty: Difficulty::Low,
                priority: 1,
            });
        }
    }

    for forecast in forecasts {
        if forecast.kind == ForecastKind::Inventory
            && forecast.days_to_depletion < REORDER_URGENCY_DAYS
        {
            recommendations.push(Recommendation {
                action: format!("Order {} within next 3 days", forecast.item),
                estimated_impact: format!(
                    "Maintain {} days buffer stock",
                    forecast.days_to_depletion
                ),
                difficulty: Difficulty::Low,
                priority: 2,
            });
        }
    }

    // 双空输入 → 恰好一条兜底建议
    if anomalies.is_empty() && forecasts.is_empty() {
        recommendations.push(Recommendation {
            action: "Continue current operations - all metrics healthy".to_string(),
            estimated_impact: "Maintain efficiency and quality standards".to_string(),
            difficulty: Difficulty::Low,
            priority: 3,
        });
    }

    // Vec::sort_by_key 为稳定排序
    recommendations.sort_by_key(|r| r.priority);
    recommendations
}
