// ==========================================
// 工厂运营管理系统 - 洞察领域模型
// ==========================================
// 依据: Insights_Rules_v0.2.md - 1. 输出结构
// ==========================================
// 红线: 洞察对象为临时值,每次计算重新生成,无 id,不落库
// ==========================================

use crate::domain::types::{Difficulty, ForecastKind, Severity};
use serde::{Deserialize, Serialize};

// ==========================================
// Anomaly - 运营异常
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub issue: String,              // 问题描述
    pub evidence: String,           // 数据证据
    pub likely_causes: Vec<String>, // 可能原因（固定建议文本）
    pub immediate_action: String,   // 立即措施
    pub severity: Severity,         // 严重度
}

// ==========================================
// Forecast - 启发式预测
// ==========================================
// days_to_depletion 仅对 inventory 类型有实际含义,
// production 趋势条目约定为 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub item: String,           // 物料名,或固定值 "Production Trend"
    pub days_to_depletion: i64, // 预计耗尽天数（四舍五入）
    pub confidence: f64,        // 置信度（固定启发值）
    pub kind: ForecastKind,     // 条目类型
}

// ==========================================
// Recommendation - 行动建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: String,           // 建议动作
    pub estimated_impact: String, // 预期影响
    pub difficulty: Difficulty,   // 执行难度
    pub priority: u8,             // 优先级（1 最高,升序稳定排序）
}

// ==========================================
// InsightsReport - 洞察聚合结果
// ==========================================
// 纯函数输出: 同一输入集合重复计算得到相同结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub anomalies: Vec<Anomaly>,
    pub forecasts: Vec<Forecast>,
    pub recommendations: Vec<Recommendation>,
    pub summary: String,
}
