// ==========================================
// 工厂运营管理系统 - 领域类型定义
// ==========================================
// 依据: Ops_Core_Spec_v1.0.md - PART B 数据体系
// 依据: Insights_Rules_v0.2.md - 0.1 等级体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 数据种类 (Data Kind)
// ==========================================
// 红线: 所有按种类分派（表名/必填字段/样例模板）统一走此枚举,
//       禁止在调用点重复字符串 switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Production, // 生产记录
    Inventory,  // 库存条目
    Sales,      // 销售记录
    Workers,    // 工人记录
}

impl DataKind {
    /// 全部种类（固定迭代顺序）
    pub const ALL: [DataKind; 4] = [
        DataKind::Production,
        DataKind::Inventory,
        DataKind::Sales,
        DataKind::Workers,
    ];

    /// 种类标签（与前端/样例文件一致的小写形式）
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Production => "production",
            DataKind::Inventory => "inventory",
            DataKind::Sales => "sales",
            DataKind::Workers => "workers",
        }
    }

    /// 对应的存储表名（唯一映射点）
    pub fn table_name(&self) -> &'static str {
        match self {
            DataKind::Production => "production_record",
            DataKind::Inventory => "inventory_item",
            DataKind::Sales => "sale_record",
            DataKind::Workers => "worker_record",
        }
    }

    /// 行校验的必填字段清单（用于拒绝消息,唯一映射点）
    pub fn required_fields(&self) -> &'static str {
        match self {
            DataKind::Production => "date, productType, quantity",
            DataKind::Inventory => "itemName, stockKg",
            DataKind::Sales => "date, customer, productType",
            DataKind::Workers => "date, name, shift",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(DataKind::Production),
            "inventory" => Ok(DataKind::Inventory),
            "sales" => Ok(DataKind::Sales),
            "workers" => Ok(DataKind::Workers),
            other => Err(format!(
                "unknown data kind: {} (expected production/inventory/sales/workers)",
                other
            )),
        }
    }
}

// ==========================================
// 异常严重度 (Severity)
// ==========================================
// 红线: 等级制,不是评分制
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,    // 低
    Medium, // 中
    High,   // 高
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

// ==========================================
// 建议执行难度 (Difficulty)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Low => write!(f, "low"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::High => write!(f, "high"),
        }
    }
}

// ==========================================
// 预测条目类型 (Forecast Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastKind {
    Inventory,  // 库存耗尽预测
    Production, // 产量趋势预测
}

impl fmt::Display for ForecastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastKind::Inventory => write!(f, "inventory"),
            ForecastKind::Production => write!(f, "production"),
        }
    }
}

// ==========================================
// 产量趋势方向 (Trend Direction)
// ==========================================
// 依据: Insights_Rules_v0.2.md - 2.2 趋势分类阈值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Declining,  // 下行（斜率 < -5）
    Stable,     // 平稳
    Increasing, // 上行（斜率 > 5）
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Declining => write!(f, "declining"),
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Increasing => write!(f, "increasing"),
        }
    }
}
