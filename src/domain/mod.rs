// ==========================================
// 工厂运营管理系统 - 领域层
// ==========================================
// 职责: 实体与类型定义,不含业务规则
// ==========================================

pub mod insight;
pub mod records;
pub mod types;

// 重导出核心类型
pub use insight::{Anomaly, Forecast, InsightsReport, Recommendation};
pub use records::{ImportBatch, InventoryItem, ProductionRecord, SaleRecord, WorkerRecord};
pub use types::{DataKind, Difficulty, ForecastKind, Severity, TrendDirection};
