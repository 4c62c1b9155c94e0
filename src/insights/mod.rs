// ==========================================
// 工厂运营管理系统 - 洞察引擎层
// ==========================================
// 职责: 异常检测 / 预测 / 建议 / KPI 的启发式规则
// 红线: 核心为同步纯函数,洞察对象不落库
// ==========================================

pub mod aggregator;
pub mod anomaly;
pub mod forecast;
pub mod kpi;
pub mod recommendation;
pub mod service;
pub mod thresholds;

// 重导出核心入口
pub use aggregator::{compose_summary, generate_insights};
pub use anomaly::detect_anomalies;
pub use forecast::{estimated_days_to_depletion, generate_forecasts};
pub use kpi::{compute_kpis, KpiSnapshot};
pub use recommendation::generate_recommendations;
pub use service::InsightsService;
