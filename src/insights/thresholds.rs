// ==========================================
// 工厂运营管理系统 - 洞察规则阈值
// ==========================================
// 依据: Insights_Rules_v0.2.md - 附录 A 阈值表
// 红线: 阈值为启发式契约的一部分,固定编译期常量,
//       不提供运行时调参入口
// ==========================================

/// 趋势窗口长度（天/条）
pub const TREND_WINDOW: usize = 7;

/// 趋势类异常的最小样本量（两个完整窗口）
pub const MIN_TREND_SAMPLES: usize = 2 * TREND_WINDOW;

/// 产量下滑告警阈值（百分比变化,严格小于才触发）
pub const PRODUCTION_DROP_PCT: f64 = -10.0;

/// 产量下滑高严重度阈值（百分比变化,严格小于）
pub const PRODUCTION_DROP_SEVERE_PCT: f64 = -20.0;

/// 废料比上升触发系数（近期比 > 前期比 × 1.2）
pub const WASTE_GROWTH_FACTOR: f64 = 1.2;

/// 库存日耗估算系数（最低库存的 5%）
pub const DAILY_CONSUMPTION_RATE: f64 = 0.05;

/// 日耗下限（避免除零爆炸）
pub const CONSUMPTION_FLOOR: f64 = 0.1;

/// 耗尽预警天数（严格小于才产出预测条目）
pub const DEPLETION_ALERT_DAYS: f64 = 30.0;

/// 触发补货建议的耗尽天数（严格小于）
pub const REORDER_URGENCY_DAYS: i64 = 14;

/// 产量趋势斜率分界（单位/天）
pub const SLOPE_DECLINING: f64 = -5.0;
pub const SLOPE_INCREASING: f64 = 5.0;

/// 预测条目固定置信度
pub const INVENTORY_FORECAST_CONFIDENCE: f64 = 0.75;
pub const TREND_FORECAST_CONFIDENCE: f64 = 0.65;
