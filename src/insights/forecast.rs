// ==========================================
// 工厂运营管理系统 - 预测生成器
// ==========================================
// 依据: Insights_Rules_v0.2.md - 2.2 预测规则
// 职责: 库存耗尽天数估算 + 产量线性趋势分类
// ==========================================
// 发射顺序: 按集合顺序的库存预测 → 产量趋势条目（如适用）
// ==========================================

use crate::domain::insight::Forecast;
use crate::domain::records::{InventoryItem, ProductionRecord};
use crate::domain::types::{ForecastKind, TrendDirection};
use crate::insights::thresholds::{
    CONSUMPTION_FLOOR, DAILY_CONSUMPTION_RATE, DEPLETION_ALERT_DAYS,
    INVENTORY_FORECAST_CONFIDENCE, SLOPE_DECLINING, SLOPE_INCREASING, TREND_FORECAST_CONFIDENCE,
    TREND_WINDOW,
};

/// 预计耗尽天数
///
/// 日耗按最低库存的 5% 估算,下限 0.1 单位/天（防除零）
pub fn estimated_days_to_depletion(item: &InventoryItem) -> f64 {
    let daily_consumption = (item.min_stock_kg * DAILY_CONSUMPTION_RATE).max(CONSUMPTION_FLOOR);
    item.stock_kg / daily_consumption
}

/// 最近窗口的普通最小二乘斜率（x 取下标 0..6,x 均值固定为 3）
pub fn trend_slope(recent: &[&ProductionRecord]) -> f64 {
    let x_mean = (TREND_WINDOW as f64 - 1.0) / 2.0;
    let y_mean = recent.iter().map(|r| r.quantity).sum::<f64>() / recent.len() as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, record) in recent.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (record.quantity - y_mean);
        denominator += dx * dx;
    }
    numerator / denominator
}

/// 斜率 → 趋势方向
pub fn classify_trend(slope: f64) -> TrendDirection {
    if slope < SLOPE_DECLINING {
        TrendDirection::Declining
    } else if slope > SLOPE_INCREASING {
        TrendDirection::Increasing
    } else {
        TrendDirection::Stable
    }
}

/// 预测主入口
pub fn generate_forecasts(
    production: &[ProductionRecord],
    inventory: &[InventoryItem],
) -> Vec<Forecast> {
    let mut forecasts = Vec::new();

    for item in inventory {
        if item.stock_kg <= 0.0 {
            continue;
        }
        let days = estimated_days_to_depletion(item);
        if days < DEPLETION_ALERT_DAYS {
            forecasts.push(Forecast {
                item: item.item_name.clone(),
                days_to_depletion: days.round() as i64,
                confidence: INVENTORY_FORECAST_CONFIDENCE,
                kind: ForecastKind::Inventory,
            });
        }
    }

    if production.len() >= TREND_WINDOW {
        // 取集合当前顺序的末 7 条,与异常检测的按日期排序口径不同
        // TODO: 与异常检测统一按日期排序后再取窗口（需业务侧确认口径）
        let recent: Vec<&ProductionRecord> =
            production[production.len() - TREND_WINDOW..].iter().collect();
        let direction = classify_trend(trend_slope(&recent));
        if direction != TrendDirection::Stable {
            forecasts.push(Forecast {
                item: "Production Trend".to_string(),
                days_to_depletion: 0,
                confidence: TREND_FORECAST_CONFIDENCE,
                kind: ForecastKind::Production,
            });
        }
    }

    forecasts
}
