// ==========================================
// 工厂运营管理系统 - 单元格强制转换规则
// ==========================================
// 依据: Import_Pipeline_Spec_v0.2.md - 2. 类型转换口径
// 职责: 文本单元格 → 数值/整数/布尔/时间
// ==========================================
// 红线: 可选数值字段不可解析时静默取 0,绝不因此拒绝行
// 红线: 产出数值必须有限（过滤 NaN/Inf 字面量）
// ==========================================

use crate::importer::file_parser::RawRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 取非空字段值（解析器已 TRIM,此处再防御一次空白）
pub fn non_empty<'a>(row: &'a RawRow, key: &str) -> Option<&'a str> {
    row.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// 十进制解析,结果必须有限
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 可选数值字段: 解析失败取 0
pub fn decimal_or_zero(row: &RawRow, key: &str) -> f64 {
    non_empty(row, key).and_then(parse_decimal).unwrap_or(0.0)
}

/// 整数解析,宽容接受十进制字面量（截断小数部分）
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| parse_decimal(trimmed).map(|v| v.trunc() as i64))
}

/// 可选整数字段: 解析失败取 0
pub fn integer_or_zero(row: &RawRow, key: &str) -> i64 {
    non_empty(row, key).and_then(parse_integer).unwrap_or(0)
}

/// 是否为字面量 true（大小写敏感;电子表格布尔经 Display 也落在此口径）
pub fn is_true_literal(raw: &str) -> bool {
    raw.trim() == "true"
}

/// 日期/时间解析: RFC 3339 → 日期时间 → 纯日期（多格式宽容）
///
/// 纯日期按当日 00:00:00 UTC 归一为完整 ISO-8601 瞬时
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .ok()?;
    date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
}

/// 时间字段缺省口径: 缺失/非法时取当前时间
pub fn instant_or_now(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(parse_instant).unwrap_or_else(Utc::now)
}
