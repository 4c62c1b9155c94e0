// ==========================================
// 工厂运营管理系统 - 业务记录领域模型
// ==========================================
// 依据: Ops_Core_Spec_v1.0.md - PART B 数据体系
// 依据: Data_Dictionary_v0.1.md - 四类业务记录
// ==========================================
// 红线: id 由存储层在插入时分配,入库前保持 None
// 红线: 记录仅通过 import_batch_id 回引批次,不引用其他记录
// ==========================================

use crate::domain::types::DataKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRecord - 生产记录
// ==========================================
// 序列化: camelCase（与前端数据模型、样例文件列名一致）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: Option<i64>,              // 存储层分配
    pub date: DateTime<Utc>,          // 生产日期（ISO-8601 瞬时）
    pub product_type: String,         // 产品类型
    pub quantity: f64,                // 产量（件,非负）
    pub target: f64,                  // 目标产量（非负,不可解析时为 0）
    pub waste_kg: f64,                // 废料重量（kg,非负,不可解析时为 0）
    pub order_id: Option<i64>,        // 关联订单号（可选）
    pub import_batch_id: Option<i64>, // 导入批次回引（手工创建时为 None）
}

// ==========================================
// InventoryItem - 库存条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Option<i64>,              // 存储层分配
    pub item_name: String,            // 物料名称
    pub stock_kg: f64,                // 当前库存量（不可解析时为 0）
    pub min_stock_kg: f64,            // 最低安全库存（不可解析时为 0）
    pub unit: String,                 // 计量单位,缺省 "kg"
    pub last_updated: DateTime<Utc>,  // 最后更新时间（缺失/非法时取当前时间）
    pub import_batch_id: Option<i64>, // 导入批次回引
}

// ==========================================
// SaleRecord - 销售记录
// ==========================================
// 红线: delivered 仅当源字面量为布尔 true 或字符串 "true" 时为 true
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: Option<i64>,              // 存储层分配
    pub date: DateTime<Utc>,          // 销售日期
    pub customer: String,             // 客户名称
    pub product_type: String,         // 产品类型
    pub amount: f64,                  // 销售数量（不可解析时为 0）
    pub revenue: f64,                 // 销售收入（不可解析时为 0）
    pub delivered: bool,              // 是否已交付
    pub import_batch_id: Option<i64>, // 导入批次回引
}

// ==========================================
// WorkerRecord - 工人记录
// ==========================================
// shift 约定取值 morning/afternoon/night,但不做强制校验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRecord {
    pub id: Option<i64>,              // 存储层分配
    pub date: DateTime<Utc>,          // 记录日期
    pub name: String,                 // 工人姓名
    pub shift: String,                // 班次
    pub tasks_done: i64,              // 完成任务数（不可解析时为 0）
    pub import_batch_id: Option<i64>, // 导入批次回引
}

// ==========================================
// ImportBatch - 导入批次
// ==========================================
// 用途: 将一次文件导入产生的记录作为整体管理
// 弱引用语义: 删除批次级联删除其记录,记录不拥有批次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    pub id: Option<i64>,             // 存储层分配
    pub file_name: String,           // 源文件名
    pub data_type: DataKind,         // 目标数据种类
    pub record_count: i64,           // 本批次导入记录数
    pub imported_at: DateTime<Utc>,  // 导入时间
}
