// ==========================================
// 工厂运营管理系统 - 集合存储 Trait
// ==========================================
// 依据: Ops_Core_Spec_v1.0.md - PART D 存储契约
// 职责: 定义四类记录 + 导入批次的数据访问接口（不含业务规则）
// 红线: Repository 不含业务规则,只做数据 CRUD
// 红线: 以构造注入传入管道,禁止进程级单例（便于测试替身）
// ==========================================

use crate::domain::records::{
    ImportBatch, InventoryItem, ProductionRecord, SaleRecord, WorkerRecord,
};
use crate::domain::types::DataKind;
use crate::repository::error::StoreResult;
use async_trait::async_trait;

// ==========================================
// OpsStore Trait
// ==========================================
// 实现者: SqliteStore
// 洞察聚合器只依赖 list_*；导入管道只依赖 insert_batch + bulk_add_*
#[async_trait]
pub trait OpsStore: Send + Sync {
    // ===== 生产记录 =====

    /// 插入单条生产记录,返回存储层分配的 id
    async fn add_production(&self, record: &ProductionRecord) -> StoreResult<i64>;

    /// 批量插入生产记录（单事务,整体成功或整体回滚）
    async fn bulk_add_production(&self, records: &[ProductionRecord]) -> StoreResult<usize>;

    /// 按 id 整条更新
    async fn update_production(&self, id: i64, record: &ProductionRecord) -> StoreResult<()>;

    /// 按 id 删除
    async fn delete_production(&self, id: i64) -> StoreResult<()>;

    /// 全量读取（插入顺序）
    async fn list_production(&self) -> StoreResult<Vec<ProductionRecord>>;

    // ===== 库存条目 =====

    async fn add_inventory(&self, item: &InventoryItem) -> StoreResult<i64>;

    async fn bulk_add_inventory(&self, items: &[InventoryItem]) -> StoreResult<usize>;

    async fn update_inventory(&self, id: i64, item: &InventoryItem) -> StoreResult<()>;

    async fn delete_inventory(&self, id: i64) -> StoreResult<()>;

    async fn list_inventory(&self) -> StoreResult<Vec<InventoryItem>>;

    // ===== 销售记录 =====

    async fn add_sale(&self, record: &SaleRecord) -> StoreResult<i64>;

    async fn bulk_add_sales(&self, records: &[SaleRecord]) -> StoreResult<usize>;

    async fn update_sale(&self, id: i64, record: &SaleRecord) -> StoreResult<()>;

    async fn delete_sale(&self, id: i64) -> StoreResult<()>;

    async fn list_sales(&self) -> StoreResult<Vec<SaleRecord>>;

    // ===== 工人记录 =====

    async fn add_worker(&self, record: &WorkerRecord) -> StoreResult<i64>;

    async fn bulk_add_workers(&self, records: &[WorkerRecord]) -> StoreResult<usize>;

    async fn update_worker(&self, id: i64, record: &WorkerRecord) -> StoreResult<()>;

    async fn delete_worker(&self, id: i64) -> StoreResult<()>;

    async fn list_workers(&self) -> StoreResult<Vec<WorkerRecord>>;

    // ===== 导入批次管理 =====

    /// 插入批次记录,返回批次 id
    async fn insert_batch(&self, batch: &ImportBatch) -> StoreResult<i64>;

    /// 查询批次,可按种类过滤,导入时间倒序（最新在前）
    async fn list_batches(&self, kind: Option<DataKind>) -> StoreResult<Vec<ImportBatch>>;

    /// 删除批次并级联删除其回引记录
    ///
    /// 弱引用语义: 记录仅回引批次 id,级联方向为批次 → 记录
    async fn delete_batch(&self, batch_id: i64) -> StoreResult<()>;
}
