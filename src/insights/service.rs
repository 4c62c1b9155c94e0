// ==========================================
// 工厂运营管理系统 - 洞察服务
// ==========================================
// 职责: 从存储取四类集合,调用纯聚合函数
// 架构: 服务层 → 纯函数核心,存储以构造注入
// ==========================================

use crate::domain::insight::InsightsReport;
use crate::insights::aggregator::generate_insights;
use crate::insights::kpi::{compute_kpis, KpiSnapshot};
use crate::repository::error::StoreResult;
use crate::repository::store::OpsStore;
use std::sync::Arc;
use tracing::debug;

pub struct InsightsService<S: OpsStore> {
    /// 集合存储
    store: Arc<S>,
}

impl<S: OpsStore> InsightsService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 全量取数并重新计算洞察（每次调用独立,无缓存）
    pub async fn refresh(&self) -> StoreResult<InsightsReport> {
        let production = self.store.list_production().await?;
        let inventory = self.store.list_inventory().await?;
        let sales = self.store.list_sales().await?;
        let workers = self.store.list_workers().await?;
        debug!(
            production = production.len(),
            inventory = inventory.len(),
            sales = sales.len(),
            workers = workers.len(),
            "洞察取数完成"
        );

        Ok(generate_insights(&production, &inventory, &sales, &workers))
    }

    /// 驾驶舱 KPI 快照
    pub async fn kpis(&self) -> StoreResult<KpiSnapshot> {
        let production = self.store.list_production().await?;
        let inventory = self.store.list_inventory().await?;
        let sales = self.store.list_sales().await?;
        let workers = self.store.list_workers().await?;

        Ok(compute_kpis(&production, &inventory, &sales, &workers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::InventoryItem;
    use crate::repository::sqlite_store::SqliteStore;
    use crate::repository::store::OpsStore;
    use chrono::Utc;

    #[tokio::test]
    async fn test_refresh_over_empty_store() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let service = InsightsService::new(store);

        let report = service.refresh().await.unwrap();

        assert!(report.anomalies.is_empty());
        assert_eq!(report.recommendations.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_reflects_store_contents() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        store
            .add_inventory(&InventoryItem {
                id: None,
                item_name: "Paint".to_string(),
                stock_kg: 40.0,
                min_stock_kg: 100.0,
                unit: "L".to_string(),
                last_updated: Utc::now(),
                import_batch_id: None,
            })
            .await
            .unwrap();
        let service = InsightsService::new(store);

        let report = service.refresh().await.unwrap();

        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.forecasts.len(), 1);

        let kpis = service.kpis().await.unwrap();
        assert_eq!(kpis.low_stock_items, 1);
    }
}
