// ==========================================
// 工厂运营管理系统 - SQLite 存储实现
// ==========================================
// 依据: Ops_Core_Spec_v1.0.md - PART D 存储契约
// 职责: OpsStore 的 rusqlite 实现 + 表结构初始化
// ==========================================
// 说明: 浏览器端原型使用 IndexedDB,桌面端统一落 SQLite;
//       时间统一存 RFC 3339 文本,种类存小写标签
// ==========================================

use crate::db;
use crate::domain::records::{
    ImportBatch, InventoryItem, ProductionRecord, SaleRecord, WorkerRecord,
};
use crate::domain::types::DataKind;
use crate::repository::error::{StoreError, StoreResult};
use crate::repository::store::OpsStore;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// 表结构
// ==========================================
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS import_batch (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name     TEXT NOT NULL,
    data_type     TEXT NOT NULL,
    record_count  INTEGER NOT NULL,
    imported_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS production_record (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    date            TEXT NOT NULL,
    product_type    TEXT NOT NULL,
    quantity        REAL NOT NULL,
    target          REAL NOT NULL,
    waste_kg        REAL NOT NULL,
    order_id        INTEGER,
    import_batch_id INTEGER REFERENCES import_batch(id)
);

CREATE TABLE IF NOT EXISTS inventory_item (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    item_name       TEXT NOT NULL,
    stock_kg        REAL NOT NULL,
    min_stock_kg    REAL NOT NULL,
    unit            TEXT NOT NULL,
    last_updated    TEXT NOT NULL,
    import_batch_id INTEGER REFERENCES import_batch(id)
);

CREATE TABLE IF NOT EXISTS sale_record (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    date            TEXT NOT NULL,
    customer        TEXT NOT NULL,
    product_type    TEXT NOT NULL,
    amount          REAL NOT NULL,
    revenue         REAL NOT NULL,
    delivered       INTEGER NOT NULL,
    import_batch_id INTEGER REFERENCES import_batch(id)
);

CREATE TABLE IF NOT EXISTS worker_record (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    date            TEXT NOT NULL,
    name            TEXT NOT NULL,
    shift           TEXT NOT NULL,
    tasks_done      INTEGER NOT NULL,
    import_batch_id INTEGER REFERENCES import_batch(id)
);

CREATE INDEX IF NOT EXISTS idx_production_batch ON production_record(import_batch_id);
CREATE INDEX IF NOT EXISTS idx_inventory_batch  ON inventory_item(import_batch_id);
CREATE INDEX IF NOT EXISTS idx_sale_batch       ON sale_record(import_batch_id);
CREATE INDEX IF NOT EXISTS idx_worker_batch     ON worker_record(import_batch_id);
"#;

/// 种类标签 → 枚举（读库用）
fn parse_kind(value: String) -> rusqlite::Result<DataKind> {
    value.parse::<DataKind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e.into())
    })
}

// ==========================================
// SqliteStore
// ==========================================
pub struct SqliteStore {
    /// 数据库连接
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// 打开文件数据库并初始化表结构
    pub fn open(db_path: &str) -> StoreResult<Self> {
        let conn = db::open_connection(db_path)?;
        Self::from_connection(conn)
    }

    /// 打开内存数据库（测试用）
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        db::configure_connection(&conn)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// UPDATE/DELETE 零行命中统一转 NotFound
    fn expect_hit(changed: usize, table: &str, id: i64) -> StoreResult<()> {
        if changed == 0 {
            Err(StoreError::NotFound(format!("{} id {}", table, id)))
        } else {
            Ok(())
        }
    }
}

// ===== 行映射 =====

fn map_production(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductionRecord> {
    Ok(ProductionRecord {
        id: row.get(0)?,
        date: row.get(1)?,
        product_type: row.get(2)?,
        quantity: row.get(3)?,
        target: row.get(4)?,
        waste_kg: row.get(5)?,
        order_id: row.get(6)?,
        import_batch_id: row.get(7)?,
    })
}

fn map_inventory(row: &rusqlite::Row<'_>) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        item_name: row.get(1)?,
        stock_kg: row.get(2)?,
        min_stock_kg: row.get(3)?,
        unit: row.get(4)?,
        last_updated: row.get(5)?,
        import_batch_id: row.get(6)?,
    })
}

fn map_sale(row: &rusqlite::Row<'_>) -> rusqlite::Result<SaleRecord> {
    Ok(SaleRecord {
        id: row.get(0)?,
        date: row.get(1)?,
        customer: row.get(2)?,
        product_type: row.get(3)?,
        amount: row.get(4)?,
        revenue: row.get(5)?,
        delivered: row.get(6)?,
        import_batch_id: row.get(7)?,
    })
}

fn map_worker(row: &rusqlite::Row<'_>) -> rusqlite::Result<WorkerRecord> {
    Ok(WorkerRecord {
        id: row.get(0)?,
        date: row.get(1)?,
        name: row.get(2)?,
        shift: row.get(3)?,
        tasks_done: row.get(4)?,
        import_batch_id: row.get(5)?,
    })
}

fn map_batch(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImportBatch> {
    Ok(ImportBatch {
        id: row.get(0)?,
        file_name: row.get(1)?,
        data_type: parse_kind(row.get::<_, String>(2)?)?,
        record_count: row.get(3)?,
        imported_at: row.get(4)?,
    })
}

#[async_trait]
impl OpsStore for SqliteStore {
    // ===== 生产记录 =====

    async fn add_production(&self, record: &ProductionRecord) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO production_record
                 (date, product_type, quantity, target, waste_kg, order_id, import_batch_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.date,
                record.product_type,
                record.quantity,
                record.target,
                record.waste_kg,
                record.order_id,
                record.import_batch_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn bulk_add_production(&self, records: &[ProductionRecord]) -> StoreResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO production_record
                     (date, product_type, quantity, target, waste_kg, order_id, import_batch_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.date,
                    record.product_type,
                    record.quantity,
                    record.target,
                    record.waste_kg,
                    record.order_id,
                    record.import_batch_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    async fn update_production(&self, id: i64, record: &ProductionRecord) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE production_record
                SET date = ?1, product_type = ?2, quantity = ?3, target = ?4,
                    waste_kg = ?5, order_id = ?6
              WHERE id = ?7",
            params![
                record.date,
                record.product_type,
                record.quantity,
                record.target,
                record.waste_kg,
                record.order_id,
                id,
            ],
        )?;
        Self::expect_hit(changed, "production_record", id)
    }

    async fn delete_production(&self, id: i64) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM production_record WHERE id = ?1", params![id])?;
        Self::expect_hit(changed, "production_record", id)
    }

    async fn list_production(&self) -> StoreResult<Vec<ProductionRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, date, product_type, quantity, target, waste_kg, order_id, import_batch_id
               FROM production_record ORDER BY id",
        )?;
        let records = stmt
            .query_map([], map_production)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    // ===== 库存条目 =====

    async fn add_inventory(&self, item: &InventoryItem) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO inventory_item
                 (item_name, stock_kg, min_stock_kg, unit, last_updated, import_batch_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.item_name,
                item.stock_kg,
                item.min_stock_kg,
                item.unit,
                item.last_updated,
                item.import_batch_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn bulk_add_inventory(&self, items: &[InventoryItem]) -> StoreResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO inventory_item
                     (item_name, stock_kg, min_stock_kg, unit, last_updated, import_batch_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for item in items {
                stmt.execute(params![
                    item.item_name,
                    item.stock_kg,
                    item.min_stock_kg,
                    item.unit,
                    item.last_updated,
                    item.import_batch_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(items.len())
    }

    async fn update_inventory(&self, id: i64, item: &InventoryItem) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE inventory_item
                SET item_name = ?1, stock_kg = ?2, min_stock_kg = ?3, unit = ?4, last_updated = ?5
              WHERE id = ?6",
            params![
                item.item_name,
                item.stock_kg,
                item.min_stock_kg,
                item.unit,
                item.last_updated,
                id,
            ],
        )?;
        Self::expect_hit(changed, "inventory_item", id)
    }

    async fn delete_inventory(&self, id: i64) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM inventory_item WHERE id = ?1", params![id])?;
        Self::expect_hit(changed, "inventory_item", id)
    }

    async fn list_inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, item_name, stock_kg, min_stock_kg, unit, last_updated, import_batch_id
               FROM inventory_item ORDER BY id",
        )?;
        let items = stmt
            .query_map([], map_inventory)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    // ===== 销售记录 =====

    async fn add_sale(&self, record: &SaleRecord) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO sale_record
                 (date, customer, product_type, amount, revenue, delivered, import_batch_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.date,
                record.customer,
                record.product_type,
                record.amount,
                record.revenue,
                record.delivered,
                record.import_batch_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn bulk_add_sales(&self, records: &[SaleRecord]) -> StoreResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sale_record
                     (date, customer, product_type, amount, revenue, delivered, import_batch_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.date,
                    record.customer,
                    record.product_type,
                    record.amount,
                    record.revenue,
                    record.delivered,
                    record.import_batch_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    async fn update_sale(&self, id: i64, record: &SaleRecord) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE sale_record
                SET date = ?1, customer = ?2, product_type = ?3, amount = ?4,
                    revenue = ?5, delivered = ?6
              WHERE id = ?7",
            params![
                record.date,
                record.customer,
                record.product_type,
                record.amount,
                record.revenue,
                record.delivered,
                id,
            ],
        )?;
        Self::expect_hit(changed, "sale_record", id)
    }

    async fn delete_sale(&self, id: i64) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM sale_record WHERE id = ?1", params![id])?;
        Self::expect_hit(changed, "sale_record", id)
    }

    async fn list_sales(&self) -> StoreResult<Vec<SaleRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, date, customer, product_type, amount, revenue, delivered, import_batch_id
               FROM sale_record ORDER BY id",
        )?;
        let records = stmt
            .query_map([], map_sale)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    // ===== 工人记录 =====

    async fn add_worker(&self, record: &WorkerRecord) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO worker_record (date, name, shift, tasks_done, import_batch_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.date,
                record.name,
                record.shift,
                record.tasks_done,
                record.import_batch_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn bulk_add_workers(&self, records: &[WorkerRecord]) -> StoreResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO worker_record (date, name, shift, tasks_done, import_batch_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.date,
                    record.name,
                    record.shift,
                    record.tasks_done,
                    record.import_batch_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    async fn update_worker(&self, id: i64, record: &WorkerRecord) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE worker_record
                SET date = ?1, name = ?2, shift = ?3, tasks_done = ?4
              WHERE id = ?5",
            params![record.date, record.name, record.shift, record.tasks_done, id],
        )?;
        Self::expect_hit(changed, "worker_record", id)
    }

    async fn delete_worker(&self, id: i64) -> StoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM worker_record WHERE id = ?1", params![id])?;
        Self::expect_hit(changed, "worker_record", id)
    }

    async fn list_workers(&self) -> StoreResult<Vec<WorkerRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, date, name, shift, tasks_done, import_batch_id
               FROM worker_record ORDER BY id",
        )?;
        let records = stmt
            .query_map([], map_worker)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    // ===== 导入批次管理 =====

    async fn insert_batch(&self, batch: &ImportBatch) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO import_batch (file_name, data_type, record_count, imported_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                batch.file_name,
                batch.data_type.as_str(),
                batch.record_count,
                batch.imported_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn list_batches(&self, kind: Option<DataKind>) -> StoreResult<Vec<ImportBatch>> {
        let conn = self.lock()?;
        let batches = match kind {
            Some(k) => {
                let mut stmt = conn.prepare(
                    "SELECT id, file_name, data_type, record_count, imported_at
                       FROM import_batch WHERE data_type = ?1
                      ORDER BY imported_at DESC, id DESC",
                )?;
                let rows = stmt
                    .query_map(params![k.as_str()], map_batch)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, file_name, data_type, record_count, imported_at
                       FROM import_batch ORDER BY imported_at DESC, id DESC",
                )?;
                let rows = stmt
                    .query_map([], map_batch)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(batches)
    }

    async fn delete_batch(&self, batch_id: i64) -> StoreResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        // 先定位批次种类,种类 → 表名是唯一映射点
        let kind_str: Option<String> = {
            let mut stmt = tx.prepare("SELECT data_type FROM import_batch WHERE id = ?1")?;
            let mut rows = stmt.query(params![batch_id])?;
            match rows.next()? {
                Some(row) => Some(row.get(0)?),
                None => None,
            }
        };
        let kind = match kind_str {
            Some(s) => parse_kind(s)?,
            None => {
                return Err(StoreError::NotFound(format!("import_batch id {}", batch_id)));
            }
        };

        tx.execute(
            &format!(
                "DELETE FROM {} WHERE import_batch_id = ?1",
                kind.table_name()
            ),
            params![batch_id],
        )?;
        tx.execute("DELETE FROM import_batch WHERE id = ?1", params![batch_id])?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn production(day: u32, quantity: f64) -> ProductionRecord {
        ProductionRecord {
            id: None,
            date: Utc.with_ymd_and_hms(2025, 6, day, 0, 0, 0).unwrap(),
            product_type: "Cement Block".to_string(),
            quantity,
            target: 500.0,
            waste_kg: 10.0,
            order_id: None,
            import_batch_id: None,
        }
    }

    #[tokio::test]
    async fn test_production_crud_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();

        let id = store.add_production(&production(2, 450.0)).await.unwrap();
        assert!(id > 0);

        let listed = store.list_production().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, Some(id));
        assert_eq!(listed[0].quantity, 450.0);

        let mut updated = listed[0].clone();
        updated.quantity = 480.0;
        store.update_production(id, &updated).await.unwrap();
        assert_eq!(store.list_production().await.unwrap()[0].quantity, 480.0);

        store.delete_production(id).await.unwrap();
        assert!(store.list_production().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = store.update_production(999, &production(2, 1.0)).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_batch_cascade_delete() {
        let store = SqliteStore::open_in_memory().unwrap();

        let batch_id = store
            .insert_batch(&ImportBatch {
                id: None,
                file_name: "june.csv".to_string(),
                data_type: DataKind::Production,
                record_count: 2,
                imported_at: Utc::now(),
            })
            .await
            .unwrap();

        let mut a = production(2, 450.0);
        a.import_batch_id = Some(batch_id);
        let mut b = production(3, 460.0);
        b.import_batch_id = Some(batch_id);
        store.bulk_add_production(&[a, b]).await.unwrap();

        // 手工记录不属于任何批次,不受级联影响
        store.add_production(&production(4, 470.0)).await.unwrap();

        store.delete_batch(batch_id).await.unwrap();

        assert!(store.list_batches(None).await.unwrap().is_empty());
        let survivors = store.list_production().await.unwrap();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].import_batch_id, None);
    }

    #[tokio::test]
    async fn test_list_batches_newest_first_with_kind_filter() {
        let store = SqliteStore::open_in_memory().unwrap();

        for (name, kind, ts) in [
            ("a.csv", DataKind::Production, 1),
            ("b.csv", DataKind::Inventory, 2),
            ("c.csv", DataKind::Production, 3),
        ] {
            store
                .insert_batch(&ImportBatch {
                    id: None,
                    file_name: name.to_string(),
                    data_type: kind,
                    record_count: 0,
                    imported_at: Utc.with_ymd_and_hms(2025, 6, ts, 0, 0, 0).unwrap(),
                })
                .await
                .unwrap();
        }

        let all = store.list_batches(None).await.unwrap();
        assert_eq!(
            all.iter().map(|b| b.file_name.as_str()).collect::<Vec<_>>(),
            vec!["c.csv", "b.csv", "a.csv"]
        );

        let production_only = store
            .list_batches(Some(DataKind::Production))
            .await
            .unwrap();
        assert_eq!(
            production_only
                .iter()
                .map(|b| b.file_name.as_str())
                .collect::<Vec<_>>(),
            vec!["c.csv", "a.csv"]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_batch_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = store.delete_batch(42).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
