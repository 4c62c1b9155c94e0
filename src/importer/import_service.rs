// ==========================================
// 工厂运营管理系统 - 数据导入服务
// ==========================================
// 依据: Import_Pipeline_Spec_v0.2.md - 1. 导入主流程
// 职责: 整合导入流程,从文件到存储
// 流程: 解析 → 行校验/定型 → 批次登记 → 批量落库
// ==========================================
// 阻断策略: errors 非空时不落库（warnings 不阻断）
// 行级问题永不外抛,统一通过 ImportReport 返回
// ==========================================

use crate::domain::records::ImportBatch;
use crate::domain::types::DataKind;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::TabularFileParser;
use crate::importer::row_validator::{validate_rows, ParsedRecords, RowValidationOutcome};
use crate::repository::store::OpsStore;
use chrono::Utc;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

// ==========================================
// 顶层解析入口
// ==========================================

/// 文件 → 行校验产出
///
/// 文件整体不可解析时返回空记录 + 单条错误 + 无警告,
/// 不会向调用方抛出
pub fn parse_import_file(
    parser: &dyn TabularFileParser,
    path: &Path,
    kind: DataKind,
) -> RowValidationOutcome {
    match parser.parse_rows(path) {
        Ok(rows) => validate_rows(kind, &rows),
        Err(e) => RowValidationOutcome::file_failure(
            kind,
            format!("Failed to parse {}: {}", path.display(), e),
        ),
    }
}

// ==========================================
// ImportReport - 单文件导入结果
// ==========================================
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub file_name: String,
    pub data_type: DataKind,
    pub batch_id: Option<i64>, // 阻断时为 None
    pub imported: usize,       // 实际落库记录数
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub elapsed_ms: u64,
}

impl ImportReport {
    /// 本次导入是否因行级错误被阻断
    pub fn is_blocked(&self) -> bool {
        !self.errors.is_empty()
    }
}

// ==========================================
// ImportService - 导入服务
// ==========================================
pub struct ImportService<S: OpsStore> {
    // 数据访问层
    store: Arc<S>,
    // 文件解析器
    parser: Box<dyn TabularFileParser>,
}

impl<S: OpsStore> ImportService<S> {
    pub fn new(store: Arc<S>, parser: Box<dyn TabularFileParser>) -> Self {
        Self { store, parser }
    }

    /// 导入单个数据文件
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入结果（含阻断情形,见 is_blocked）
    /// - Err: 仅存储层失败
    pub async fn import_file(&self, path: &Path, kind: DataKind) -> ImportResult<ImportReport> {
        let start = Instant::now();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        info!(file = %file_name, kind = %kind, "开始导入数据文件");

        // === 步骤 1: 解析 + 行校验 ===
        debug!("步骤 1: 解析与行校验");
        let outcome = parse_import_file(self.parser.as_ref(), path, kind);
        info!(
            records = outcome.records.len(),
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            "行校验完成"
        );

        let RowValidationOutcome {
            records,
            errors,
            warnings,
        } = outcome;

        // === 步骤 2: 错误阻断判定 ===
        if !errors.is_empty() {
            warn!(errors = errors.len(), "存在行级错误,本次导入不落库");
            return Ok(ImportReport {
                file_name,
                data_type: kind,
                batch_id: None,
                imported: 0,
                errors,
                warnings,
                elapsed_ms: start.elapsed().as_millis() as u64,
            });
        }

        // === 步骤 3: 批次登记 ===
        debug!("步骤 3: 批次登记");
        let batch = ImportBatch {
            id: None,
            file_name: file_name.clone(),
            data_type: kind,
            record_count: records.len() as i64,
            imported_at: Utc::now(),
        };
        let batch_id = self.store.insert_batch(&batch).await?;
        debug!(batch_id, "批次登记完成");

        // === 步骤 4: 批量落库（记录回引批次）===
        debug!("步骤 4: 批量落库");
        let imported = match records {
            ParsedRecords::Production(mut records) => {
                for record in &mut records {
                    record.import_batch_id = Some(batch_id);
                }
                self.store.bulk_add_production(&records).await?
            }
            ParsedRecords::Inventory(mut items) => {
                for item in &mut items {
                    item.import_batch_id = Some(batch_id);
                }
                self.store.bulk_add_inventory(&items).await?
            }
            ParsedRecords::Sales(mut records) => {
                for record in &mut records {
                    record.import_batch_id = Some(batch_id);
                }
                self.store.bulk_add_sales(&records).await?
            }
            ParsedRecords::Workers(mut records) => {
                for record in &mut records {
                    record.import_batch_id = Some(batch_id);
                }
                self.store.bulk_add_workers(&records).await?
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(batch_id, imported, elapsed_ms, "数据导入完成");

        Ok(ImportReport {
            file_name,
            data_type: kind,
            batch_id: Some(batch_id),
            imported,
            errors,
            warnings,
            elapsed_ms,
        })
    }

    /// 批量导入多个文件（并发执行,单文件失败不影响其他文件）
    pub async fn import_files(
        &self,
        files: &[(PathBuf, DataKind)],
    ) -> Vec<Result<ImportReport, String>> {
        info!(count = files.len(), "开始批量导入文件");

        let tasks = files.iter().map(|(path, kind)| async move {
            self.import_file(path, *kind)
                .await
                .map_err(|e| format!("{}: {}", path.display(), e))
        });
        let results = join_all(tasks).await;

        info!(
            total = results.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );
        results
    }
}
