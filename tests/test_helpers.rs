// ==========================================
// 集成测试辅助
// ==========================================
// 职责: 临时文件构造 / 服务装配
// ==========================================

#![allow(dead_code)]

use factory_ops::importer::{ImportService, UniversalFileParser};
use factory_ops::repository::SqliteStore;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// 内存库 + 通用解析器的导入服务
pub fn create_import_service() -> (Arc<SqliteStore>, ImportService<SqliteStore>) {
    let store = Arc::new(SqliteStore::open_in_memory().expect("Failed to open in-memory store"));
    let service = ImportService::new(Arc::clone(&store), Box::new(UniversalFileParser));
    (store, service)
}

/// 写入内容到临时 CSV 文件
pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").expect("Failed to create temp file");
    write!(file, "{}", content).expect("Failed to write temp file");
    file
}
