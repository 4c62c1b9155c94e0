// ==========================================
// 工厂运营管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::StoreError;
use thiserror::Error;

/// 导入模块错误类型
///
/// 行级问题不走此类型: 行拒绝/软规则统一通过
/// RowValidationOutcome 的 errors/warnings 列表返回
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0} (expected .csv/.xlsx/.xls)")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Failed to parse spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("Failed to parse CSV: {0}")]
    Csv(String),

    // ===== 存储错误（落库阶段）=====
    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileRead(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Csv(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::Spreadsheet(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
