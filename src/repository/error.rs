// ==========================================
// 工厂运营管理系统 - 存储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 存储层错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database failure: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection lock poisoned")]
    LockPoisoned,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;
