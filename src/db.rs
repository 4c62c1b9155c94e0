// ==========================================
// 工厂运营管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键开关一致）
// - 统一 busy_timeout,减少偶发 busy 错误
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// foreign_keys 与 busy_timeout 均为连接级配置,每个连接单独开启
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// 默认数据库路径
///
/// 优先级: 环境变量 FACTORY_OPS_DB_PATH > 用户数据目录 > 当前目录回退
pub fn default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("FACTORY_OPS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./factory_ops.db");
    if let Some(data_dir) = dirs::data_dir() {
        path = data_dir.join("factory-ops");
        if std::fs::create_dir_all(&path).is_ok() {
            path = path.join("factory_ops.db");
        } else {
            path = PathBuf::from("./factory_ops.db");
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_connection() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();

        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_default_db_path_not_empty() {
        let path = default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }
}
