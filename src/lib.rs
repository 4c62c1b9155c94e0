// ==========================================
// 工厂运营管理系统 - 核心库
// ==========================================
// 依据: Ops_Core_Spec_v1.0.md - 系统宪法
// 技术栈: Rust + SQLite
// 系统定位: 小型制造企业运营数据的导入与洞察核心
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 洞察层 - 启发式规则
pub mod insights;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DataKind, Difficulty, ForecastKind, Severity, TrendDirection};

// 领域实体
pub use domain::{
    Anomaly, Forecast, ImportBatch, InsightsReport, InventoryItem, ProductionRecord,
    Recommendation, SaleRecord, WorkerRecord,
};

// 导入管道
pub use importer::{
    parse_import_file, sample_csv, validate_rows, CsvParser, ExcelParser, ImportReport,
    ImportService, ParsedRecords, RowValidationOutcome, UniversalFileParser,
};

// 洞察引擎
pub use insights::{
    compute_kpis, detect_anomalies, generate_forecasts, generate_insights,
    generate_recommendations, InsightsService, KpiSnapshot,
};

// 存储
pub use repository::{OpsStore, SqliteStore, StoreError, StoreResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工厂运营管理系统";
