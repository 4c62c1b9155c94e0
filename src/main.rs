// ==========================================
// 工厂运营管理系统 - 命令行入口
// ==========================================
// 用途: 导入数据文件 / 查看洞察与 KPI / 管理导入批次
// ==========================================

use anyhow::{bail, Context};
use factory_ops::db;
use factory_ops::domain::types::DataKind;
use factory_ops::importer::{sample_csv, ImportReport, ImportService, UniversalFileParser};
use factory_ops::insights::InsightsService;
use factory_ops::logging;
use factory_ops::repository::{OpsStore, SqliteStore};
use std::path::Path;
use std::sync::Arc;

/// 列表展示上限,超出部分折叠为 "...and N more"
const MAX_SHOWN_MESSAGES: usize = 5;

fn print_usage() {
    println!("{} v{}", factory_ops::APP_NAME, factory_ops::VERSION);
    println!();
    println!("用法: factory-ops <命令> [参数]");
    println!();
    println!("命令:");
    println!("  import <kind> <file>   导入数据文件 (.csv/.xlsx/.xls)");
    println!("  insights               计算并打印运营洞察");
    println!("  kpis                   打印驾驶舱 KPI 快照");
    println!("  batches [kind]         列出导入批次（最新在前）");
    println!("  delete-batch <id>      删除批次并级联删除其记录");
    println!("  sample <kind>          输出对应种类的样例 CSV");
    println!();
    println!("kind 取值: production / inventory / sales / workers");
    println!("数据库路径: 环境变量 FACTORY_OPS_DB_PATH 可覆盖默认位置");
}

fn parse_kind(raw: Option<&String>) -> anyhow::Result<DataKind> {
    let raw = raw.context("缺少 kind 参数")?;
    raw.parse::<DataKind>().map_err(anyhow::Error::msg)
}

/// 前若干条 + 折叠计数（对应前端的消息截断策略）
fn print_messages(label: &str, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    println!("{} ({}):", label, messages.len());
    for message in messages.iter().take(MAX_SHOWN_MESSAGES) {
        println!("  - {}", message);
    }
    if messages.len() > MAX_SHOWN_MESSAGES {
        println!("  ...and {} more", messages.len() - MAX_SHOWN_MESSAGES);
    }
}

fn print_report(report: &ImportReport) {
    if report.is_blocked() {
        println!(
            "导入被阻断: {} ({} 条错误,未落库)",
            report.file_name,
            report.errors.len()
        );
    } else {
        println!(
            "导入完成: {} → 批次 {} ({} 条记录, {} ms)",
            report.file_name,
            report.batch_id.unwrap_or_default(),
            report.imported,
            report.elapsed_ms
        );
    }
    print_messages("错误", &report.errors);
    print_messages("警告", &report.warnings);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };

    // sample 不需要数据库
    if command == "sample" {
        let kind = parse_kind(args.get(2))?;
        print!("{}", sample_csv(kind));
        return Ok(());
    }

    let db_path = db::default_db_path();
    tracing::info!(db = %db_path, "打开数据库");
    let store = Arc::new(SqliteStore::open(&db_path)?);

    match command.as_str() {
        "import" => {
            let kind = parse_kind(args.get(2))?;
            let file = args.get(3).context("缺少文件路径参数")?;
            let service = ImportService::new(store, Box::new(UniversalFileParser));
            let report = service.import_file(Path::new(file), kind).await?;
            print_report(&report);
        }
        "insights" => {
            let service = InsightsService::new(store);
            let report = service.refresh().await?;

            println!("{}", report.summary);
            for anomaly in &report.anomalies {
                println!("[{}] {}", anomaly.severity, anomaly.issue);
                println!("  evidence: {}", anomaly.evidence);
                println!("  action:   {}", anomaly.immediate_action);
            }
            for forecast in &report.forecasts {
                println!(
                    "[forecast/{}] {} ({} days, confidence {:.2})",
                    forecast.kind, forecast.item, forecast.days_to_depletion, forecast.confidence
                );
            }
            for rec in &report.recommendations {
                println!("[P{}] {} ({})", rec.priority, rec.action, rec.estimated_impact);
            }
        }
        "kpis" => {
            let service = InsightsService::new(store);
            let snapshot = service.kpis().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        "batches" => {
            let kind = match args.get(2) {
                Some(raw) => Some(raw.parse::<DataKind>().map_err(anyhow::Error::msg)?),
                None => None,
            };
            let batches = store.list_batches(kind).await?;
            if batches.is_empty() {
                println!("暂无导入批次");
            }
            for batch in batches {
                println!(
                    "#{} {} [{}] {} 条记录 @ {}",
                    batch.id.unwrap_or_default(),
                    batch.file_name,
                    batch.data_type,
                    batch.record_count,
                    batch.imported_at.to_rfc3339()
                );
            }
        }
        "delete-batch" => {
            let id: i64 = args
                .get(2)
                .context("缺少批次 id 参数")?
                .parse()
                .context("批次 id 必须为整数")?;
            store.delete_batch(id).await?;
            println!("批次 {} 已删除（含级联记录）", id);
        }
        other => {
            print_usage();
            bail!("未知命令: {}", other);
        }
    }

    Ok(())
}
