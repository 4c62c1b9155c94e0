// ==========================================
// 工厂运营管理系统 - 行校验/定型器
// ==========================================
// 依据: Import_Pipeline_Spec_v0.2.md - 3. 行级校验规则
// 职责: RawRow → 强类型记录,按行累积错误与警告
// ==========================================
// 错误分级:
// - 行级拒绝: 缺必填字段 → 该行不产出记录,errors 追加一条,批次继续
// - 软规则:   记录照常产出,warnings 追加一条
// 两个列表都保持先发现先入列的顺序
// ==========================================

use crate::domain::records::{InventoryItem, ProductionRecord, SaleRecord, WorkerRecord};
use crate::domain::types::DataKind;
use crate::importer::coerce::{
    decimal_or_zero, instant_or_now, integer_or_zero, is_true_literal, non_empty, parse_decimal,
    parse_instant, parse_integer,
};
use crate::importer::file_parser::RawRow;
use chrono::Utc;

// ==========================================
// ParsedRecords - 种类标签化的记录集合
// ==========================================
#[derive(Debug, Clone)]
pub enum ParsedRecords {
    Production(Vec<ProductionRecord>),
    Inventory(Vec<InventoryItem>),
    Sales(Vec<SaleRecord>),
    Workers(Vec<WorkerRecord>),
}

impl ParsedRecords {
    /// 指定种类的空集合
    pub fn empty(kind: DataKind) -> Self {
        match kind {
            DataKind::Production => ParsedRecords::Production(Vec::new()),
            DataKind::Inventory => ParsedRecords::Inventory(Vec::new()),
            DataKind::Sales => ParsedRecords::Sales(Vec::new()),
            DataKind::Workers => ParsedRecords::Workers(Vec::new()),
        }
    }

    pub fn kind(&self) -> DataKind {
        match self {
            ParsedRecords::Production(_) => DataKind::Production,
            ParsedRecords::Inventory(_) => DataKind::Inventory,
            ParsedRecords::Sales(_) => DataKind::Sales,
            ParsedRecords::Workers(_) => DataKind::Workers,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ParsedRecords::Production(v) => v.len(),
            ParsedRecords::Inventory(v) => v.len(),
            ParsedRecords::Sales(v) => v.len(),
            ParsedRecords::Workers(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ==========================================
// RowValidationOutcome - 校验产出
// ==========================================
#[derive(Debug, Clone)]
pub struct RowValidationOutcome {
    pub records: ParsedRecords,
    pub errors: Vec<String>,   // 行级拒绝消息
    pub warnings: Vec<String>, // 软规则消息（不阻断）
}

impl RowValidationOutcome {
    /// 文件级失败产出: 空记录 + 单条错误,无警告
    pub fn file_failure(kind: DataKind, message: String) -> Self {
        Self {
            records: ParsedRecords::empty(kind),
            errors: vec![message],
            warnings: Vec::new(),
        }
    }
}

/// 缺必填字段的统一拒绝消息（行号 1 起,按输入顺序）
fn missing_fields_error(kind: DataKind, row_number: usize) -> String {
    format!(
        "Row {}: Missing required fields ({})",
        row_number,
        kind.required_fields()
    )
}

// ==========================================
// 校验主入口
// ==========================================
pub fn validate_rows(kind: DataKind, rows: &[RawRow]) -> RowValidationOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let records = match kind {
        DataKind::Production => {
            let mut out = Vec::new();
            for (idx, row) in rows.iter().enumerate() {
                match validate_production_row(row, idx + 1, &mut warnings) {
                    Some(record) => out.push(record),
                    None => errors.push(missing_fields_error(kind, idx + 1)),
                }
            }
            ParsedRecords::Production(out)
        }
        DataKind::Inventory => {
            let mut out = Vec::new();
            for (idx, row) in rows.iter().enumerate() {
                match validate_inventory_row(row, idx + 1, &mut warnings) {
                    Some(record) => out.push(record),
                    None => errors.push(missing_fields_error(kind, idx + 1)),
                }
            }
            ParsedRecords::Inventory(out)
        }
        DataKind::Sales => {
            let mut out = Vec::new();
            for (idx, row) in rows.iter().enumerate() {
                match validate_sale_row(row) {
                    Some(record) => out.push(record),
                    None => errors.push(missing_fields_error(kind, idx + 1)),
                }
            }
            ParsedRecords::Sales(out)
        }
        DataKind::Workers => {
            let mut out = Vec::new();
            for (idx, row) in rows.iter().enumerate() {
                match validate_worker_row(row) {
                    Some(record) => out.push(record),
                    None => errors.push(missing_fields_error(kind, idx + 1)),
                }
            }
            ParsedRecords::Workers(out)
        }
    };

    RowValidationOutcome {
        records,
        errors,
        warnings,
    }
}

// ==========================================
// 单行校验（按种类）
// ==========================================

/// production: date + productType 非空,quantity 可解析
fn validate_production_row(
    row: &RawRow,
    row_number: usize,
    warnings: &mut Vec<String>,
) -> Option<ProductionRecord> {
    let date_raw = non_empty(row, "date")?;
    let product_type = non_empty(row, "productType")?;
    let quantity = non_empty(row, "quantity").and_then(parse_decimal)?;

    let target = decimal_or_zero(row, "target");
    let waste_kg = decimal_or_zero(row, "wasteKg");
    let order_id = non_empty(row, "orderId").and_then(parse_integer);
    // 非空但无法按日历解析时回退为当前时间（与 lastUpdated 口径一致）
    let date = parse_instant(date_raw).unwrap_or_else(Utc::now);

    if target > 0.0 && quantity > target {
        warnings.push(format!("Row {}: Quantity exceeds target", row_number));
    }

    Some(ProductionRecord {
        id: None,
        date,
        product_type: product_type.to_string(),
        quantity,
        target,
        waste_kg,
        order_id,
        import_batch_id: None,
    })
}

/// inventory: itemName 非空,stockKg 可解析
fn validate_inventory_row(
    row: &RawRow,
    row_number: usize,
    warnings: &mut Vec<String>,
) -> Option<InventoryItem> {
    let item_name = non_empty(row, "itemName")?;
    let stock_kg = non_empty(row, "stockKg").and_then(parse_decimal)?;

    let min_stock_kg = decimal_or_zero(row, "minStockKg");
    let unit = non_empty(row, "unit").unwrap_or("kg").to_string();
    let last_updated = instant_or_now(non_empty(row, "lastUpdated"));

    if stock_kg < min_stock_kg {
        warnings.push(format!(
            "Row {}: {} is below minimum stock",
            row_number, item_name
        ));
    }

    Some(InventoryItem {
        id: None,
        item_name: item_name.to_string(),
        stock_kg,
        min_stock_kg,
        unit,
        last_updated,
        import_batch_id: None,
    })
}

/// sales: date + customer + productType 非空
fn validate_sale_row(row: &RawRow) -> Option<SaleRecord> {
    let date_raw = non_empty(row, "date")?;
    let customer = non_empty(row, "customer")?;
    let product_type = non_empty(row, "productType")?;

    let amount = decimal_or_zero(row, "amount");
    let revenue = decimal_or_zero(row, "revenue");
    let delivered = non_empty(row, "delivered").is_some_and(is_true_literal);
    let date = parse_instant(date_raw).unwrap_or_else(Utc::now);

    Some(SaleRecord {
        id: None,
        date,
        customer: customer.to_string(),
        product_type: product_type.to_string(),
        amount,
        revenue,
        delivered,
        import_batch_id: None,
    })
}

/// workers: date + name + shift 非空
fn validate_worker_row(row: &RawRow) -> Option<WorkerRecord> {
    let date_raw = non_empty(row, "date")?;
    let name = non_empty(row, "name")?;
    let shift = non_empty(row, "shift")?;

    let tasks_done = integer_or_zero(row, "tasksDone");
    let date = parse_instant(date_raw).unwrap_or_else(Utc::now);

    Some(WorkerRecord {
        id: None,
        date,
        name: name.to_string(),
        shift: shift.to_string(),
        tasks_done,
        import_batch_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_production_row_valid() {
        let rows = vec![row(&[
            ("date", "2025-06-02"),
            ("productType", "Cement Block"),
            ("quantity", "450"),
            ("target", "500"),
            ("wasteKg", "12.5"),
            ("orderId", "1001"),
        ])];

        let outcome = validate_rows(DataKind::Production, &rows);

        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
        let ParsedRecords::Production(records) = outcome.records else {
            panic!("wrong variant");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, 450.0);
        assert_eq!(records[0].order_id, Some(1001));
    }

    #[test]
    fn test_production_row_missing_required() {
        // 第 2 行缺 productType,第 3 行 quantity 不可解析
        let rows = vec![
            row(&[("date", "2025-06-02"), ("productType", "Brick"), ("quantity", "10")]),
            row(&[("date", "2025-06-03"), ("quantity", "20")]),
            row(&[("date", "2025-06-04"), ("productType", "Brick"), ("quantity", "lots")]),
        ];

        let outcome = validate_rows(DataKind::Production, &rows);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.errors,
            vec![
                "Row 2: Missing required fields (date, productType, quantity)".to_string(),
                "Row 3: Missing required fields (date, productType, quantity)".to_string(),
            ]
        );
    }

    #[test]
    fn test_production_optional_numeric_defaults_to_zero() {
        let rows = vec![row(&[
            ("date", "2025-06-02"),
            ("productType", "Brick"),
            ("quantity", "10"),
            ("target", "??"),
            ("wasteKg", "NaN"),
        ])];

        let outcome = validate_rows(DataKind::Production, &rows);

        let ParsedRecords::Production(records) = outcome.records else {
            panic!("wrong variant");
        };
        assert!(outcome.errors.is_empty());
        assert_eq!(records[0].target, 0.0);
        assert!(records[0].waste_kg.is_finite());
        assert_eq!(records[0].waste_kg, 0.0);
        assert_eq!(records[0].order_id, None);
    }

    #[test]
    fn test_production_quantity_exceeds_target_warns() {
        let rows = vec![row(&[
            ("date", "2025-06-02"),
            ("productType", "Brick"),
            ("quantity", "600"),
            ("target", "500"),
        ])];

        let outcome = validate_rows(DataKind::Production, &rows);

        // 软规则: 仍产出记录,仅警告
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.warnings, vec!["Row 1: Quantity exceeds target".to_string()]);
    }

    #[test]
    fn test_inventory_below_minimum_warns_but_keeps_record() {
        let rows = vec![row(&[
            ("itemName", "Paint"),
            ("stockKg", "40"),
            ("minStockKg", "100"),
            ("unit", "L"),
        ])];

        let outcome = validate_rows(DataKind::Inventory, &rows);

        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.errors.is_empty());
        assert_eq!(
            outcome.warnings,
            vec!["Row 1: Paint is below minimum stock".to_string()]
        );
    }

    #[test]
    fn test_inventory_defaults() {
        let rows = vec![row(&[("itemName", "Cement"), ("stockKg", "1200")])];

        let outcome = validate_rows(DataKind::Inventory, &rows);

        let ParsedRecords::Inventory(records) = outcome.records else {
            panic!("wrong variant");
        };
        assert_eq!(records[0].unit, "kg");
        assert_eq!(records[0].min_stock_kg, 0.0);
    }

    #[test]
    fn test_inventory_missing_stock_rejects() {
        let rows = vec![row(&[("itemName", "Cement")])];

        let outcome = validate_rows(DataKind::Inventory, &rows);

        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.errors,
            vec!["Row 1: Missing required fields (itemName, stockKg)".to_string()]
        );
    }

    #[test]
    fn test_sale_delivered_literal() {
        let rows = vec![
            row(&[
                ("date", "2025-06-02"),
                ("customer", "Acme"),
                ("productType", "Brick"),
                ("delivered", "true"),
            ]),
            row(&[
                ("date", "2025-06-02"),
                ("customer", "Acme"),
                ("productType", "Brick"),
                ("delivered", "TRUE"),
            ]),
            row(&[
                ("date", "2025-06-02"),
                ("customer", "Acme"),
                ("productType", "Brick"),
                ("delivered", "yes"),
            ]),
        ];

        let outcome = validate_rows(DataKind::Sales, &rows);

        let ParsedRecords::Sales(records) = outcome.records else {
            panic!("wrong variant");
        };
        assert_eq!(
            records.iter().map(|r| r.delivered).collect::<Vec<_>>(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_sales_missing_customer_rejects() {
        let rows = vec![row(&[("date", "2025-06-02"), ("productType", "Brick")])];

        let outcome = validate_rows(DataKind::Sales, &rows);

        assert_eq!(
            outcome.errors,
            vec!["Row 1: Missing required fields (date, customer, productType)".to_string()]
        );
    }

    #[test]
    fn test_worker_tasks_done_defaults() {
        let rows = vec![row(&[
            ("date", "2025-06-02"),
            ("name", "Li Wei"),
            ("shift", "morning"),
            ("tasksDone", "many"),
        ])];

        let outcome = validate_rows(DataKind::Workers, &rows);

        let ParsedRecords::Workers(records) = outcome.records else {
            panic!("wrong variant");
        };
        assert!(outcome.errors.is_empty());
        assert_eq!(records[0].tasks_done, 0);
    }

    #[test]
    fn test_worker_missing_shift_rejects() {
        let rows = vec![row(&[("date", "2025-06-02"), ("name", "Li Wei")])];

        let outcome = validate_rows(DataKind::Workers, &rows);

        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.errors,
            vec!["Row 1: Missing required fields (date, name, shift)".to_string()]
        );
    }

    #[test]
    fn test_rejection_independent_of_other_rows() {
        // 坏行前后各有好行,编号与产出互不影响
        let rows = vec![
            row(&[("date", "2025-06-02"), ("name", "A"), ("shift", "morning")]),
            row(&[("date", "2025-06-02"), ("name", "B")]),
            row(&[("date", "2025-06-02"), ("name", "C"), ("shift", "night")]),
        ];

        let outcome = validate_rows(DataKind::Workers, &rows);

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Row 2:"));
    }
}
