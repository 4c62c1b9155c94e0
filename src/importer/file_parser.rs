// ==========================================
// 工厂运营管理系统 - 文件解析器实现
// ==========================================
// 依据: Import_Pipeline_Spec_v0.2.md - 阶段 0: 文件读取
// 支持: CSV (.csv) / Excel (.xlsx/.xls, 取首个工作表)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 原始行: 列名 → 单元格文本（已 TRIM）
///
/// 导入边界的语义容器,校验器之后不再出现未定型值
pub type RawRow = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（表头行 + 数据行 → RawRow 序列,保持源顺序）
pub trait TabularFileParser: Send + Sync {
    fn parse_rows(&self, path: &Path) -> ImportResult<Vec<RawRow>>;
}

/// 按表头拼装一行,全空白行返回 None
fn assemble_row(headers: &[String], cells: impl Iterator<Item = String>) -> Option<RawRow> {
    let mut row = RawRow::new();
    for (idx, value) in cells.enumerate() {
        if let Some(header) = headers.get(idx) {
            row.insert(header.clone(), value.trim().to_string());
        }
    }
    if row.values().all(|v| v.is_empty()) {
        None
    } else {
        Some(row)
    }
}

// ==========================================
// CSV 解析器
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Read 源解析（样例回灌、测试用）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<RawRow>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            if let Some(row) = assemble_row(&headers, record.iter().map(|v| v.to_string())) {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

impl TabularFileParser for CsvParser {
    fn parse_rows(&self, path: &Path) -> ImportResult<Vec<RawRow>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel 解析器
// ==========================================
// 格式由 calamine 自动识别（xlsx/xls 统一入口）
pub struct ExcelParser;

impl TabularFileParser for ExcelParser {
    fn parse_rows(&self, path: &Path) -> ImportResult<Vec<RawRow>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        let first_sheet = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::Spreadsheet("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&first_sheet)
            .map_err(|e| ImportError::Spreadsheet(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::Spreadsheet("first sheet has no header row".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 布尔单元格经 Display 统一为 "true"/"false" 字面量,
        // 与 CSV 源的 delivered 判定口径一致
        let mut rows = Vec::new();
        for data_row in sheet_rows {
            if let Some(row) = assemble_row(&headers, data_row.iter().map(|c| c.to_string())) {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（按扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl TabularFileParser for UniversalFileParser {
    fn parse_rows(&self, path: &Path) -> ImportResult<Vec<RawRow>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_rows(path),
            "xlsx" | "xls" => ExcelParser.parse_rows(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
