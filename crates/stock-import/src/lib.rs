//! # Stock Import
//!
//! 上傳檔案解析：Excel (.xlsx/.xls) / CSV (.csv) → `RawTable`

use calamine::{open_workbook_auto, Reader};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use stock_core::{RawTable, Result, StockError};

/// 檔案解析器
pub trait TableParser {
    /// 解析檔案為原始表格（第一列為表頭）
    fn parse(&self, path: &Path) -> Result<RawTable>;
}

/// CSV 解析器
pub struct CsvParser;

impl CsvParser {
    /// 從任意讀取器解析 CSV
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允許行長度不一致
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| StockError::CsvParse(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut table = header_table(headers)?;

        for result in reader.records() {
            let record = result.map_err(|e| StockError::CsvParse(e.to_string()))?;
            push_non_blank(&mut table, record.iter().map(|v| v.trim().to_string()).collect());
        }

        Ok(table)
    }
}

impl TableParser for CsvParser {
    fn parse(&self, path: &Path) -> Result<RawTable> {
        ensure_exists(path)?;
        let file = File::open(path)?;
        self.parse_reader(file)
    }
}

/// Excel 解析器（讀取第一個工作表）
pub struct ExcelParser;

impl TableParser for ExcelParser {
    fn parse(&self, path: &Path) -> Result<RawTable> {
        ensure_exists(path)?;

        let mut workbook =
            open_workbook_auto(path).map_err(|e| StockError::ExcelParse(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| StockError::ExcelParse("Excel 檔案沒有工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| StockError::ExcelParse(e.to_string()))?;

        let mut rows = range.rows();
        let header_row = rows.next().ok_or(StockError::EmptyTable)?;
        let headers = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut table = header_table(headers)?;

        for data_row in rows {
            push_non_blank(
                &mut table,
                data_row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect(),
            );
        }

        tracing::debug!("工作表 {}: {} 列", sheet_name, table.len());

        Ok(table)
    }
}

/// 通用解析器（依副檔名選擇）
pub struct UniversalParser;

impl TableParser for UniversalParser {
    fn parse(&self, path: &Path) -> Result<RawTable> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(path),
            "xlsx" | "xls" => ExcelParser.parse(path),
            _ => Err(StockError::UnsupportedFormat(ext)),
        }
    }
}

/// 讀取上傳檔案
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let table = UniversalParser.parse(path)?;

    tracing::info!(
        "已讀取 {}：{} 列，欄位 {:?}",
        path.display(),
        table.len(),
        table.headers
    );

    Ok(table)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(StockError::FileNotFound(path.display().to_string()))
    }
}

fn header_table(headers: Vec<String>) -> Result<RawTable> {
    if headers.iter().all(|h| h.is_empty()) {
        return Err(StockError::EmptyTable);
    }
    Ok(RawTable::new(headers))
}

// 跳過完全空白的行
fn push_non_blank(table: &mut RawTable, cells: Vec<String>) {
    if cells.iter().all(|v| v.is_empty()) {
        return;
    }
    table.push_row(cells);
}
