//! 欄位驗證與數值轉換

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;

use stock_core::table::{
    COL_ARTICLE, COL_CATEGORY, COL_CURRENT_STOCK, COL_MIN_STOCK, COL_MONTH, COL_PURCHASE_PRICE,
    COL_SALES,
};
use stock_core::{InventoryRecord, RawTable, StockError, REQUIRED_COLUMNS};

/// 單一儲存格轉換結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced<T> {
    /// 轉換成功
    Value(T),
    /// 空白儲存格
    Empty,
    /// 無法轉換
    Invalid,
}

impl<T> Coerced<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Coerced::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// 無法轉換的儲存格
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionIssue {
    /// 列序（0 起算，不含表頭）
    pub row: usize,
    /// 欄位名稱
    pub column: String,
    /// 原始內容
    pub value: String,
}

/// 數值轉換警告（不中止計算）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionWarning {
    /// 受影響列數
    pub affected_rows: usize,
    /// 明細
    pub issues: Vec<CoercionIssue>,
}

impl CoercionWarning {
    fn from_issues(issues: Vec<CoercionIssue>) -> Option<Self> {
        if issues.is_empty() {
            return None;
        }
        let affected_rows = issues.iter().map(|i| i.row).collect::<BTreeSet<_>>().len();
        Some(Self {
            affected_rows,
            issues,
        })
    }
}

/// 驗證後的表格
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTable {
    pub records: Vec<InventoryRecord>,
    pub warning: Option<CoercionWarning>,
}

/// 欄位位置（驗證後每個必要欄位都有索引）
struct ColumnLayout {
    article: usize,
    category: usize,
    current_stock: usize,
    min_stock: usize,
    sales: [usize; 3],
    month: usize,
    purchase_price: usize,
    extra: Vec<usize>,
}

impl ColumnLayout {
    fn resolve(table: &RawTable) -> stock_core::Result<Self> {
        let missing = table.missing_columns();
        if !missing.is_empty() {
            return Err(StockError::Schema { missing });
        }

        let index = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| StockError::Schema {
                    missing: vec![name.to_string()],
                })
        };

        let extra = table
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !REQUIRED_COLUMNS.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect();

        Ok(Self {
            article: index(COL_ARTICLE)?,
            category: index(COL_CATEGORY)?,
            current_stock: index(COL_CURRENT_STOCK)?,
            min_stock: index(COL_MIN_STOCK)?,
            sales: [index(COL_SALES[0])?, index(COL_SALES[1])?, index(COL_SALES[2])?],
            month: index(COL_MONTH)?,
            purchase_price: index(COL_PURCHASE_PRICE)?,
            extra,
        })
    }
}

/// 列驗證器
pub struct RowValidator;

impl RowValidator {
    /// 驗證表格並轉換數值欄位
    ///
    /// 缺少任一必要欄位時回傳 `StockError::Schema`，不處理任何列。
    /// 無法轉換的數值變為缺值並記入警告。
    pub fn validate(table: &RawTable) -> stock_core::Result<ValidatedTable> {
        let layout = ColumnLayout::resolve(table)?;

        let mut records = Vec::with_capacity(table.len());
        let mut issues = Vec::new();

        for (row_index, row) in table.rows.iter().enumerate() {
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

            let mut number = |idx: usize| -> Option<Decimal> {
                let raw = cell(idx);
                match Self::parse_decimal(raw) {
                    Coerced::Value(v) => Some(v),
                    Coerced::Empty => None,
                    Coerced::Invalid => {
                        issues.push(CoercionIssue {
                            row: row_index,
                            column: table.headers[idx].clone(),
                            value: raw.to_string(),
                        });
                        None
                    }
                }
            };

            let current_stock = number(layout.current_stock);
            let min_stock = number(layout.min_stock);
            let sales = [
                number(layout.sales[0]),
                number(layout.sales[1]),
                number(layout.sales[2]),
            ];
            let purchase_price = number(layout.purchase_price);

            let month_raw = cell(layout.month);
            let month = match Self::parse_month(month_raw) {
                Coerced::Value(m) => Some(m),
                Coerced::Empty => None,
                Coerced::Invalid => {
                    issues.push(CoercionIssue {
                        row: row_index,
                        column: COL_MONTH.to_string(),
                        value: month_raw.to_string(),
                    });
                    None
                }
            };

            let mut record = InventoryRecord::new(
                row_index,
                cell(layout.article).to_string(),
                cell(layout.category).to_string(),
            )
            .with_sales(sales);
            record.current_stock = current_stock;
            record.min_stock = min_stock;
            record.month = month;
            record.purchase_price = purchase_price;
            record.extra = layout
                .extra
                .iter()
                .map(|&i| (table.headers[i].clone(), cell(i).to_string()))
                .collect();

            records.push(record);
        }

        let warning = CoercionWarning::from_issues(issues);
        if let Some(w) = &warning {
            tracing::warn!(
                "數值轉換失敗：{} 列受影響，共 {} 個儲存格",
                w.affected_rows,
                w.issues.len()
            );
        }

        tracing::debug!("驗證完成：{} 列", records.len());

        Ok(ValidatedTable { records, warning })
    }

    /// 轉換數值儲存格
    ///
    /// 接受一般小數、科學記號，以及單一逗號作為小數點（`10,5`）。
    pub fn parse_decimal(raw: &str) -> Coerced<Decimal> {
        let s = raw.trim();
        if s.is_empty() {
            return Coerced::Empty;
        }

        if let Ok(v) = Decimal::from_str(s) {
            return Coerced::Value(v);
        }

        if s.contains(['e', 'E']) {
            if let Ok(v) = Decimal::from_scientific(s) {
                return Coerced::Value(v);
            }
        }

        if s.matches(',').count() == 1 && !s.contains('.') {
            if let Ok(v) = Decimal::from_str(&s.replace(',', ".")) {
                return Coerced::Value(v);
            }
        }

        Coerced::Invalid
    }

    /// 轉換月份：必須是 1-12 的整數（`6.0` 亦可）
    pub fn parse_month(raw: &str) -> Coerced<u32> {
        match Self::parse_decimal(raw) {
            Coerced::Value(v) if v.fract().is_zero() => match v.to_u32() {
                Some(m) if (1..=12).contains(&m) => Coerced::Value(m),
                _ => Coerced::Invalid,
            },
            Coerced::Value(_) | Coerced::Invalid => Coerced::Invalid,
            Coerced::Empty => Coerced::Empty,
        }
    }
}
