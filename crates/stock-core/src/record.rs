//! 庫存記錄模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 驗證後的庫存記錄（每列一筆，驗證後不再修改）
///
/// 數值欄位為 `None` 表示缺值（空白或無法轉換）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// 原始列序（0 起算，不含表頭）
    pub row_index: usize,

    /// 物料編號
    pub article: String,

    /// 分類
    pub category: String,

    /// 現有庫存
    pub current_stock: Option<Decimal>,

    /// 最低庫存
    pub min_stock: Option<Decimal>,

    /// 前三個月銷量
    pub sales: [Option<Decimal>; 3],

    /// 參考月份（1-12）
    pub month: Option<u32>,

    /// 採購單價
    pub purchase_price: Option<Decimal>,

    /// 其他欄位（依表頭順序原樣保留）
    pub extra: Vec<(String, String)>,
}

impl InventoryRecord {
    /// 創建新的庫存記錄，數值欄位預設缺值
    pub fn new(row_index: usize, article: String, category: String) -> Self {
        Self {
            row_index,
            article,
            category,
            current_stock: None,
            min_stock: None,
            sales: [None; 3],
            month: None,
            purchase_price: None,
            extra: Vec::new(),
        }
    }

    /// 建構器模式：設置現有庫存
    pub fn with_current_stock(mut self, qty: Decimal) -> Self {
        self.current_stock = Some(qty);
        self
    }

    /// 建構器模式：設置最低庫存
    pub fn with_min_stock(mut self, qty: Decimal) -> Self {
        self.min_stock = Some(qty);
        self
    }

    /// 建構器模式：設置三個月銷量
    pub fn with_sales(mut self, sales: [Option<Decimal>; 3]) -> Self {
        self.sales = sales;
        self
    }

    /// 建構器模式：設置參考月份
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// 建構器模式：設置採購單價
    pub fn with_purchase_price(mut self, price: Decimal) -> Self {
        self.purchase_price = Some(price);
        self
    }

    /// 建構器模式：附加其他欄位
    pub fn with_extra(mut self, column: String, value: String) -> Self {
        self.extra.push((column, value));
        self
    }

    /// 現有庫存，缺值視為 0
    pub fn current_stock_or_zero(&self) -> Decimal {
        self.current_stock.unwrap_or(Decimal::ZERO)
    }

    /// 最低庫存，缺值視為 0
    pub fn min_stock_or_zero(&self) -> Decimal {
        self.min_stock.unwrap_or(Decimal::ZERO)
    }

    /// 採購單價，缺值視為 0
    pub fn purchase_price_or_zero(&self) -> Decimal {
        self.purchase_price.unwrap_or(Decimal::ZERO)
    }

    /// 三個月銷量合計，缺值視為 0
    pub fn sales_total(&self) -> Decimal {
        self.present_sales()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
    }

    /// 有值的銷量
    pub fn present_sales(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.sales.iter().flatten().copied()
    }
}
