//! 原始表格模型

use serde::{Deserialize, Serialize};

/// 物料編號
pub const COL_ARTICLE: &str = "articulo";
/// 分類
pub const COL_CATEGORY: &str = "categoria";
/// 現有庫存
pub const COL_CURRENT_STOCK: &str = "stock_actual";
/// 最低庫存
pub const COL_MIN_STOCK: &str = "stock_minimo";
/// 前三個月銷量
pub const COL_SALES: [&str; 3] = ["ventas_mes_1", "ventas_mes_2", "ventas_mes_3"];
/// 參考月份
pub const COL_MONTH: &str = "mes";
/// 採購單價
pub const COL_PURCHASE_PRICE: &str = "precio_compra";

/// 必要欄位（順序即錯誤訊息中的順序）
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_ARTICLE,
    COL_CATEGORY,
    COL_CURRENT_STOCK,
    COL_MIN_STOCK,
    COL_SALES[0],
    COL_SALES[1],
    COL_SALES[2],
    COL_MONTH,
    COL_PURCHASE_PRICE,
];

/// 上傳檔案解析後的原始表格
///
/// 所有儲存格保持字串，數值轉換由驗證器負責。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// 表頭（保留原始順序）
    pub headers: Vec<String>,

    /// 資料列，每列與表頭等長
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// 創建新的原始表格
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 建構器模式：加入一列
    ///
    /// 過短的列以空字串補齊，過長的部分捨棄。
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells.into_iter().map(Into::into).collect());
        self
    }

    /// 加入一列
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    /// 欄位索引
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 缺少的必要欄位
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|col| self.column_index(col).is_none())
            .map(|col| col.to_string())
            .collect()
    }

    /// 資料列數量
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
