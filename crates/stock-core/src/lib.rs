//! # Stock Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod metrics;
pub mod record;
pub mod seasonal;
pub mod table;

// Re-export 主要類型
pub use config::AnalysisConfig;
pub use metrics::{DeadStock, DerivedMetrics, RiskLevel};
pub use record::InventoryRecord;
pub use seasonal::{seasonal_factor, SeasonalRule, SEASONAL_RULES};
pub use table::{RawTable, REQUIRED_COLUMNS};

/// 庫存分析錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("表格缺少必要欄位: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("檔案不存在: {0}")]
    FileNotFound(String),

    #[error("檔案格式不支援: {0}（僅支援 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("檔案讀取失敗: {0}")]
    FileRead(String),

    #[error("Excel 解析失敗: {0}")]
    ExcelParse(String),

    #[error("CSV 解析失敗: {0}")]
    CsvParse(String),

    #[error("表格沒有表頭")]
    EmptyTable,

    #[error("配置格式錯誤: {0}")]
    InvalidConfig(String),
}

impl StockError {
    /// 是否為欄位結構錯誤（整批中止，不產生任何結果）
    pub fn is_schema_error(&self) -> bool {
        matches!(self, StockError::Schema { .. })
    }
}

impl From<std::io::Error> for StockError {
    fn from(err: std::io::Error) -> Self {
        StockError::FileRead(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StockError>;
