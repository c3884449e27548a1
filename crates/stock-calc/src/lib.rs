//! # Stock Calculation Engine
//!
//! 庫存分析計算引擎：驗證 → 預測 → 補貨 → 風險分類 → 彙總

pub mod aggregator;
pub mod calculator;
pub mod forecast;
pub mod reorder;
pub mod risk;
pub mod validator;

// Re-export 主要類型
pub use aggregator::{Aggregation, Aggregator, DeadStockItem, Kpis, RiskAlert, TopOrder};
pub use calculator::StockAnalyzer;
pub use forecast::{Forecast, ForecastCalculator};
pub use reorder::ReorderCalculator;
pub use risk::{RiskAssessment, RiskClassifier};
pub use validator::{CoercionIssue, CoercionWarning, RowValidator, ValidatedTable};

use serde::Serialize;
use stock_core::{DerivedMetrics, InventoryRecord};

/// 分類後的一列：原始記錄 + 衍生指標
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRow {
    pub record: InventoryRecord,
    pub metrics: DerivedMetrics,
}

/// 庫存分析結果
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// 完整分類表（依原始列序）
    pub rows: Vec<ClassifiedRow>,

    /// 彙總（風險、呆滯、優先採購、KPI）
    pub aggregation: Aggregation,

    /// 數值轉換警告
    pub coercion_warning: Option<CoercionWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl AnalysisResult {
    /// 是否有數值轉換失敗
    pub fn has_coercion_warning(&self) -> bool {
        self.coercion_warning.is_some()
    }
}
