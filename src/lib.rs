//! # Taller Compras
//!
//! 工作坊庫存分析：採購建議、缺貨預警、呆滯庫存估值與主管摘要

pub mod report;

pub use stock_calc;
pub use stock_core;
pub use stock_import;
pub use stock_summary;

use std::path::Path;

use stock_calc::{AnalysisResult, StockAnalyzer};
use stock_core::AnalysisConfig;

/// 讀取檔案並完成分析
pub fn analyze_file<P: AsRef<Path>>(
    path: P,
    config: AnalysisConfig,
) -> stock_core::Result<AnalysisResult> {
    let table = stock_import::load_table(path)?;
    StockAnalyzer::new(config).analyze(&table)
}
