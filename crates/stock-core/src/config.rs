//! 分析參數配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, StockError};

/// 庫存分析參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 缺貨風險比例：現有庫存 < 預測消耗 × 比例 時為高風險
    pub stockout_ratio: Decimal,

    /// 優先採購清單筆數上限
    pub top_orders_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stockout_ratio: Decimal::new(3, 1),
            top_orders_limit: 10,
        }
    }
}

impl AnalysisConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 讀取配置，未提供的欄位使用預設值
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| StockError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置缺貨風險比例
    pub fn with_stockout_ratio(mut self, ratio: Decimal) -> Self {
        self.stockout_ratio = ratio;
        self
    }

    /// 建構器模式：設置優先採購清單筆數
    pub fn with_top_orders_limit(mut self, limit: usize) -> Self {
        self.top_orders_limit = limit;
        self
    }

    /// 檢查參數範圍
    pub fn validate(&self) -> Result<()> {
        if self.stockout_ratio < Decimal::ZERO {
            return Err(StockError::InvalidConfig(format!(
                "stockout_ratio 不可為負數: {}",
                self.stockout_ratio
            )));
        }
        Ok(())
    }
}
