//! 衍生指標模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 缺貨風險等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// 高風險（現有庫存低於預測消耗的一定比例）
    #[serde(rename = "ALTO")]
    High,
    /// 正常
    #[serde(rename = "OK")]
    Ok,
}

impl RiskLevel {
    /// 報表顯示標籤
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "ALTO",
            RiskLevel::Ok => "OK",
        }
    }

    pub fn is_high(&self) -> bool {
        *self == RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 呆滯庫存標記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadStock {
    /// 三個月內零銷售
    #[serde(rename = "SI")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

impl DeadStock {
    /// 報表顯示標籤
    pub fn label(&self) -> &'static str {
        match self {
            DeadStock::Yes => "SI",
            DeadStock::No => "NO",
        }
    }

    pub fn is_dead(&self) -> bool {
        *self == DeadStock::Yes
    }
}

impl fmt::Display for DeadStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 每筆記錄的衍生指標
///
/// 每個欄位只由一個計算階段寫入：
/// - 預測階段：`average_sales`, `seasonal_factor`, `forecast`
/// - 補貨階段：`recommended_order`
/// - 風險階段：`stockout_risk`, `dead_stock`, `dead_stock_value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// 三個月平均銷量
    pub average_sales: Decimal,

    /// 季節係數
    pub seasonal_factor: Decimal,

    /// 預測消耗（整數）
    pub forecast: Decimal,

    /// 建議訂購量（不小於 0）
    pub recommended_order: i64,

    /// 缺貨風險
    pub stockout_risk: RiskLevel,

    /// 呆滯庫存
    pub dead_stock: DeadStock,

    /// 呆滯庫存金額（非呆滯時為 0）
    pub dead_stock_value: Decimal,
}
