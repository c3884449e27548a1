//! 摘要資料組裝

use rust_decimal::Decimal;
use serde::Serialize;
use stock_calc::Aggregation;

use crate::SummaryUnavailable;

/// 摘要關鍵指標
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadKpis {
    #[serde(with = "rust_decimal::serde::float")]
    pub dead_stock_value: Decimal,
    pub risk_count: usize,
    pub dead_stock_count: usize,
}

/// 優先採購項目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadOrder {
    pub article: String,
    pub category: String,
    pub recommended_order: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub forecast: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_stock: Option<Decimal>,
}

/// 缺貨預警
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadRiskAlert {
    pub article: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub forecast: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_stock: Option<Decimal>,
}

/// 呆滯庫存
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadDeadStock {
    pub article: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_stock: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub dead_stock_value: Decimal,
}

/// 送往摘要服務的精簡資料
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryPayload {
    pub month: Option<u32>,
    pub kpis: PayloadKpis,
    pub top_orders: Vec<PayloadOrder>,
    pub risk_alerts: Vec<PayloadRiskAlert>,
    pub dead_stock_items: Vec<PayloadDeadStock>,
}

impl SummaryPayload {
    /// 從彙總結果組裝
    pub fn from_aggregation(aggregation: &Aggregation) -> Self {
        let kpis = &aggregation.kpis;

        Self {
            month: kpis.month,
            kpis: PayloadKpis {
                dead_stock_value: kpis.dead_stock_value_display(),
                risk_count: kpis.risk_count,
                dead_stock_count: kpis.dead_stock_count,
            },
            top_orders: aggregation
                .top_orders
                .iter()
                .map(|o| PayloadOrder {
                    article: o.article.clone(),
                    category: o.category.clone(),
                    recommended_order: o.recommended_order,
                    forecast: o.forecast,
                    current_stock: o.current_stock,
                })
                .collect(),
            risk_alerts: aggregation
                .risk_alerts
                .iter()
                .map(|a| PayloadRiskAlert {
                    article: a.article.clone(),
                    category: a.category.clone(),
                    forecast: a.forecast,
                    current_stock: a.current_stock,
                })
                .collect(),
            dead_stock_items: aggregation
                .dead_stock_items
                .iter()
                .map(|d| PayloadDeadStock {
                    article: d.article.clone(),
                    category: d.category.clone(),
                    current_stock: d.current_stock,
                    dead_stock_value: d.dead_stock_value,
                })
                .collect(),
        }
    }

    /// 序列化為單行 JSON
    pub fn to_json(&self) -> Result<String, SummaryUnavailable> {
        serde_json::to_string(self).map_err(|e| SummaryUnavailable::Serialization(e.to_string()))
    }
}
