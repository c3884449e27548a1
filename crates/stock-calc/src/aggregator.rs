//! 結果彙總

use rust_decimal::Decimal;
use serde::Serialize;

use crate::ClassifiedRow;

/// 缺貨預警
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAlert {
    pub article: String,
    pub category: String,
    pub current_stock: Option<Decimal>,
    pub forecast: Decimal,
}

/// 呆滯庫存明細
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadStockItem {
    pub article: String,
    pub category: String,
    pub current_stock: Option<Decimal>,
    pub dead_stock_value: Decimal,
}

/// 優先採購項目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopOrder {
    pub article: String,
    pub category: String,
    pub recommended_order: i64,
    pub forecast: Decimal,
    pub current_stock: Option<Decimal>,
}

/// 關鍵指標
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    /// 呆滯庫存總金額
    pub dead_stock_value: Decimal,
    /// 高風險物料數
    pub risk_count: usize,
    /// 呆滯物料數
    pub dead_stock_count: usize,
    /// 參考月份（第一個有月份的列）
    pub month: Option<u32>,
}

impl Kpis {
    /// 顯示用金額（兩位小數）
    pub fn dead_stock_value_display(&self) -> Decimal {
        self.dead_stock_value.round_dp(2)
    }
}

/// 彙總結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub risk_alerts: Vec<RiskAlert>,
    pub dead_stock_items: Vec<DeadStockItem>,
    pub top_orders: Vec<TopOrder>,
    pub kpis: Kpis,
}

/// 彙總器
pub struct Aggregator {
    /// 優先採購清單筆數上限
    top_orders_limit: usize,
}

impl Aggregator {
    pub fn new(top_orders_limit: usize) -> Self {
        Self { top_orders_limit }
    }

    /// 彙總分類表
    pub fn aggregate(&self, rows: &[ClassifiedRow]) -> Aggregation {
        let risk_alerts: Vec<RiskAlert> = rows
            .iter()
            .filter(|r| r.metrics.stockout_risk.is_high())
            .map(|r| RiskAlert {
                article: r.record.article.clone(),
                category: r.record.category.clone(),
                current_stock: r.record.current_stock,
                forecast: r.metrics.forecast,
            })
            .collect();

        let dead_stock_items: Vec<DeadStockItem> = rows
            .iter()
            .filter(|r| r.metrics.dead_stock.is_dead())
            .map(|r| DeadStockItem {
                article: r.record.article.clone(),
                category: r.record.category.clone(),
                current_stock: r.record.current_stock,
                dead_stock_value: r.metrics.dead_stock_value,
            })
            .collect();

        let kpis = Kpis {
            dead_stock_value: rows
                .iter()
                .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.metrics.dead_stock_value)),
            risk_count: risk_alerts.len(),
            dead_stock_count: dead_stock_items.len(),
            month: rows.iter().find_map(|r| r.record.month),
        };

        Aggregation {
            top_orders: self.top_orders(rows),
            risk_alerts,
            dead_stock_items,
            kpis,
        }
    }

    /// 依建議訂購量遞減取前 N 筆，同量保持原始列序
    pub fn top_orders(&self, rows: &[ClassifiedRow]) -> Vec<TopOrder> {
        let mut sorted: Vec<&ClassifiedRow> = rows.iter().collect();
        // sort_by 為穩定排序
        sorted.sort_by(|a, b| b.metrics.recommended_order.cmp(&a.metrics.recommended_order));
        sorted.truncate(self.top_orders_limit);

        sorted
            .into_iter()
            .map(|r| TopOrder {
                article: r.record.article.clone(),
                category: r.record.category.clone(),
                recommended_order: r.metrics.recommended_order,
                forecast: r.metrics.forecast,
                current_stock: r.record.current_stock,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_core::{DeadStock, DerivedMetrics, InventoryRecord, RiskLevel};

    fn row(index: usize, order: i64, risk: RiskLevel, dead_value: Option<i64>) -> ClassifiedRow {
        let mut record = InventoryRecord::new(index, format!("ART-{index}"), "oil".to_string())
            .with_current_stock(Decimal::from(1));
        if index > 0 {
            record.month = Some(4);
        }
        ClassifiedRow {
            record,
            metrics: DerivedMetrics {
                average_sales: Decimal::ZERO,
                seasonal_factor: Decimal::ONE,
                forecast: Decimal::from(order),
                recommended_order: order,
                stockout_risk: risk,
                dead_stock: if dead_value.is_some() { DeadStock::Yes } else { DeadStock::No },
                dead_stock_value: dead_value.map(Decimal::from).unwrap_or(Decimal::ZERO),
            },
        }
    }

    #[test]
    fn test_top_orders_descending_and_stable() {
        let rows = vec![
            row(0, 5, RiskLevel::Ok, None),
            row(1, 9, RiskLevel::Ok, None),
            row(2, 5, RiskLevel::Ok, None),
            row(3, 12, RiskLevel::Ok, None),
        ];

        let articles: Vec<_> = Aggregator::new(10)
            .top_orders(&rows)
            .into_iter()
            .map(|o| o.article)
            .collect();

        assert_eq!(articles, vec!["ART-3", "ART-1", "ART-0", "ART-2"]);
    }

    #[test]
    fn test_top_orders_truncated_to_limit() {
        let rows: Vec<_> = (0..15).map(|i| row(i, i as i64, RiskLevel::Ok, None)).collect();

        let top = Aggregator::new(10).top_orders(&rows);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].recommended_order, 14);
        assert_eq!(top[9].recommended_order, 5);
    }

    #[test]
    fn test_aggregate_kpis_and_subsets() {
        let rows = vec![
            row(0, 3, RiskLevel::High, None),
            row(1, 0, RiskLevel::Ok, Some(120)),
            row(2, 8, RiskLevel::High, None),
            row(3, 0, RiskLevel::Ok, Some(35)),
        ];

        let aggregation = Aggregator::new(10).aggregate(&rows);

        assert_eq!(aggregation.risk_alerts.len(), 2);
        assert_eq!(aggregation.risk_alerts[1].article, "ART-2");
        assert_eq!(aggregation.dead_stock_items.len(), 2);
        assert_eq!(aggregation.kpis.dead_stock_value, Decimal::from(155));
        assert_eq!(aggregation.kpis.risk_count, 2);
        assert_eq!(aggregation.kpis.dead_stock_count, 2);
        // 第一列沒有月份，取第二列
        assert_eq!(aggregation.kpis.month, Some(4));
    }

    #[test]
    fn test_empty_table() {
        let aggregation = Aggregator::new(10).aggregate(&[]);

        assert!(aggregation.top_orders.is_empty());
        assert_eq!(aggregation.kpis.dead_stock_value, Decimal::ZERO);
        assert_eq!(aggregation.kpis.month, None);
    }

    #[test]
    fn test_display_value_rounded_to_cents() {
        let kpis = Kpis {
            dead_stock_value: Decimal::new(1234567, 4),
            risk_count: 0,
            dead_stock_count: 1,
            month: None,
        };
        assert_eq!(kpis.dead_stock_value_display(), Decimal::new(12346, 2));
    }
}
