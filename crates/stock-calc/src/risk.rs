//! 缺貨風險與呆滯庫存分類

use rust_decimal::Decimal;
use stock_core::{DeadStock, InventoryRecord, RiskLevel};

/// 風險分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub stockout_risk: RiskLevel,
    pub dead_stock: DeadStock,
    pub dead_stock_value: Decimal,
}

/// 風險分類器
pub struct RiskClassifier {
    /// 缺貨風險比例
    stockout_ratio: Decimal,
}

impl RiskClassifier {
    pub fn new(stockout_ratio: Decimal) -> Self {
        Self { stockout_ratio }
    }

    /// 分類單筆記錄
    pub fn classify(&self, record: &InventoryRecord, forecast: Decimal) -> RiskAssessment {
        let stockout_risk = self.stockout_risk(record.current_stock_or_zero(), forecast);
        let dead_stock = Self::dead_stock(record);
        let dead_stock_value = match dead_stock {
            DeadStock::Yes => record
                .current_stock_or_zero()
                .saturating_mul(record.purchase_price_or_zero()),
            DeadStock::No => Decimal::ZERO,
        };

        RiskAssessment {
            stockout_risk,
            dead_stock,
            dead_stock_value,
        }
    }

    /// 現有庫存 < 預測消耗 × 比例（嚴格小於）為高風險
    pub fn stockout_risk(&self, current_stock: Decimal, forecast: Decimal) -> RiskLevel {
        if current_stock < forecast.saturating_mul(self.stockout_ratio) {
            RiskLevel::High
        } else {
            RiskLevel::Ok
        }
    }

    /// 三個月銷量合計為 0（缺值視為 0）即為呆滯
    ///
    /// 三個月全部缺值的列同樣視為呆滯。
    pub fn dead_stock(record: &InventoryRecord) -> DeadStock {
        if record.sales_total().is_zero() {
            DeadStock::Yes
        } else {
            DeadStock::No
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn classifier() -> RiskClassifier {
        RiskClassifier::new(Decimal::new(3, 1))
    }

    fn record(current: i64, sales: [Option<i64>; 3], price: i64) -> InventoryRecord {
        InventoryRecord::new(0, "ART".to_string(), "oil".to_string())
            .with_current_stock(Decimal::from(current))
            .with_sales(sales.map(|s| s.map(Decimal::from)))
            .with_purchase_price(Decimal::from(price))
    }

    #[rstest]
    // 2 < 14 × 0.3 = 4.2
    #[case(2, 14, RiskLevel::High)]
    // 3 < 10 × 0.3 = 3 不成立（嚴格小於）
    #[case(3, 10, RiskLevel::Ok)]
    #[case(2, 10, RiskLevel::High)]
    #[case(0, 0, RiskLevel::Ok)]
    fn test_stockout_risk(#[case] current: i64, #[case] forecast: i64, #[case] expected: RiskLevel) {
        assert_eq!(
            classifier().stockout_risk(Decimal::from(current), Decimal::from(forecast)),
            expected
        );
    }

    #[test]
    fn test_active_item_is_not_dead_stock() {
        let assessment = classifier().classify(
            &record(2, [Some(10), Some(12), Some(11)], 20),
            Decimal::from(14),
        );

        assert_eq!(assessment.stockout_risk, RiskLevel::High);
        assert_eq!(assessment.dead_stock, DeadStock::No);
        assert_eq!(assessment.dead_stock_value, Decimal::ZERO);
    }

    #[test]
    fn test_zero_sales_is_dead_stock_valued_at_cost() {
        let assessment =
            classifier().classify(&record(7, [Some(0), Some(0), Some(0)], 15), Decimal::ZERO);

        assert_eq!(assessment.dead_stock, DeadStock::Yes);
        assert_eq!(assessment.dead_stock_value, Decimal::from(105));
        assert_eq!(assessment.stockout_risk, RiskLevel::Ok);
    }

    #[test]
    fn test_all_missing_sales_counts_as_dead_stock() {
        // 「無資料」與「零銷售」目前無法區分，兩者皆視為呆滯
        let assessment = classifier().classify(&record(4, [None, None, None], 10), Decimal::ZERO);

        assert_eq!(assessment.dead_stock, DeadStock::Yes);
        assert_eq!(assessment.dead_stock_value, Decimal::from(40));
    }

    #[test]
    fn test_dead_stock_value_with_missing_price_is_zero() {
        let mut r = record(9, [Some(0), None, Some(0)], 0);
        r.purchase_price = None;

        let assessment = classifier().classify(&r, Decimal::ZERO);
        assert_eq!(assessment.dead_stock, DeadStock::Yes);
        assert_eq!(assessment.dead_stock_value, Decimal::ZERO);
    }

    #[test]
    fn test_sales_that_cancel_out_are_dead_stock() {
        // 合計恰為 0（含退貨沖銷）
        let assessment = classifier().classify(&record(1, [Some(3), Some(-3), Some(0)], 5), Decimal::ZERO);
        assert_eq!(assessment.dead_stock, DeadStock::Yes);
    }
}
