//! 建議訂購量

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use stock_core::InventoryRecord;

/// 補貨計算器
pub struct ReorderCalculator;

impl ReorderCalculator {
    /// 建議訂購量 = max(0, floor(預測消耗 + 最低庫存 - 現有庫存))
    ///
    /// 缺值視為 0。
    pub fn recommended_order(record: &InventoryRecord, forecast: Decimal) -> i64 {
        let raw_order = forecast
            .saturating_add(record.min_stock_or_zero())
            .saturating_sub(record.current_stock_or_zero());

        Self::clamp_order(raw_order)
    }

    /// 向下取整並限制為非負整數
    pub fn clamp_order(raw_order: Decimal) -> i64 {
        if raw_order <= Decimal::ZERO {
            return 0;
        }
        raw_order.floor().to_i64().unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(current: Option<i64>, min: Option<i64>) -> InventoryRecord {
        let mut record = InventoryRecord::new(0, "ART".to_string(), "oil".to_string());
        record.current_stock = current.map(Decimal::from);
        record.min_stock = min.map(Decimal::from);
        record
    }

    #[test]
    fn test_recommended_order() {
        // 14 + 5 - 2 = 17
        let order = ReorderCalculator::recommended_order(&record(Some(2), Some(5)), Decimal::from(14));
        assert_eq!(order, 17);
    }

    #[test]
    fn test_overstock_never_negative() {
        let order = ReorderCalculator::recommended_order(&record(Some(100), Some(5)), Decimal::from(3));
        assert_eq!(order, 0);
    }

    #[test]
    fn test_missing_inputs_are_zero() {
        assert_eq!(ReorderCalculator::recommended_order(&record(None, None), Decimal::from(7)), 7);
        assert_eq!(ReorderCalculator::recommended_order(&record(None, Some(2)), Decimal::ZERO), 2);
    }

    #[rstest]
    #[case(Decimal::new(175, 1), 17)]
    #[case(Decimal::new(1799, 2), 17)]
    #[case(Decimal::new(-5, 1), 0)]
    #[case(Decimal::ZERO, 0)]
    #[case(Decimal::new(3, 1), 0)]
    fn test_clamp_order(#[case] raw: Decimal, #[case] expected: i64) {
        assert_eq!(ReorderCalculator::clamp_order(raw), expected);
    }
}
