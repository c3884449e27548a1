//! 需求預測

use rust_decimal::{Decimal, RoundingStrategy};
use stock_core::{seasonal_factor, InventoryRecord};

/// 預測結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forecast {
    /// 三個月平均銷量
    pub average_sales: Decimal,
    /// 季節係數
    pub seasonal_factor: Decimal,
    /// 預測消耗（四捨六入五成雙取整）
    pub forecast: Decimal,
}

/// 預測計算器
pub struct ForecastCalculator;

impl ForecastCalculator {
    /// 計算預測消耗
    pub fn calculate(record: &InventoryRecord) -> Forecast {
        let average_sales = Self::average_sales(record);
        let factor = seasonal_factor(&record.category, record.month);
        let forecast = Self::round_forecast(average_sales.saturating_mul(factor));

        Forecast {
            average_sales,
            seasonal_factor: factor,
            forecast,
        }
    }

    /// 三個月平均銷量
    ///
    /// 缺值不計入平均；三個月都缺值時為 0。
    pub fn average_sales(record: &InventoryRecord) -> Decimal {
        let (sum, count) = record
            .present_sales()
            .fold((Decimal::ZERO, 0u32), |(sum, count), v| {
                (sum.saturating_add(v), count + 1)
            });

        if count == 0 {
            Decimal::ZERO
        } else {
            sum / Decimal::from(count)
        }
    }

    /// 取整規則：銀行家捨入（2.5 → 2，3.5 → 4）
    pub fn round_forecast(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
    }
}
