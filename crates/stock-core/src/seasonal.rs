//! 季節係數表

use rust_decimal::Decimal;

/// 季節規則：分類在指定月份套用的需求係數
#[derive(Debug, Clone, Copy)]
pub struct SeasonalRule {
    /// 分類（小寫）
    pub category: &'static str,

    /// 適用月份
    pub months: &'static [u32],

    /// 係數（mantissa, scale）
    factor: (i64, u32),
}

impl SeasonalRule {
    const fn new(category: &'static str, months: &'static [u32], factor: (i64, u32)) -> Self {
        Self {
            category,
            months,
            factor,
        }
    }

    /// 係數
    pub fn factor(&self) -> Decimal {
        Decimal::new(self.factor.0, self.factor.1)
    }

    /// 是否適用（分類不分大小寫）
    pub fn applies(&self, category: &str, month: u32) -> bool {
        category.to_lowercase() == self.category && self.months.contains(&month)
    }
}

/// 固定季節規則
pub const SEASONAL_RULES: [SeasonalRule; 3] = [
    // 空調：夏季
    SeasonalRule::new("a/c", &[5, 6, 7], (13, 1)),
    // 電瓶：冬季
    SeasonalRule::new("baterias", &[11, 12, 1, 2], (125, 2)),
    // 車檢季
    SeasonalRule::new("itv", &[3, 9], (12, 1)),
];

/// 查詢季節係數
///
/// 月份缺值時視為 0，不符合任何規則，回傳 1.0。
pub fn seasonal_factor(category: &str, month: Option<u32>) -> Decimal {
    let month = month.unwrap_or(0);
    SEASONAL_RULES
        .iter()
        .find(|rule| rule.applies(category, month))
        .map(SeasonalRule::factor)
        .unwrap_or(Decimal::ONE)
}
