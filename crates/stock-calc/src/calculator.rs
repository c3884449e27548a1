//! 庫存分析主計算器

use stock_core::{AnalysisConfig, DerivedMetrics, InventoryRecord, RawTable};

use crate::aggregator::Aggregator;
use crate::forecast::ForecastCalculator;
use crate::reorder::ReorderCalculator;
use crate::risk::RiskClassifier;
use crate::validator::RowValidator;
use crate::{AnalysisResult, ClassifiedRow};

/// 庫存分析器
///
/// 不保存任何跨次執行的狀態，同一份表格重複分析結果相同。
pub struct StockAnalyzer {
    config: AnalysisConfig,
}

impl StockAnalyzer {
    /// 創建新的分析器
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// 主分析入口
    pub fn analyze(&self, table: &RawTable) -> stock_core::Result<AnalysisResult> {
        tracing::info!(
            "開始庫存分析：{} 列，{} 欄",
            table.len(),
            table.headers.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 欄位驗證與數值轉換
        tracing::debug!("Step 1: 欄位驗證");
        let validated = RowValidator::validate(table)?;

        // Step 2: 逐列預測、補貨、分類
        tracing::debug!("Step 2: 逐列計算");
        let rows = self.classify(&validated.records);

        // Step 3: 彙總
        tracing::debug!("Step 3: 彙總");
        let aggregation = Aggregator::new(self.config.top_orders_limit).aggregate(&rows);

        tracing::info!(
            "庫存分析完成，耗時 {:?}：高風險 {} 筆，呆滯 {} 筆，呆滯金額 {}",
            start_time.elapsed(),
            aggregation.kpis.risk_count,
            aggregation.kpis.dead_stock_count,
            aggregation.kpis.dead_stock_value_display()
        );

        Ok(AnalysisResult {
            rows,
            aggregation,
            coercion_warning: validated.warning,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        })
    }

    /// 計算所有記錄的衍生指標（保持原始列序）
    pub fn classify(&self, records: &[InventoryRecord]) -> Vec<ClassifiedRow> {
        let classifier = RiskClassifier::new(self.config.stockout_ratio);

        records
            .iter()
            .map(|record| ClassifiedRow {
                record: record.clone(),
                metrics: Self::derive(record, &classifier),
            })
            .collect()
    }

    /// 單筆記錄的衍生指標
    pub fn derive_metrics(&self, record: &InventoryRecord) -> DerivedMetrics {
        Self::derive(record, &RiskClassifier::new(self.config.stockout_ratio))
    }

    fn derive(record: &InventoryRecord, classifier: &RiskClassifier) -> DerivedMetrics {
        let forecast = ForecastCalculator::calculate(record);
        let recommended_order = ReorderCalculator::recommended_order(record, forecast.forecast);
        let assessment = classifier.classify(record, forecast.forecast);

        tracing::trace!(
            "物料 {}: 預測 {}，建議訂購 {}，風險 {}，呆滯 {}",
            record.article,
            forecast.forecast,
            recommended_order,
            assessment.stockout_risk,
            assessment.dead_stock
        );

        DerivedMetrics {
            average_sales: forecast.average_sales,
            seasonal_factor: forecast.seasonal_factor,
            forecast: forecast.forecast,
            recommended_order,
            stockout_risk: assessment.stockout_risk,
            dead_stock: assessment.dead_stock,
            dead_stock_value: assessment.dead_stock_value,
        }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

impl Default for StockAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use stock_core::{DeadStock, RiskLevel, StockError, REQUIRED_COLUMNS};

    fn headers() -> Vec<String> {
        REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_reference_row() {
        let table = RawTable::new(headers())
            .with_row(["AC-GAS", "a/c", "2", "5", "10", "12", "11", "6", "20"]);

        let result = StockAnalyzer::default().analyze(&table).unwrap();
        let metrics = &result.rows[0].metrics;

        assert_eq!(metrics.average_sales, Decimal::from(11));
        assert_eq!(metrics.seasonal_factor, Decimal::new(13, 1));
        assert_eq!(metrics.forecast, Decimal::from(14));
        assert_eq!(metrics.recommended_order, 17);
        assert_eq!(metrics.stockout_risk, RiskLevel::High);
        assert_eq!(metrics.dead_stock, DeadStock::No);
        assert_eq!(metrics.dead_stock_value, Decimal::ZERO);
        assert!(!result.has_coercion_warning());
    }

    #[test]
    fn test_schema_error_processes_nothing() {
        let mut cols = headers();
        cols.retain(|c| c != "precio_compra");
        let table = RawTable::new(cols).with_row(["X", "a/c", "1", "1", "1", "1", "1", "6"]);

        let err = StockAnalyzer::default().analyze(&table).unwrap_err();
        assert!(err.is_schema_error());
        assert!(matches!(err, StockError::Schema { .. }));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let table = RawTable::new(headers())
            .with_row(["A", "baterias", "1", "3", "4", "5", "6", "12", "80"])
            .with_row(["B", "itv", "10", "2", "0", "0", "0", "3", "7.5"])
            .with_row(["C", "oil", "x", "2", "1", "", "2", "", "3"]);

        let analyzer = StockAnalyzer::default();
        let first = analyzer.analyze(&table).unwrap();
        let second = analyzer.analyze(&table).unwrap();

        assert_eq!(first.rows, second.rows);
        assert_eq!(first.aggregation, second.aggregation);
        assert_eq!(first.coercion_warning, second.coercion_warning);
    }

    #[test]
    fn test_custom_ratio_changes_risk_only() {
        let record = InventoryRecord::new(0, "A".to_string(), "oil".to_string())
            .with_current_stock(Decimal::from(5))
            .with_sales([Some(Decimal::from(10)); 3]);

        let default_metrics = StockAnalyzer::default().derive_metrics(&record);
        let strict = StockAnalyzer::new(AnalysisConfig::new().with_stockout_ratio(Decimal::ONE))
            .derive_metrics(&record);

        assert_eq!(default_metrics.stockout_risk, RiskLevel::Ok);
        assert_eq!(strict.stockout_risk, RiskLevel::High);
        assert_eq!(default_metrics.recommended_order, strict.recommended_order);
    }

    fn arb_cell() -> impl Strategy<Value = Option<Decimal>> {
        prop_oneof![
            Just(None),
            (-1_000i64..10_000, 0u32..3).prop_map(|(m, s)| Some(Decimal::new(m, s))),
        ]
    }

    fn arb_record() -> impl Strategy<Value = InventoryRecord> {
        (
            prop_oneof![Just("a/c"), Just("baterias"), Just("itv"), Just("oil")],
            arb_cell(),
            arb_cell(),
            proptest::array::uniform3(arb_cell()),
            proptest::option::of(1u32..=12),
            arb_cell(),
        )
            .prop_map(|(category, current, min, sales, month, price)| {
                let mut record = InventoryRecord::new(0, "P".to_string(), category.to_string())
                    .with_sales(sales);
                record.current_stock = current;
                record.min_stock = min;
                record.month = month;
                record.purchase_price = price;
                record
            })
    }

    proptest! {
        #[test]
        fn prop_recommended_order_never_negative(record in arb_record()) {
            let metrics = StockAnalyzer::default().derive_metrics(&record);
            prop_assert!(metrics.recommended_order >= 0);
        }

        #[test]
        fn prop_risk_iff_strictly_below_threshold(record in arb_record()) {
            let metrics = StockAnalyzer::default().derive_metrics(&record);
            let below = record.current_stock_or_zero() < metrics.forecast * Decimal::new(3, 1);
            prop_assert_eq!(metrics.stockout_risk == RiskLevel::High, below);
        }

        #[test]
        fn prop_dead_stock_iff_zero_sales(record in arb_record()) {
            let metrics = StockAnalyzer::default().derive_metrics(&record);
            prop_assert_eq!(metrics.dead_stock == DeadStock::Yes, record.sales_total().is_zero());
            if metrics.dead_stock == DeadStock::No {
                prop_assert_eq!(metrics.dead_stock_value, Decimal::ZERO);
            }
        }

        #[test]
        fn prop_forecast_is_integral(record in arb_record()) {
            let metrics = StockAnalyzer::default().derive_metrics(&record);
            prop_assert!(metrics.forecast.fract().is_zero());
        }
    }
}
