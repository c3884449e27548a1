//! # Stock Summary
//!
//! 將彙總結果整理為精簡資料，交由外部文字生成服務產生主管摘要

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod prompt;

// Re-export 主要類型
pub use client::{ChatCompletionsClient, Summarizer};
pub use config::SummaryConfig;
pub use error::{FailureKind, SummaryUnavailable};
pub use payload::SummaryPayload;

/// 產生摘要（單次呼叫）
pub fn generate_summary(
    summarizer: &dyn Summarizer,
    payload: &SummaryPayload,
) -> Result<String, SummaryUnavailable> {
    let user_prompt = prompt::build_user_prompt(payload)?;

    tracing::info!(
        "產生摘要：優先採購 {} 筆，預警 {} 筆，呆滯 {} 筆",
        payload.top_orders.len(),
        payload.risk_alerts.len(),
        payload.dead_stock_items.len()
    );

    summarizer
        .summarize(prompt::SYSTEM_ROLE, &user_prompt)
        .map_err(|e| {
            tracing::warn!("摘要無法產生: {}", e);
            e
        })
}

/// 依配置產生摘要；未設定憑證時不發出任何請求
pub fn summarize_with_config(
    config: &SummaryConfig,
    payload: &SummaryPayload,
) -> Result<String, SummaryUnavailable> {
    if !config.has_credential() {
        tracing::warn!("未設定摘要服務憑證，略過摘要");
        return Err(SummaryUnavailable::MissingCredential);
    }

    let client = ChatCompletionsClient::new(config)?;
    generate_summary(&client, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::cell::{Cell, RefCell};

    /// 記錄呼叫內容的測試替身
    struct RecordingSummarizer {
        calls: Cell<usize>,
        last_prompt: RefCell<String>,
        reply: Result<String, FailureKind>,
    }

    impl RecordingSummarizer {
        fn new(reply: Result<String, FailureKind>) -> Self {
            Self {
                calls: Cell::new(0),
                last_prompt: RefCell::new(String::new()),
                reply,
            }
        }
    }

    impl Summarizer for RecordingSummarizer {
        fn summarize(&self, system: &str, prompt: &str) -> Result<String, SummaryUnavailable> {
            assert_eq!(system, prompt::SYSTEM_ROLE);
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = prompt.to_string();
            self.reply
                .clone()
                .map_err(|kind| SummaryUnavailable::request(kind, "stub"))
        }
    }

    fn sample_payload() -> SummaryPayload {
        SummaryPayload {
            month: Some(11),
            kpis: payload::PayloadKpis {
                dead_stock_value: Decimal::from(300),
                risk_count: 0,
                dead_stock_count: 2,
            },
            top_orders: Vec::new(),
            risk_alerts: Vec::new(),
            dead_stock_items: Vec::new(),
        }
    }

    #[test]
    fn test_summary_success() {
        let stub = RecordingSummarizer::new(Ok("Resumen".to_string()));

        let text = generate_summary(&stub, &sample_payload()).unwrap();

        assert_eq!(text, "Resumen");
        assert_eq!(stub.calls.get(), 1);
        assert!(stub.last_prompt.borrow().contains(r#""dead_stock_count":2"#));
    }

    #[test]
    fn test_failure_is_not_retried() {
        let stub = RecordingSummarizer::new(Err(FailureKind::Quota));

        let err = generate_summary(&stub, &sample_payload()).unwrap_err();

        assert_eq!(err.kind(), Some(FailureKind::Quota));
        assert_eq!(stub.calls.get(), 1);
    }

    #[test]
    fn test_missing_credential_short_circuits() {
        let err = summarize_with_config(&SummaryConfig::default(), &sample_payload()).unwrap_err();
        assert!(matches!(err, SummaryUnavailable::MissingCredential));
    }
}
