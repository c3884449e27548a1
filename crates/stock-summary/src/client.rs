//! 摘要服務客戶端

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SummaryConfig;
use crate::error::{FailureKind, SummaryUnavailable};

/// 文字摘要能力
///
/// 單次呼叫，失敗即回傳，不自動重試。
pub trait Summarizer {
    fn summarize(&self, system: &str, prompt: &str) -> Result<String, SummaryUnavailable>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI 相容的 chat completions 客戶端（同步）
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl ChatCompletionsClient {
    /// 依配置建立客戶端，未設定憑證時回傳 `MissingCredential`
    pub fn new(config: &SummaryConfig) -> Result<Self, SummaryUnavailable> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(SummaryUnavailable::MissingCredential)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
        })
    }

    /// 從回應內容取出文字
    fn extract_content(body: &str) -> Result<String, SummaryUnavailable> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| SummaryUnavailable::request(FailureKind::InvalidResponse, e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                SummaryUnavailable::request(FailureKind::InvalidResponse, "回應中沒有文字內容")
            })
    }
}

impl Summarizer for ChatCompletionsClient {
    fn summarize(&self, system: &str, prompt: &str) -> Result<String, SummaryUnavailable> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        tracing::debug!("呼叫摘要服務: {} (model={})", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(SummaryUnavailable::request(
                FailureKind::from_status(status.as_u16()),
                format!("HTTP {}: {}", status.as_u16(), body.chars().take(300).collect::<String>()),
            ));
        }

        Self::extract_content(&body)
    }
}
