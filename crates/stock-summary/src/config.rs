//! 摘要服務配置

use std::fmt;

/// 預設端點（OpenAI 相容）
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
/// 預設模型
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_ENDPOINT: &str = "TALLER_LLM_ENDPOINT";
const ENV_MODEL: &str = "TALLER_LLM_MODEL";
const ENV_TIMEOUT: &str = "TALLER_LLM_TIMEOUT_SECS";

/// 摘要服務配置
#[derive(Clone, PartialEq)]
pub struct SummaryConfig {
    /// chat completions 端點
    pub endpoint: String,

    /// 模型名稱
    pub model: String,

    /// 取樣溫度
    pub temperature: f32,

    /// 請求逾時（秒）
    pub timeout_secs: u64,

    /// API 金鑰（未設定時不呼叫服務）
    pub api_key: Option<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            timeout_secs: 60,
            api_key: None,
        }
    }
}

impl SummaryConfig {
    /// 從環境變數讀取
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 從任意鍵值來源讀取，空字串視為未設定
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = get(ENV_API_KEY);
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(model) = get(ENV_MODEL) {
            config.model = model;
        }
        if let Some(raw) = get(ENV_TIMEOUT) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => tracing::warn!("{} 格式錯誤: {}，使用預設 {} 秒", ENV_TIMEOUT, raw, config.timeout_secs),
            }
        }

        config
    }

    /// 建構器模式：設置 API 金鑰
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// 建構器模式：設置端點
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// 建構器模式：設置模型
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// 建構器模式：設置逾時
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// 是否已設定憑證
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

// 金鑰不輸出到日誌
impl fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}
