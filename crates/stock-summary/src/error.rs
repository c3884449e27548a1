//! 摘要服務錯誤類型

use std::fmt;

/// 呼叫失敗的類別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 連線失敗
    Network,
    /// 逾時
    Timeout,
    /// 認證失敗（401/403）
    Auth,
    /// 配額或速率限制（429）
    Quota,
    /// 其他 HTTP 錯誤
    Http,
    /// 回應格式不符
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Network => "network",
            FailureKind::Timeout => "timeout",
            FailureKind::Auth => "auth",
            FailureKind::Quota => "quota",
            FailureKind::Http => "http",
            FailureKind::InvalidResponse => "invalid_response",
        };
        f.write_str(name)
    }
}

/// 摘要無法產生
///
/// 只影響摘要功能本身，分析表格不受影響。
#[derive(Debug, thiserror::Error)]
pub enum SummaryUnavailable {
    #[error("未設定摘要服務憑證")]
    MissingCredential,

    #[error("摘要服務呼叫失敗 [{kind}]: {message}")]
    Request { kind: FailureKind, message: String },

    #[error("摘要資料序列化失敗: {0}")]
    Serialization(String),
}

impl SummaryUnavailable {
    pub fn request(kind: FailureKind, message: impl Into<String>) -> Self {
        SummaryUnavailable::Request {
            kind,
            message: message.into(),
        }
    }

    /// 失敗類別（未設定憑證與序列化錯誤時為 `None`）
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            SummaryUnavailable::Request { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SummaryUnavailable {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_decode() {
            FailureKind::InvalidResponse
        } else if let Some(status) = err.status() {
            FailureKind::from_status(status.as_u16())
        } else {
            FailureKind::Network
        };
        SummaryUnavailable::request(kind, err.to_string())
    }
}

impl FailureKind {
    /// HTTP 狀態碼對應的失敗類別
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => FailureKind::Auth,
            429 => FailureKind::Quota,
            _ => FailureKind::Http,
        }
    }
}
