use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorStatus {
    /// 网络层失败（连接、DNS、CORS 等）
    Transport,
    /// 超过客户端配置的请求超时
    Timeout,
    /// 信封 `code` 非 200
    Envelope,
    /// HTTP 状态码非 200 且响应体不是信封
    HttpStatus,
    /// 响应体无法解码为目标类型
    Decode,
    /// 客户端表单校验失败
    Validation,
    /// 本地存储读写失败
    Storage,
}

impl ApiErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorStatus::Transport => "TRANSPORT_ERROR",
            ApiErrorStatus::Timeout => "REQUEST_TIMEOUT",
            ApiErrorStatus::Envelope => "API_REJECTED",
            ApiErrorStatus::HttpStatus => "HTTP_STATUS",
            ApiErrorStatus::Decode => "DECODE_ERROR",
            ApiErrorStatus::Validation => "INVALID_INPUT",
            ApiErrorStatus::Storage => "STORAGE_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "product.list", "brand.detail"
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 远程调用错误
///
/// 对 `Envelope` 类错误，`code` 与 `message` 保留服务端原文，
/// 供表单类页面直接展示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: ApiErrorStatus,
    pub message: String,
    /// 服务端信封中的业务码（仅 `Envelope` / `HttpStatus`）
    pub code: Option<i64>,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(status: ApiErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Transport, message)
    }

    pub fn timeout(after_ms: u64) -> Self {
        Self::new(ApiErrorStatus::Timeout, format!("request timed out after {after_ms}ms"))
    }

    /// 信封拒绝；`message` 为空时保留为空串，由调用方决定兜底文案
    pub fn envelope(code: i64, message: Option<String>) -> Self {
        let mut err = Self::new(ApiErrorStatus::Envelope, message.unwrap_or_default());
        err.code = Some(code);
        err
    }

    pub fn http_status(status: u16) -> Self {
        let mut err = Self::new(ApiErrorStatus::HttpStatus, format!("unexpected HTTP status {status}"));
        err.code = Some(i64::from(status));
        err
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Decode, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Validation, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Storage, message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    /// 面向用户的提示：优先服务端文案，其次兜底文案
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.status {
            ApiErrorStatus::Envelope | ApiErrorStatus::Validation if !self.message.is_empty() => {
                &self.message
            }
            _ => fallback,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;
        if let Some(code) = self.code {
            write!(f, " (code {code})")?;
        }

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_trace() {
        let err = ApiError::envelope(500, Some("服务繁忙".into()))
            .in_op("product.list")
            .in_op_with("catalog.refresh", "lighting");
        assert_eq!(
            err.to_string(),
            "[API_REJECTED] 服务繁忙 (code 500) | trace: product.list -> catalog.refresh(lighting)"
        );
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::envelope(400, Some("手机号已提交".into()));
        assert_eq!(err.user_message("系统错误"), "手机号已提交");

        let err = ApiError::envelope(400, None);
        assert_eq!(err.user_message("系统错误"), "系统错误");

        let err = ApiError::transport("connection refused");
        assert_eq!(err.user_message("系统错误"), "系统错误");
    }
}
