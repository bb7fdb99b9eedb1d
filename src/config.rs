//! 运行时配置
//!
//! 配置来源是一个键查找函数：浏览器端由编译期环境变量提供，
//! 原生端可直接传入 `std::env::var`。读不到的键使用默认值。

use std::time::Duration;

use crate::error::{ApiError, ApiResult};

pub const KEY_API_BASE_URL: &str = "ZSPACE_API_BASE_URL";
pub const KEY_API_TIMEOUT_MS: &str = "ZSPACE_API_TIMEOUT_MS";
pub const KEY_APP_NAME: &str = "ZSPACE_APP_NAME";
pub const KEY_APP_VERSION: &str = "ZSPACE_APP_VERSION";
pub const KEY_DEFAULT_LANGUAGE: &str = "ZSPACE_DEFAULT_LANGUAGE";
pub const KEY_DEBUG: &str = "ZSPACE_DEBUG";

const DEFAULT_API_BASE_URL: &str = "http://8.149.244.70:8080";
const DEFAULT_API_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_APP_NAME: &str = "Z-Space";
const DEFAULT_APP_VERSION: &str = "1.0.0";
const DEFAULT_LANGUAGE: &str = "zh-CN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub app_name: String,
    pub app_version: String,
    pub default_language: String,
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ClientConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = non_empty(KEY_API_BASE_URL)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let timeout_ms = non_empty(KEY_API_TIMEOUT_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_MS);

        Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            app_name: non_empty(KEY_APP_NAME).unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_version: non_empty(KEY_APP_VERSION)
                .unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            default_language: non_empty(KEY_DEFAULT_LANGUAGE)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            debug: non_empty(KEY_DEBUG).is_some_and(|v| v == "true"),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::validation(format!("{KEY_API_BASE_URL} is empty")));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::validation(format!(
                "{KEY_API_BASE_URL} must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// 拼接完整接口地址
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
