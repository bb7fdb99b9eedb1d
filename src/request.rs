use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};
pub use zspace_shared::protocol::HttpMethod;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
///
/// `query` 以未编码的键值对保存，由具体传输层负责编码。
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(ApiError::from)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// (?Send) 是因为浏览器环境下的 fetch future 不是 Send 的。
/// 实现方负责遵守 `HttpRequest::timeout`，超时返回 `ApiErrorStatus::Timeout`。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for std::rc::Rc<T> {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        (**self).send(req).await
    }
}

/// 将序列化后的请求参数展开为查询键值对
///
/// `null` 被跳过，数组展开为重复键，嵌套对象以 JSON 文本发送。
pub fn query_pairs(params: &serde_json::Value) -> Vec<(String, String)> {
    use serde_json::Value;

    let Value::Object(map) = params else {
        return Vec::new();
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => pairs.push((key.clone(), s.clone())),
            Value::Array(items) => {
                for item in items {
                    let rendered = match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    pairs.push((key.clone(), rendered));
                }
            }
            other => pairs.push((key.clone(), other.to_string())),
        }
    }
    pairs
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 一条被记录的请求
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

#[cfg(test)]
impl RecordedRequest {
    pub fn body_json(&self) -> serde_json::Value {
        self.body
            .as_deref()
            .map(|b| serde_json::from_str(b).unwrap())
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> 依次返回的 (Status, Response Body)；只剩一条时重复返回
    responses: RefCell<HashMap<String, Vec<(u16, String)>>>,
    failures: RefCell<HashMap<String, ApiError>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push((status, body.to_string()));
    }

    /// 以成功信封包装 `data`
    pub fn mock_ok(&self, url: &str, data: serde_json::Value) {
        self.mock_response(
            url,
            200,
            serde_json::json!({ "code": 200, "data": data, "message": "success" }),
        );
    }

    pub fn mock_failure(&self, url: &str, error: ApiError) {
        self.failures.borrow_mut().insert(url.to_string(), error);
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests.borrow().last().cloned().expect("no request recorded")
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: req.url.clone(),
            method: req.method,
            headers: req.headers.clone(),
            query: req.query.clone(),
            body: req.body.clone(),
        });

        if let Some(err) = self.failures.borrow().get(&req.url) {
            return Err(err.clone());
        }

        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(&req.url) {
            Some(queue) if queue.len() > 1 => {
                let (status, body) = queue.remove(0);
                Ok(HttpResponse { status, body })
            }
            Some(queue) if !queue.is_empty() => {
                let (status, body) = queue[0].clone();
                Ok(HttpResponse { status, body })
            }
            _ => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_pairs_flatten_object() {
        let pairs = query_pairs(&json!({
            "pageCode": "tags",
            "id": 7,
            "skip": null,
            "ids": ["a", 2]
        }));
        assert!(pairs.contains(&("pageCode".into(), "tags".into())));
        assert!(pairs.contains(&("id".into(), "7".into())));
        assert!(pairs.contains(&("ids".into(), "a".into())));
        assert!(pairs.contains(&("ids".into(), "2".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "skip"));
    }

    #[test]
    fn query_pairs_ignore_non_objects() {
        assert!(query_pairs(&json!(null)).is_empty());
        assert!(query_pairs(&json!([1, 2])).is_empty());
    }
}
