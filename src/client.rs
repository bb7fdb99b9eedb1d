use serde::de::DeserializeOwned;
use tracing::debug;
use zspace_shared::protocol::ApiRequest;
use zspace_shared::{Envelope, HEADER_AUTHORIZATION};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse, query_pairs};
use crate::storage::KeyValueStorage;

/// 原始 token 的存储键，登录成功后由 `AppStore` 写入
pub const TOKEN_STORAGE_KEY: &str = "token";

// =========================================================
// 信封客户端 (Envelope client)
// =========================================================

/// 统一的远程调用入口
///
/// 负责拼接地址、附加 Bearer token、施加超时并解开 `{code, data, message}` 信封。
#[derive(Clone)]
pub struct ApiClient<C, S> {
    http: C,
    storage: S,
    config: ClientConfig,
}

impl<C, S> ApiClient<C, S>
where
    C: HttpClient,
    S: KeyValueStorage,
{
    pub fn new(http: C, storage: S, config: ClientConfig) -> Self {
        Self {
            http,
            storage,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// 发送一个类型化请求并解码信封中的 `data`
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let request = self.build(req).map_err(|e| e.in_op(R::OPERATION))?;
        debug!(
            operation = R::OPERATION,
            method = R::METHOD.as_str(),
            url = %request.url,
            "sending request"
        );

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| e.in_op(R::OPERATION))?;

        unwrap_envelope(&response).map_err(|e| e.in_op(R::OPERATION))
    }

    fn build<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpRequest> {
        let params = serde_json::to_value(req)?;
        let url = self.config.endpoint(R::PATH);

        let mut request = HttpRequest::new(&url, R::METHOD).with_timeout(self.config.timeout);
        request = match R::METHOD {
            HttpMethod::Get => request.with_query(query_pairs(&params)),
            HttpMethod::Post => request
                .with_header("Content-Type", "application/json")
                .with_body(params),
        };

        if let Some(token) = self.bearer_token() {
            request = request.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }
        Ok(request)
    }

    fn bearer_token(&self) -> Option<String> {
        self.storage
            .get(TOKEN_STORAGE_KEY)
            .filter(|t| !t.trim().is_empty())
    }
}

/// 解开响应信封
///
/// 仅当 HTTP 200 且 `code == 200` 时成功；其余信封一律转为 `Envelope` 错误并保留服务端文案。
pub fn unwrap_envelope<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    let envelope = match response.json::<Envelope>() {
        Ok(envelope) => envelope,
        Err(e) if response.status == 200 => {
            return Err(ApiError::decode(format!("response is not an envelope: {}", e.message())));
        }
        Err(_) => return Err(ApiError::http_status(response.status)),
    };

    if response.status != 200 || !envelope.is_success() {
        return Err(ApiError::envelope(envelope.code, envelope.message));
    }

    serde_json::from_value(envelope.data).map_err(ApiError::from)
}
