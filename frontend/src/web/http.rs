//! HTTP 传输模块
//!
//! 基于 `web_sys::fetch` 实现 `zspace::HttpClient`，并负责执行请求上的超时。

use std::time::Duration;

use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, UrlSearchParams};
use zspace::{ApiError, ApiResult, HttpClient, HttpRequest, HttpResponse};

fn js_error(context: &str, value: JsValue) -> ApiError {
    ApiError::transport(format!("{context}: {value:?}"))
}

/// 拼接查询串，编码交给 `URLSearchParams`
fn url_with_query(url: &str, query: &[(String, String)]) -> ApiResult<String> {
    if query.is_empty() {
        return Ok(url.to_string());
    }

    let params = UrlSearchParams::new().map_err(|e| js_error("创建 URLSearchParams 失败", e))?;
    for (key, value) in query {
        params.append(key, value);
    }
    let encoded: String = params.to_string().into();
    let separator = if url.contains('?') { '&' } else { '?' };
    Ok(format!("{url}{separator}{encoded}"))
}

async fn read_text(response: Response) -> ApiResult<String> {
    let promise = response
        .text()
        .map_err(|e| js_error("读取响应失败", e))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| js_error("读取响应失败", e))?;
    text.as_string()
        .ok_or_else(|| ApiError::decode("响应体无法转换为字符串"))
}

/// 浏览器 fetch 传输
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    async fn fetch(req: &HttpRequest) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| js_error("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let url = url_with_query(&req.url, &req.query)?;
        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| js_error("构建请求失败", e))?;

        let window = web_sys::window().ok_or_else(|| ApiError::transport("无法获取 window 对象"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("网络错误", e))?;
        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("Response 类型转换失败", e))?;

        let status = response.status();
        let body = read_text(response).await?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let Some(timeout) = req.timeout else {
            return Self::fetch(&req).await;
        };

        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let request = Box::pin(Self::fetch(&req));
        match select(request, TimeoutFuture::new(millis)).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ApiError::timeout(duration_ms(timeout))),
        }
    }
}

fn duration_ms(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}
