//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现核心库的 [`HttpClient`]，
//! 超时通过 `AbortController` + [`Timeout`] 实现。

use std::time::Duration;

use pedidos::{ApiError, ApiResult, HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

use super::timer::Timeout;

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy)]
pub struct FetchHttpClient {
    timeout: Duration,
}

impl FetchHttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn timeout_millis(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn build_request(req: &HttpRequest, controller: &AbortController) -> Result<Request, JsValue> {
    let headers = Headers::new()?;
    for (key, value) in &req.headers {
        headers.set(key, value)?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());
    opts.set_signal(Some(&controller.signal()));

    if let Some(body) = &req.body {
        opts.set_body(&JsValue::from_str(body));
    }

    Request::new_with_str_and_init(&req.url, &opts)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let controller = AbortController::new()
            .map_err(|e| ApiError::build(js_message(&e)).in_op("http.abort_controller"))?;
        let request = build_request(&req, &controller)
            .map_err(|e| ApiError::build(js_message(&e)).in_op_with("http.build", &req.url))?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::network("window unavailable").in_op("http.send"))?;

        // 保持定时器存活直到响应体读取完毕
        let abort = controller.clone();
        let _timeout = Timeout::new(self.timeout_millis(), move || abort.abort());
        let signal = controller.signal();

        let classify = |e: JsValue| {
            if signal.aborted() {
                ApiError::timeout(format!("no response within {:?}", self.timeout))
            } else {
                ApiError::network(js_message(&e))
            }
        };

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| classify(e).in_op_with("http.send", &req.url))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::parse(js_message(&e)).in_op("http.response"))?;

        let status = response.status();
        let text_promise = response
            .text()
            .map_err(|e| ApiError::parse(js_message(&e)).in_op("http.body"))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| classify(e).in_op("http.body"))?;

        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
