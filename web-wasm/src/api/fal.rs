//! 画像生成API連携（転送プロキシ経由）
//!
//! ブラウザからは資格情報を持たず、プロキシに転送先URLをヘッダで伝える。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use image_weaver_common::{
    failure_message, ClientConfig, Error, GenerationRequest, GenerationResult,
    GenerationService, Result, TARGET_URL_HEADER,
};

/// fetchで生成APIを呼ぶクライアント
///
/// 起動時に一度だけ作り、コンポーネントに渡す。
#[derive(Debug, Clone)]
pub struct FalProxyClient {
    config: ClientConfig,
}

/// プロキシからの生レスポンス
struct RawResponse {
    status: u16,
    status_text: String,
    body: String,
}

impl FalProxyClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// プロキシにPOSTする（共通処理）
    async fn post(&self, body: &str) -> std::result::Result<RawResponse, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(body));

        let request = Request::new_with_str_and_init(&self.config.proxy_url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;
        request
            .headers()
            .set(TARGET_URL_HEADER, &self.config.target_url())?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        let text = JsFuture::from(resp.text()?).await?;

        Ok(RawResponse {
            status: resp.status(),
            status_text: resp.status_text(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

impl GenerationService for FalProxyClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let body = request_body(request)?;

        let response = self
            .post(&body)
            .await
            .map_err(|e| Error::Generation(js_error_message(&e)))?;

        if !(200..300).contains(&response.status) {
            return Err(Error::Generation(failure_message(
                response.status,
                &response.status_text,
                &response.body,
            )));
        }

        GenerationResult::from_json(&response.body)
    }
}

/// リクエスト本文（JSON）
pub fn request_body(request: &GenerationRequest) -> Result<String> {
    Ok(serde_json::to_string(request)?)
}

/// JSの例外から表示用メッセージを取り出す
///
/// Errorならmessage、文字列ならそのまま
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    if let Some(text) = value.as_string() {
        return text;
    }
    format!("{:?}", value)
}
