//! ネイティブ版プロキシクライアント（reqwest）
//!
//! ブラウザ版と同じリクエストを送る。proxy_url は絶対URLで指定すること。

use crate::config::{ClientConfig, TARGET_URL_HEADER};
use crate::error::{Error, Result};
use crate::types::{failure_message, GenerationRequest, GenerationResult, GenerationService};

#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ProxyClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl GenerationService for ProxyClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let response = self
            .http
            .post(&self.config.proxy_url)
            .header(TARGET_URL_HEADER, self.config.target_url())
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Generation(failure_message(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &body,
            )));
        }

        GenerationResult::from_json(&body)
    }
}
