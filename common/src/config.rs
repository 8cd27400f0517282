//! 生成クライアント設定
//!
//! 起動時に一度だけ組み立て、クライアントに渡す。

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// プロキシが転送先を判断するためのヘッダ
pub const TARGET_URL_HEADER: &str = "x-fal-target-url";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// 転送プロキシのURL（ブラウザからは相対パスで可）
    pub proxy_url: String,
    pub fal_base_url: String,
    pub endpoint_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: "/api/fal/proxy".into(),
            fal_base_url: "https://fal.run".into(),
            endpoint_id: "fal-ai/flux-pro/kontext".into(),
        }
    }
}

impl ClientConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = proxy_url.into();
        self
    }

    /// プロキシに渡す転送先URL
    pub fn target_url(&self) -> String {
        format!(
            "{}/{}",
            self.fal_base_url.trim_end_matches('/'),
            self.endpoint_id.trim_start_matches('/')
        )
    }
}
