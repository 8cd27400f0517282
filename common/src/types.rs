//! 生成APIの型定義
//!
//! - GenerationRequest: プロンプト + 補正済み画像（Data URL）
//! - GenerationResult: 生成画像のリスト（先頭のみ使用）
//! - GenerationService: 生成APIの呼び出し口（テストでは差し替える）

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 生成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,

    /// 補正済み画像のData URL
    #[serde(rename = "image_url")]
    pub image: String,
}

/// 生成画像
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: String,

    #[serde(default)]
    pub file_name: String,

    #[serde(default)]
    pub file_size: u64,
}

/// 生成レスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub images: Vec<ImageResult>,
}

impl GenerationResult {
    /// レスポンス本文をパースする。画像が1枚もなければエラー
    pub fn from_json(body: &str) -> Result<Self> {
        let result: GenerationResult = serde_json::from_str(body)?;
        if result.images.is_empty() {
            return Err(Error::Generation(
                "The generation service returned no images.".to_string(),
            ));
        }
        Ok(result)
    }

    pub fn first_image(&self) -> Option<&ImageResult> {
        self.images.first()
    }
}

/// 生成API
///
/// ブラウザ版はfetch、ネイティブ版はreqwestで実装する。
/// 失敗時は `Error::Generation` にメッセージをそのまま入れて返す。
#[allow(async_fn_in_trait)]
pub trait GenerationService {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;
}

/// 失敗レスポンスから表示用メッセージを作る
///
/// 本文に `detail` / `message` 文字列があればそれを、
/// なければ "HTTP {status} {reason}" を返す。
pub fn failure_message(status: u16, reason: &str, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.to_string();
                }
            }
        }
    }

    let reason = reason.trim();
    if reason.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {} {}", status, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialize_uses_image_url() {
        let request = GenerationRequest {
            prompt: "test".to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
        };
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"prompt":"test","image_url":"data:image/png;base64,AAAA"}"#);
    }

    #[test]
    fn test_result_deserialize() {
        let body = r#"{
            "images": [
                {"url": "https://cdn.example/a.png", "file_name": "a.png", "file_size": 1024},
                {"url": "https://cdn.example/b.png"}
            ],
            "seed": 42
        }"#;
        let result = GenerationResult::from_json(body).expect("パース失敗");
        assert_eq!(result.images.len(), 2);

        let first = result.first_image().expect("画像なし");
        assert_eq!(first.url, "https://cdn.example/a.png");
        assert_eq!(first.file_name, "a.png");
        assert_eq!(first.file_size, 1024);
        assert_eq!(result.images[1].file_name, "");
    }

    #[test]
    fn test_result_without_images_is_error() {
        let result = GenerationResult::from_json(r#"{"images": []}"#);
        assert!(matches!(result, Err(Error::Generation(_))));

        let result = GenerationResult::from_json("{}");
        assert!(matches!(result, Err(Error::Generation(_))));
    }

    #[test]
    fn test_result_invalid_json() {
        assert!(matches!(GenerationResult::from_json("<html>"), Err(Error::Json(_))));
    }

    #[test]
    fn test_failure_message_prefers_detail() {
        let message = failure_message(422, "Unprocessable Entity", r#"{"detail": "prompt too long"}"#);
        assert_eq!(message, "prompt too long");

        let message = failure_message(500, "Internal Server Error", r#"{"message": "boom"}"#);
        assert_eq!(message, "boom");
    }

    #[test]
    fn test_failure_message_falls_back_to_status() {
        assert_eq!(failure_message(502, "Bad Gateway", "upstream down"), "HTTP 502 Bad Gateway");
        assert_eq!(failure_message(504, "", ""), "HTTP 504");
        // detailが文字列以外（配列など）の場合はステータス表示
        assert_eq!(
            failure_message(422, "Unprocessable Entity", r#"{"detail": [{"loc": []}]}"#),
            "HTTP 422 Unprocessable Entity"
        );
    }
}
