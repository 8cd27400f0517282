//! Data URLユーティリティ
//!
//! "data:image/png;base64,iVBOR..." 形式の文字列を扱う。

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// バイト列からBase64のData URLを組み立てる
pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLをデコードしてバイト列に戻す
pub fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    let payload = extract_base64_from_data_url(data_url)?;
    STANDARD.decode(payload).ok()
}
