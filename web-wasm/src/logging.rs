//! ブラウザコンソールへのログ出力

use gloo::console;
use image_weaver_common::Result;

/// 操作結果をログに残す。エラー自体はセッションに記録済み
pub fn report<T>(action: &str, result: &Result<T>) {
    match result {
        Ok(_) => console::debug!(format!("{action}: ok")),
        Err(error) => console::warn!(format!("{action}: {error}")),
    }
}

pub fn info(message: impl AsRef<str>) {
    console::log!(message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    console::error!(message.as_ref());
}
