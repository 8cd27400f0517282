//! エラー型定義
//!
//! セッション内で発生するエラーはすべて致命的ではなく、
//! 該当ステップの近くにインライン表示される。

use thiserror::Error;

/// 送信前バリデーションの失敗理由
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload and enhance an image in Step 1 to generate.")]
    MissingImage,

    #[error("Please provide a prompt in Step 3.")]
    EmptyPrompt,
}

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 画像以外のファイルが選択された（値はMIMEタイプ）
    #[error("Please upload a valid image file (e.g., JPG, PNG).")]
    InvalidFileType(String),

    #[error("Failed to load image for enhancement. Please try another image.")]
    ImageDecode(String),

    #[error("Failed to encode enhanced image: {0}")]
    ImageEncode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A generation request is already in progress.")]
    GenerationInFlight,

    /// 生成APIのエラーメッセージをそのまま表示する
    #[error("{0}")]
    Generation(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
