//! ウィザードのセッション状態
//!
//! 写真選択 → 補正 → ControlNet設定（表示のみ） → プロンプト → 生成
//!
//! UIからはこの構造体のメソッドだけを呼ぶ。状態はセッション内のみで、
//! 永続化はしない。

use crate::error::{Error, Result, ValidationError};
use crate::filter::{FilterParameters, FilteredImage, ImageAsset, SelectedFile};
use crate::settings::ControlNetSettings;
use crate::types::{GenerationRequest, GenerationResult, GenerationService, ImageResult};

pub const DEFAULT_PROMPT: &str = "A person standing in front of the Eiffel Tower, wearing a red shirt, sunny day, realistic style, highly detailed, vibrant colors";

/// ウィザードのステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Photo,
    Configuration,
    Prompt,
    Generate,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Photo, Step::Configuration, Step::Prompt, Step::Generate];

    pub fn title(&self) -> &'static str {
        match self {
            Step::Photo => "Step 1: Photo",
            Step::Configuration => "Step 2: ControlNet",
            Step::Prompt => "Step 3: Prompt",
            Step::Generate => "Step 4: Generate",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Photo => "step-1",
            Step::Configuration => "step-2",
            Step::Prompt => "step-3",
            Step::Generate => "step-4",
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Photo => Some(Step::Configuration),
            Step::Configuration => Some(Step::Prompt),
            Step::Prompt => Some(Step::Generate),
            Step::Generate => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::Photo => None,
            Step::Configuration => Some(Step::Photo),
            Step::Prompt => Some(Step::Configuration),
            Step::Generate => Some(Step::Prompt),
        }
    }
}

impl Error {
    /// エラーを表示するステップ
    pub fn step(&self) -> Step {
        match self {
            Error::InvalidFileType(_) | Error::ImageDecode(_) | Error::ImageEncode(_) => Step::Photo,
            Error::Validation(_)
            | Error::GenerationInFlight
            | Error::Generation(_)
            | Error::Json(_) => Step::Generate,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    photo: Option<ImageAsset>,
    filters: FilterParameters,
    filtered: Option<FilteredImage>,
    settings: ControlNetSettings,
    prompt: String,
    loading: bool,
    result: Option<GenerationResult>,
    error: Option<Error>,
    active_step: Step,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            photo: None,
            filters: FilterParameters::default(),
            filtered: None,
            settings: ControlNetSettings::default(),
            prompt: DEFAULT_PROMPT.to_string(),
            loading: false,
            result: None,
            error: None,
            active_step: Step::Photo,
        }
    }
}

impl Session {
    // =============================================
    // 参照
    // =============================================

    pub fn photo(&self) -> Option<&ImageAsset> {
        self.photo.as_ref()
    }

    pub fn filters(&self) -> FilterParameters {
        self.filters
    }

    pub fn filtered(&self) -> Option<&FilteredImage> {
        self.filtered.as_ref()
    }

    pub fn settings(&self) -> &ControlNetSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ControlNetSettings {
        &mut self.settings
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn generated_image(&self) -> Option<&ImageResult> {
        self.result.as_ref().and_then(|r| r.first_image())
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// 指定ステップに表示するエラーメッセージ
    pub fn error_for(&self, step: Step) -> Option<String> {
        self.error
            .as_ref()
            .filter(|e| e.step() == step)
            .map(|e| e.to_string())
    }

    pub fn active_step(&self) -> Step {
        self.active_step
    }

    // =============================================
    // ステップ
    // =============================================

    pub fn is_step_complete(&self, step: Step) -> bool {
        match step {
            Step::Photo => self.filtered.is_some(),
            // 表示専用の設定なので常に完了扱い
            Step::Configuration => true,
            Step::Prompt => !self.prompt.trim().is_empty(),
            Step::Generate => self.generated_image().is_some() || self.loading,
        }
    }

    /// タブは自由に切り替えられる
    pub fn select_step(&mut self, step: Step) {
        self.active_step = step;
    }

    /// 「次へ」ボタンが押せるか
    pub fn can_advance(&self) -> bool {
        match self.active_step {
            Step::Photo | Step::Prompt => self.is_step_complete(self.active_step),
            Step::Configuration => true,
            Step::Generate => false,
        }
    }

    /// 次のステップへ進む。完了していなければ何もしない
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        match self.active_step.next() {
            Some(next) => {
                self.active_step = next;
                true
            }
            None => false,
        }
    }

    pub fn go_back(&mut self) -> bool {
        match self.active_step.previous() {
            Some(previous) => {
                self.active_step = previous;
                true
            }
            None => false,
        }
    }

    pub fn can_generate(&self) -> bool {
        !self.loading
            && self.is_step_complete(Step::Photo)
            && self.is_step_complete(Step::Prompt)
    }

    // =============================================
    // 写真・補正
    // =============================================

    /// ファイル選択
    ///
    /// 画像以外は拒否し、写真の状態は変えない。
    /// 画像ならデコードし、補正値をリセットして補正済み画像を作り直す。
    pub fn select_file(&mut self, file: SelectedFile) -> Result<()> {
        if !file.is_image() {
            let error = Error::InvalidFileType(file.media_type);
            return Err(self.record(error));
        }

        self.filters = FilterParameters::default();
        match ImageAsset::decode(&file) {
            Ok(asset) => {
                self.photo = Some(asset);
                self.error = None;
                self.refresh_filtered()
            }
            Err(error) => {
                self.photo = None;
                self.filtered = None;
                Err(self.record(error))
            }
        }
    }

    /// 写真を削除して補正値を初期化する
    pub fn delete_photo(&mut self) {
        self.photo = None;
        self.filtered = None;
        self.filters = FilterParameters::default();
        self.error = None;
    }

    pub fn set_brightness(&mut self, percent: f64) -> Result<()> {
        let before = self.filters;
        self.filters.set_brightness(percent);
        self.refresh_if_changed(before)
    }

    pub fn set_contrast(&mut self, percent: f64) -> Result<()> {
        let before = self.filters;
        self.filters.set_contrast(percent);
        self.refresh_if_changed(before)
    }

    fn refresh_if_changed(&mut self, before: FilterParameters) -> Result<()> {
        if self.filters == before {
            return Ok(());
        }
        self.refresh_filtered()
    }

    /// 元画像から補正済み画像を作り直す
    fn refresh_filtered(&mut self) -> Result<()> {
        let Some(photo) = &self.photo else {
            self.filtered = None;
            return Ok(());
        };

        match FilteredImage::render(photo, self.filters) {
            Ok(filtered) => {
                self.filtered = Some(filtered);
                Ok(())
            }
            Err(error) => {
                self.filtered = None;
                Err(self.record(error))
            }
        }
    }

    // =============================================
    // プロンプト・生成
    // =============================================

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
        self.error = None;
    }

    /// 生成開始
    ///
    /// 実行中なら拒否する。入力が足りなければValidationErrorを記録して
    /// 通信は行わない。成功時はloadingを立ててリクエストを返す。
    pub fn begin_generation(&mut self) -> Result<GenerationRequest> {
        if self.loading {
            return Err(Error::GenerationInFlight);
        }

        self.error = None;
        self.result = None;

        let Some(filtered) = &self.filtered else {
            return Err(self.record(ValidationError::MissingImage.into()));
        };
        if self.prompt.trim().is_empty() {
            return Err(self.record(ValidationError::EmptyPrompt.into()));
        }

        let request = GenerationRequest {
            prompt: self.prompt.clone(),
            image: filtered.data_url.clone(),
        };
        self.loading = true;
        Ok(request)
    }

    /// 生成完了（成功・失敗どちらも一度だけ呼ぶ）
    pub fn finish_generation(&mut self, outcome: Result<GenerationResult>) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(error) => {
                self.result = None;
                self.error = Some(error);
            }
        }
    }

    /// 開始から完了までを一度に行う
    ///
    /// 呼び出し中はセッションを借用し続けるため、UIでは
    /// begin_generation / finish_generation を分けて使う。
    pub async fn generate<S: GenerationService>(&mut self, service: &S) -> Result<()> {
        let request = self.begin_generation()?;
        let outcome = service.generate(&request).await;
        self.finish_generation(outcome);
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// エラーを記録し、呼び出し元にも返す
    fn record(&mut self, error: Error) -> Error {
        self.error = Some(error.clone());
        error
    }
}
