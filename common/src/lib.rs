//! Image Weaver Common Library
//!
//! ブラウザ(WASM)とネイティブで共有される補正パイプライン、
//! 比較スライダー、ウィザードのセッション状態

pub mod config;
pub mod data_url;
pub mod error;
pub mod filter;
pub mod session;
pub mod settings;
pub mod slider;
pub mod types;

#[cfg(feature = "native")]
pub mod native;

pub use config::{ClientConfig, TARGET_URL_HEADER};
pub use error::{Error, Result, ValidationError};
pub use filter::{apply_filter, FilterParameters, FilteredImage, ImageAsset, SelectedFile};
pub use session::{Session, Step};
pub use settings::{ControlField, ControlNetSettings, ControlUnit, UnitId};
pub use slider::{DragPhase, SliderState, Viewport, ViewportBounds};
pub use types::{failure_message, GenerationRequest, GenerationResult, GenerationService, ImageResult};
