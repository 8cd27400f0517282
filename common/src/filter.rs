//! 明るさ・コントラスト補正パイプライン
//!
//! 元画像 → 補正（ルックアップテーブル） → PNG再エンコード → Data URL
//!
//! 補正は常に元画像から全体を再計算する。前回の出力を入力に使うと
//! 誤差が累積するため。

use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::data_url::encode_data_url;
use crate::error::{Error, Result};

/// パーセンテージの下限
pub const MIN_PERCENT: u16 = 0;
/// パーセンテージの上限
pub const MAX_PERCENT: u16 = 200;
/// 無補正（等倍）
pub const UNITY_PERCENT: u16 = 100;

/// コントラスト補正の中心値
const MID_GRAY: f32 = 128.0;

/// 補正パラメータ（いずれも100 = 無補正）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParameters {
    pub brightness: u16,
    pub contrast: u16,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            brightness: UNITY_PERCENT,
            contrast: UNITY_PERCENT,
        }
    }
}

impl FilterParameters {
    /// 範囲外の値は [0, 200] に丸める
    pub fn new(brightness: f64, contrast: f64) -> Self {
        let mut params = Self::default();
        params.set_brightness(brightness);
        params.set_contrast(contrast);
        params
    }

    pub fn set_brightness(&mut self, percent: f64) {
        if let Some(value) = clamp_percent(percent) {
            self.brightness = value;
        }
    }

    pub fn set_contrast(&mut self, percent: f64) {
        if let Some(value) = clamp_percent(percent) {
            self.contrast = value;
        }
    }

    pub fn is_identity(&self) -> bool {
        self.brightness == UNITY_PERCENT && self.contrast == UNITY_PERCENT
    }

    /// 1チャンネル分のルックアップテーブル
    ///
    /// 明るさを掛けてから、128を中心にコントラストを掛ける。
    /// 各段でクランプする（CSSの brightness() contrast() と同じ順序）。
    fn lookup_table(&self) -> [u8; 256] {
        let brightness = f32::from(self.brightness) / 100.0;
        let contrast = f32::from(self.contrast) / 100.0;

        let mut table = [0u8; 256];
        for (value, slot) in table.iter_mut().enumerate() {
            let lit = (value as f32 * brightness).clamp(0.0, 255.0);
            let out = ((lit - MID_GRAY) * contrast + MID_GRAY).clamp(0.0, 255.0);
            *slot = out.round() as u8;
        }
        table
    }
}

/// 数値入力を整数パーセントに変換する。NaNは無視
fn clamp_percent(percent: f64) -> Option<u16> {
    if percent.is_nan() {
        return None;
    }
    Some(percent.round().clamp(f64::from(MIN_PERCENT), f64::from(MAX_PERCENT)) as u16)
}

/// ユーザーが選択したファイル（デコード前）
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

/// MIMEタイプが image/* かどうか
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// デコード済みの元画像
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub file_name: String,
    pub media_type: String,
    pub byte_len: usize,
    /// 比較スライダーの「前」として表示する元画像のData URL
    pub preview_url: String,
    image: DynamicImage,
}

impl ImageAsset {
    pub fn decode(file: &SelectedFile) -> Result<Self> {
        if !file.is_image() {
            return Err(Error::InvalidFileType(file.media_type.clone()));
        }

        let image = decode_oriented(&file.bytes)?;

        Ok(Self {
            file_name: file.name.clone(),
            media_type: file.media_type.clone(),
            byte_len: file.bytes.len(),
            preview_url: encode_data_url(&file.media_type, &file.bytes),
            image,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// 表示用のサイズ（KB、四捨五入）
    pub fn size_kb(&self) -> usize {
        (self.byte_len + 512) / 1024
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// 画像をデコードし、EXIFの向きを反映する
///
/// ブラウザは元画像を向き補正して表示するので、補正済み画像も同じ向きに揃える。
fn decode_oriented(bytes: &[u8]) -> Result<DynamicImage> {
    let decode_error = |e: image::ImageError| Error::ImageDecode(e.to_string());

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::ImageDecode(e.to_string()))?
        .into_decoder()
        .map_err(decode_error)?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let mut image = DynamicImage::from_decoder(decoder).map_err(decode_error)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// 補正を焼き込んだ画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

impl FilteredImage {
    /// 元画像に補正を適用してPNGのData URLを生成する
    pub fn render(asset: &ImageAsset, params: FilterParameters) -> Result<Self> {
        let filtered = apply_filter(asset.image(), params);
        let data_url = encode_png_data_url(&filtered)?;

        Ok(Self {
            data_url,
            width: filtered.width(),
            height: filtered.height(),
        })
    }
}

/// 明るさ・コントラスト補正（純粋関数）
///
/// 入力画像は変更しない。出力は入力と同じサイズのRGBA画像。
/// アルファチャンネルはそのまま残す。
pub fn apply_filter(image: &DynamicImage, params: FilterParameters) -> RgbaImage {
    let mut output = image.to_rgba8();
    if params.is_identity() {
        return output;
    }

    let table = params.lookup_table();
    for pixel in output.pixels_mut() {
        let [r, g, b, _] = &mut pixel.0;
        *r = table[usize::from(*r)];
        *g = table[usize::from(*g)];
        *b = table[usize::from(*b)];
    }
    output
}

/// RGBA画像をPNGにエンコードしてData URLにする
pub fn encode_png_data_url(image: &RgbaImage) -> Result<String> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| Error::ImageEncode(e.to_string()))?;
    Ok(encode_data_url("image/png", &buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_url::decode_data_url;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let buffer = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, 200])
        });
        DynamicImage::ImageRgba8(buffer)
    }

    fn png_file(image: &DynamicImage) -> SelectedFile {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("PNG生成失敗");
        SelectedFile {
            name: "gradient.png".to_string(),
            media_type: "image/png".to_string(),
            bytes,
        }
    }

    // =============================================
    // FilterParameters
    // =============================================

    #[test]
    fn test_default_parameters_are_unity() {
        let params = FilterParameters::default();
        assert_eq!(params.brightness, 100);
        assert_eq!(params.contrast, 100);
        assert!(params.is_identity());
    }

    #[test]
    fn test_parameters_are_clamped() {
        let params = FilterParameters::new(-20.0, 350.0);
        assert_eq!(params.brightness, 0);
        assert_eq!(params.contrast, 200);

        let params = FilterParameters::new(149.6, 0.4);
        assert_eq!(params.brightness, 150);
        assert_eq!(params.contrast, 0);
    }

    #[test]
    fn test_nan_is_ignored() {
        let mut params = FilterParameters::new(120.0, 80.0);
        params.set_brightness(f64::NAN);
        params.set_contrast(f64::NAN);
        assert_eq!(params, FilterParameters::new(120.0, 80.0));
    }

    #[test]
    fn test_lookup_table_identity() {
        let table = FilterParameters::default().lookup_table();
        for (value, mapped) in table.iter().enumerate() {
            assert_eq!(usize::from(*mapped), value);
        }
    }

    #[test]
    fn test_lookup_table_brightness_only() {
        let table = FilterParameters::new(150.0, 100.0).lookup_table();
        assert_eq!(table[0], 0);
        assert_eq!(table[100], 150);
        assert_eq!(table[200], 255);
    }

    #[test]
    fn test_lookup_table_zero_contrast_is_mid_gray() {
        let table = FilterParameters::new(100.0, 0.0).lookup_table();
        assert!(table.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_lookup_table_zero_brightness_is_black_before_contrast() {
        // 明るさ0 → 全て0、コントラスト等倍なので0のまま
        let table = FilterParameters::new(0.0, 100.0).lookup_table();
        assert!(table.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_lookup_table_contrast_expands_around_mid_gray() {
        let table = FilterParameters::new(100.0, 120.0).lookup_table();
        assert_eq!(table[128], 128);
        assert!(table[200] > 200);
        assert!(table[50] < 50);
    }

    // =============================================
    // apply_filter
    // =============================================

    #[test]
    fn test_apply_filter_identity() {
        let source = gradient(31, 17);
        let output = apply_filter(&source, FilterParameters::default());
        assert_eq!(output, source.to_rgba8());
    }

    #[test]
    fn test_apply_filter_preserves_dimensions() {
        let source = gradient(23, 11);
        for brightness in [0.0, 50.0, 100.0, 150.0, 200.0] {
            for contrast in [0.0, 100.0, 200.0] {
                let output = apply_filter(&source, FilterParameters::new(brightness, contrast));
                assert_eq!(output.dimensions(), (23, 11));
            }
        }
    }

    #[test]
    fn test_apply_filter_keeps_alpha_and_source() {
        let source = gradient(8, 8);
        let before = source.clone();
        let output = apply_filter(&source, FilterParameters::new(180.0, 60.0));

        assert!(output.pixels().all(|p| p.0[3] == 200));
        // 入力は変更されない
        assert_eq!(source.to_rgba8(), before.to_rgba8());
    }

    // =============================================
    // ImageAsset / FilteredImage
    // =============================================

    #[test]
    fn test_decode_rejects_non_image() {
        let file = SelectedFile {
            name: "notes.txt".to_string(),
            media_type: "text/plain".to_string(),
            bytes: b"hello".to_vec(),
        };
        let result = ImageAsset::decode(&file);
        assert!(matches!(result, Err(Error::InvalidFileType(t)) if t == "text/plain"));
    }

    #[test]
    fn test_decode_corrupt_bytes() {
        let file = SelectedFile {
            name: "broken.jpg".to_string(),
            media_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF, 0x00, 0x01],
        };
        assert!(matches!(ImageAsset::decode(&file), Err(Error::ImageDecode(_))));
    }

    /// Orientation=6（時計回り90°）のEXIFを付けたJPEG
    fn rotated_jpeg(width: u32, height: u32) -> SelectedFile {
        let source = DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 { image::Rgb([250, 20, 20]) } else { image::Rgb([20, 20, 250]) }
        }));
        let mut jpeg = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .expect("JPEG生成失敗");

        // APP1: "Exif\0\0" + TIFF(big endian) + IFD0 1エントリ (0x0112 SHORT = 6)
        let mut app1 = vec![0xFF, 0xE1, 0x00, 0x22];
        app1.extend_from_slice(b"Exif\0\0");
        app1.extend_from_slice(&[0x4D, 0x4D, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
        app1.extend_from_slice(&[0x00, 0x01]);
        app1.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00]);
        app1.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        // SOIの直後に差し込む
        let mut bytes = jpeg[..2].to_vec();
        bytes.extend_from_slice(&app1);
        bytes.extend_from_slice(&jpeg[2..]);

        SelectedFile {
            name: "portrait.jpg".to_string(),
            media_type: "image/jpeg".to_string(),
            bytes,
        }
    }

    #[test]
    fn test_decode_applies_exif_orientation() {
        let asset = ImageAsset::decode(&rotated_jpeg(40, 20)).expect("デコード失敗");
        assert_eq!((asset.width(), asset.height()), (20, 40));

        // 左半分（赤）が上に来る
        let pixels = asset.image().to_rgb8();
        assert!(pixels.get_pixel(10, 5)[0] > 150);
        assert!(pixels.get_pixel(10, 35)[2] > 150);

        let filtered = FilteredImage::render(&asset, FilterParameters::new(120.0, 100.0))
            .expect("補正失敗");
        assert_eq!((filtered.width, filtered.height), (20, 40));
    }

    #[test]
    fn test_render_round_trips_dimensions() {
        let source = gradient(40, 30);
        let asset = ImageAsset::decode(&png_file(&source)).expect("デコード失敗");
        assert_eq!((asset.width(), asset.height()), (40, 30));
        assert!(asset.preview_url.starts_with("data:image/png;base64,"));

        let filtered =
            FilteredImage::render(&asset, FilterParameters::new(130.0, 90.0)).expect("補正失敗");
        assert_eq!((filtered.width, filtered.height), (40, 30));

        let bytes = decode_data_url(&filtered.data_url).expect("Data URL不正");
        let decoded = image::load_from_memory(&bytes).expect("PNG不正");
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn test_render_identity_matches_source_pixels() {
        let source = gradient(12, 9);
        let asset = ImageAsset::decode(&png_file(&source)).expect("デコード失敗");
        let filtered = FilteredImage::render(&asset, FilterParameters::default()).expect("補正失敗");

        let bytes = decode_data_url(&filtered.data_url).expect("Data URL不正");
        let decoded = image::load_from_memory(&bytes).expect("PNG不正");
        assert_eq!(decoded.to_rgba8(), source.to_rgba8());
    }

    #[test]
    fn test_size_kb() {
        let mut asset = ImageAsset::decode(&png_file(&gradient(2, 2))).expect("デコード失敗");
        asset.byte_len = 2048;
        assert_eq!(asset.size_kb(), 2);
        asset.byte_len = 1600;
        assert_eq!(asset.size_kb(), 2);
        asset.byte_len = 100;
        assert_eq!(asset.size_kb(), 0);
    }
}
