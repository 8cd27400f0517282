//! 明るさ・コントラスト調整コンポーネント

use leptos::prelude::*;
use image_weaver_common::filter::{MAX_PERCENT, MIN_PERCENT};
use image_weaver_common::{FilterParameters, Session};

use crate::logging;

#[derive(Clone, Copy)]
enum Adjustment {
    Brightness,
    Contrast,
}

impl Adjustment {
    fn label(self) -> &'static str {
        match self {
            Adjustment::Brightness => "Brightness",
            Adjustment::Contrast => "Contrast",
        }
    }

    fn id(self) -> &'static str {
        match self {
            Adjustment::Brightness => "brightness",
            Adjustment::Contrast => "contrast",
        }
    }

    fn read(self, params: FilterParameters) -> u16 {
        match self {
            Adjustment::Brightness => params.brightness,
            Adjustment::Contrast => params.contrast,
        }
    }
}

#[component]
pub fn FilterControls(session: RwSignal<Session>) -> impl IntoView {
    view! {
        <div class="filter-controls">
            <AdjustmentSlider session=session adjustment=Adjustment::Brightness />
            <AdjustmentSlider session=session adjustment=Adjustment::Contrast />
        </div>
    }
}

/// 入力値を数値にする。解釈できなければNaN（セッション側で無視される）
fn parse_percent(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// つまみ操作中の表示値。範囲外やNaNは確定値と同じ規則で丸める
fn preview_percent(committed: FilterParameters, adjustment: Adjustment, percent: f64) -> u16 {
    let mut params = committed;
    match adjustment {
        Adjustment::Brightness => params.set_brightness(percent),
        Adjustment::Contrast => params.set_contrast(percent),
    }
    adjustment.read(params)
}

#[component]
fn AdjustmentSlider(session: RwSignal<Session>, adjustment: Adjustment) -> impl IntoView {
    let committed = move || session.with(|s| adjustment.read(s.filters()));
    // ドラッグ中の値。inputでは表示だけ更新し、changeで再計算する
    let (draft, set_draft) = signal(None::<u16>);
    let value = move || draft.get().unwrap_or_else(committed);

    view! {
        <div class="form-group">
            <label for=adjustment.id()>
                {adjustment.label()}": "{move || value()}"%"
            </label>
            <input
                type="range"
                id=adjustment.id()
                min=MIN_PERCENT.to_string()
                max=MAX_PERCENT.to_string()
                step="1"
                prop:value=move || value().to_string()
                on:input=move |ev| {
                    let percent = parse_percent(&event_target_value(&ev));
                    let filters = session.with_untracked(|s| s.filters());
                    set_draft.set(Some(preview_percent(filters, adjustment, percent)));
                }
                on:change=move |ev| {
                    let percent = parse_percent(&event_target_value(&ev));
                    set_draft.set(None);
                    // 確定時に元画像から全体を再計算する
                    let outcome = session.try_update(|s| match adjustment {
                        Adjustment::Brightness => s.set_brightness(percent),
                        Adjustment::Contrast => s.set_contrast(percent),
                    });
                    if let Some(result) = outcome {
                        logging::report(adjustment.id(), &result);
                    }
                }
            />
        </div>
    }
}
