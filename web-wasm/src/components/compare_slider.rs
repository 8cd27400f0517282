//! 比較スライダーコンポーネント
//!
//! 「前」画像を下地に、「後」画像を仕切りの左側だけ重ねて表示する。
//! ドラッグ中だけwindowにpointermove/pointerup/pointercancelを登録し、
//! 領域外に出ても追従・解除できるようにする。

use gloo::events::EventListener;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, PointerEvent};
use image_weaver_common::{SliderState, Viewport, ViewportBounds};

/// ドラッグを終わらせるイベント。タッチやOSのジェスチャで中断された場合も含む
const DRAG_END_EVENTS: [&str; 2] = ["pointerup", "pointercancel"];

/// Dragging中だけ保持するwindowリスナー（dropで解除される）
struct DragListeners {
    _on_move: EventListener,
    _on_end: Vec<EventListener>,
}

#[component]
pub fn CompareSlider(
    #[prop(into)] before: Signal<String>,
    #[prop(into)] after: Signal<String>,
    #[prop(optional)] viewport: Option<Viewport>,
    #[prop(default = "Before")] before_label: &'static str,
    #[prop(default = "After")] after_label: &'static str,
) -> impl IntoView {
    let viewport = viewport.unwrap_or_default();
    let container = NodeRef::<html::Div>::new();
    let (slider, set_slider) = signal(SliderState::default());

    // コンポーネント破棄時はStoredValueごと破棄され、リスナーも外れる
    let listeners = StoredValue::new_local(None::<DragListeners>);

    // 状態に合わせてリスナーを付け外しする
    Effect::new(move |_| {
        if !slider.with(|s| s.is_dragging()) {
            listeners.set_value(None);
            return;
        }
        if listeners.with_value(|l| l.is_some()) {
            return;
        }

        let window = gloo::utils::window();
        let on_move = EventListener::new(&window, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(element) = container.get_untracked() else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            let bounds = ViewportBounds::new(rect.left(), rect.width());
            let pointer_x = f64::from(event.client_x());
            set_slider.maybe_update(|s| s.drag_to(pointer_x, bounds));
        });
        let on_end = DRAG_END_EVENTS
            .iter()
            .map(|&event_type| {
                EventListener::new(&window, event_type, move |_| {
                    set_slider.maybe_update(|s| s.end_drag());
                })
            })
            .collect();

        listeners.set_value(Some(DragListeners {
            _on_move: on_move,
            _on_end: on_end,
        }));
    });

    let on_pointer_down = move |ev: PointerEvent| {
        ev.prevent_default();
        set_slider.maybe_update(|s| s.begin_drag());
    };

    view! {
        <div
            node_ref=container
            class="compare-slider"
            class:dragging=move || slider.with(|s| s.is_dragging())
            style=format!("width: {}px; height: {}px;", viewport.width, viewport.height)
        >
            <img
                class="compare-image"
                src=move || before.get()
                alt=before_label
                draggable="false"
            />
            <img
                class="compare-image"
                src=move || after.get()
                alt=after_label
                draggable="false"
                style=move || format!("clip-path: {};", slider.with(|s| s.clip_path()))
            />
            <div
                class="compare-handle"
                style=move || format!("left: {}; transform: translateX(-50%);", slider.with(|s| s.handle_left()))
                on:pointerdown=on_pointer_down
            >
                <div class="compare-knob">"‹ ›"</div>
            </div>
        </div>
    }
}
