//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップまたはクリックで1枚だけ選択する。

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileReader, HtmlInputElement};
use image_weaver_common::filter::is_image_media_type;
use image_weaver_common::SelectedFile;

use crate::logging;

#[component]
pub fn UploadArea<FS, FD>(
    /// 選択中のファイル（ファイル名, KB）
    selected: Signal<Option<(String, usize)>>,
    on_file_selected: FS,
    on_delete: FD,
) -> impl IntoView
where
    FS: Fn(SelectedFile) + 'static + Clone + Send + Sync,
    FD: Fn(()) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    let on_drop = {
        let on_file_selected = on_file_selected.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            set_is_dragover.set(false);

            // 先頭の1枚だけ使う
            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                read_file(file, on_file_selected.clone());
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(false);
    };

    let on_change = {
        let on_file_selected = on_file_selected.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                read_file(file, on_file_selected.clone());
            }
        }
    };

    let on_select_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_delete_click = move |_| {
        // 同じファイルを再選択できるよう入力をクリア
        if let Some(input) = input_ref.get() {
            input.set_value("");
        }
        on_delete(());
    };

    view! {
        <div
            class="upload-area"
            class:dragover=move || is_dragover.get()
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <input
                node_ref=input_ref
                id="input-image"
                class="hidden"
                type="file"
                accept="image/*"
                on:change=on_change
            />
            <div class="upload-icon">"📷"</div>
            <p>"Drag & drop your photo here, or"</p>
            <button class="btn btn-secondary" on:click=on_select_click>
                "Select Image"
            </button>

            {move || {
                selected
                    .get()
                    .map(|(name, kb)| {
                        let on_delete_click = on_delete_click.clone();
                        view! {
                            <div class="selected-file">
                                <span>{format!("Selected: {} ({} KB)", name, kb)}</span>
                                <button class="btn btn-danger btn-small" on:click=on_delete_click>
                                    "Delete Photo"
                                </button>
                            </div>
                        }
                    })
            }}
        </div>
    }
}

fn read_file<F>(file: File, on_file_selected: F)
where
    F: Fn(SelectedFile) + 'static,
{
    let name = file.name();
    let media_type = file.type_();

    // 画像以外は読み込まずに渡す（セッション側で拒否される）
    if !is_image_media_type(&media_type) {
        logging::info(format!("rejected file {} ({})", name, media_type));
        on_file_selected(SelectedFile {
            name,
            media_type,
            bytes: Vec::new(),
        });
        return;
    }

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            logging::error(format!("FileReader unavailable: {:?}", e));
            return;
        }
    };

    let reader_clone = reader.clone();
    // 読み込み失敗時は空のバイト列になり、デコードエラーとして扱われる
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let bytes = match reader_clone.result() {
            Ok(result) if !result.is_null() => js_sys::Uint8Array::new(&result).to_vec(),
            _ => Vec::new(),
        };
        on_file_selected(SelectedFile {
            name: name.clone(),
            media_type: media_type.clone(),
            bytes,
        });
    }) as Box<dyn FnMut(_)>);

    reader.set_onloadend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_array_buffer(&file) {
        logging::error(format!("failed to read file: {:?}", e));
    }
}
