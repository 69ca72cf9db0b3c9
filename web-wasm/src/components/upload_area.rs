//! アップロードエリアコンポーネント
//!
//! ファイルピッカーとドラッグ&ドロップでスリップ画像を受け取り、プレビューを表示する。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};
use slip_reader_common::SlipUploadView;
use crate::preview::ObjectUrlPreviews;

const INPUT_ID: &str = "upload-input";

#[component]
pub fn UploadArea(upload: RwSignal<SlipUploadView<File>, LocalStorage>) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            upload.update(|v| v.select_file(file, &ObjectUrlPreviews));
        }
        // 同じファイルを選び直してもchangeが発火するように
        input.set_value("");
    };

    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        upload.update(|v| v.drag_enter());
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if !upload.with_untracked(|v| v.is_drag_active()) {
            upload.update(|v| v.drag_over());
        }
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        upload.update(|v| v.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();

        let files = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .map(file_list_to_vec)
            .unwrap_or_default();

        upload.update(|v| {
            v.drop_files(files, &ObjectUrlPreviews);
        });
    };

    let on_change_file = move |_| {
        upload.update(|v| v.clear(&ObjectUrlPreviews));
    };

    let has_preview = move || upload.with(|v| v.preview().is_some());
    let preview_url = move || {
        upload.with(|v| v.preview().map(|p| p.url().to_string()).unwrap_or_default())
    };
    let file_name = move || {
        upload.with(|v| v.selected_file().map(|f| f.name()).unwrap_or_default())
    };

    view! {
        <div
            class=move || {
                if upload.with(|v| v.is_drag_active()) {
                    "upload-area drag-active"
                } else {
                    "upload-area"
                }
            }
            on:dragenter=on_dragenter
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <input
                type="file"
                accept="image/*"
                id=INPUT_ID
                class="file-input"
                on:change=on_change
            />

            <Show
                when=has_preview
                fallback=|| view! {
                    <div class="upload-prompt">
                        <div class="upload-icon">"🧾"</div>
                        <p>"Drag & drop your slip image here or"</p>
                        <label for=INPUT_ID class="upload-btn">"Browse Files"</label>
                        <p class="upload-hint">"Supports: JPG, PNG, JPEG"</p>
                    </div>
                }
            >
                <div class="preview-container">
                    <img src=preview_url alt="Preview" class="preview-image" />
                    <div class="preview-actions">
                        <span class="file-name">{file_name}</span>
                        <button class="remove-btn" on:click=on_change_file>
                            "Change"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn file_list_to_vec(files: FileList) -> Vec<File> {
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}
