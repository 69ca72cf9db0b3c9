//! 抽出ボタンコンポーネント

use leptos::prelude::*;
use web_sys::File;
use slip_reader_common::SlipUploadView;

#[component]
pub fn ExtractButton<F>(
    upload: RwSignal<SlipUploadView<File>, LocalStorage>,
    on_extract: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    let is_loading = move || upload.with(|v| v.is_loading());

    view! {
        <button
            class="upload-button"
            disabled=move || !upload.with(|v| v.can_submit())
            on:click={
                let on_extract = on_extract.clone();
                move |_| on_extract(())
            }
        >
            <Show
                when=is_loading
                fallback=|| "Extract Data"
            >
                <span class="spinner"></span>
                <span>"Processing..."</span>
            </Show>
        </button>
    }
}
