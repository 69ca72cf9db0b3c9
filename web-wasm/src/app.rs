//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use web_sys::File;
use slip_reader_common::{SlipUploadView, DEFAULT_ENDPOINT};
use crate::api::upload::upload_slip;
use crate::components::{
    header::Header,
    upload_area::UploadArea,
    extract_button::ExtractButton,
    results_panel::ResultsPanel,
};
use crate::locale::now_locale_string;
use crate::preview::ObjectUrlPreviews;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // web_sys::File は Send ではないためローカルストレージのシグナルで保持
    let upload = RwSignal::new_local(SlipUploadView::<File>::new());

    on_cleanup(move || {
        upload.try_update_untracked(|v| v.dispose(&ObjectUrlPreviews));
    });

    // 抽出開始ハンドラ
    let on_extract = move |_| {
        let Some(ticket) = upload.try_update(|v| v.begin_submit()).flatten() else {
            return;
        };
        let file = ticket.file().clone();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = upload_slip(DEFAULT_ENDPOINT, &file).await;
            if let Err(err) = &outcome {
                web_sys::console::error_1(&format!("Error uploading file: {}", err).into());
            }
            // 画面破棄後の応答は捨てる
            upload.try_update(|v| v.finish_submit(ticket, outcome));
        });
    };

    let last_error = move || upload.with(|v| v.last_error().map(str::to_string));
    let result = move || upload.with(|v| v.result().cloned());

    view! {
        <div class="app-container">
            <Header />

            <main>
                <div class="upload-section">
                    <h2>"Upload Slip Image"</h2>

                    <UploadArea upload=upload />

                    <ExtractButton upload=upload on_extract=on_extract />

                    {move || last_error().map(|message| view! {
                        <p class="error-text">{format!("Upload failed: {}", message)}</p>
                    })}
                </div>

                {move || result().map(|result| view! { <ResultsPanel result=result /> })}
            </main>

            <footer>
                <p>{format!("Current Date: {}", now_locale_string())}</p>
            </footer>
        </div>
    }
}
