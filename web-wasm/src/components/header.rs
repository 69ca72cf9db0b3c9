//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Demo Slip OCR Extractor"</h1>
            <p class="user-info">"User : Admin"</p>
        </header>
    }
}
