//! 抽出結果パネルコンポーネント

use leptos::prelude::*;
use slip_reader_common::{result_rows_with, ExtractedResult};
use crate::locale::format_locale_datetime;

#[component]
pub fn ResultsPanel(result: ExtractedResult) -> impl IntoView {
    let rows = result_rows_with(&result, format_locale_datetime);

    view! {
        <div class="results-section">
            <h2>"Extracted Data"</h2>
            <div class="data-card">
                {rows
                    .into_iter()
                    .map(|row| {
                        let value_class = if row.emphasized { "data-value amount" } else { "data-value" };
                        view! {
                            <div class="data-row">
                                <div class="data-label">{row.label}</div>
                                <div class=value_class>{row.value}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
