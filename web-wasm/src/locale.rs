//! 閲覧者のロケールによる日時表記（`Date.prototype.toLocaleString`）

use js_sys::Date;
use slip_reader_common::{INVALID_DATE, NOT_AVAILABLE};
use wasm_bindgen::JsValue;

/// ブラウザの既定ロケール
const DEFAULT_LOCALE: &str = "default";

/// サーバーの日時文字列をロケール表記に整形
///
/// 欠損・空白は "N/A"、ブラウザが解釈できない値は "Invalid Date"。
pub fn format_locale_datetime(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    let date = Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        return INVALID_DATE.to_string();
    }
    to_locale_string(&date)
}

/// 現在日時のロケール表記
pub fn now_locale_string() -> String {
    to_locale_string(&Date::new_0())
}

fn to_locale_string(date: &Date) -> String {
    date.to_locale_string(DEFAULT_LOCALE, &JsValue::UNDEFINED).into()
}
