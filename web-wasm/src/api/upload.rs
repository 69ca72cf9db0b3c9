//! 抽出サーバーへのアップロード
//!
//! FormData（フィールド名 `file`）をPOSTし、JSONレスポンスをExtractedResultに変換する。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};
use slip_reader_common::{extract_from_value, Error, ExtractedResult, Result, UPLOAD_FIELD_NAME};

/// スリップ画像をアップロードして抽出結果を受け取る
pub async fn upload_slip(endpoint: &str, file: &File) -> Result<ExtractedResult> {
    let response = send_form(endpoint, file)
        .await
        .map_err(|e| Error::Http(describe_js_error(&e)))?;

    if !response.ok() {
        return Err(Error::Status(response.status()));
    }

    let json_promise = response
        .json()
        .map_err(|e| Error::Parse(describe_js_error(&e)))?;
    let json = JsFuture::from(json_promise)
        .await
        .map_err(|e| Error::Parse(describe_js_error(&e)))?;

    let value: serde_json::Value = serde_wasm_bindgen::from_value(json)
        .map_err(|e| Error::Parse(e.to_string()))?;

    extract_from_value(value)
}

async fn send_form(endpoint: &str, file: &File) -> std::result::Result<Response, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD_NAME, file, &file.name())?;

    // Content-Typeはmultipart境界付きでブラウザが設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(endpoint, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}

/// JSの例外値を文字列化
fn describe_js_error(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", value))
}
