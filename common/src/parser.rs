//! 抽出サーバーのレスポンス解析

use crate::error::{Error, Result};
use crate::types::ExtractedResult;
use serde_json::Value;

/// サーバーが結果を包むキー（`{"extracted_data": {...}}`）
const ENVELOPE_KEY: &str = "extracted_data";

/// レスポンス本文をExtractedResultに変換
///
/// フラットなオブジェクトと `extracted_data` で包まれた形式の両方を受け付ける。
/// オブジェクト以外（配列、null、文字列など）は不正なレスポンスとしてエラー。
pub fn parse_extraction_response(body: &str) -> Result<ExtractedResult> {
    let value: Value = serde_json::from_str(body.trim())?;
    extract_from_value(value)
}

/// 解析済みJSON値からExtractedResultを取り出す
pub fn extract_from_value(value: Value) -> Result<ExtractedResult> {
    let payload = match value {
        Value::Object(mut map) => match map.remove(ENVELOPE_KEY) {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert(ENVELOPE_KEY.to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => {
            return Err(Error::Parse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(serde_json::from_value(payload)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
