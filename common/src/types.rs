//! 抽出結果の型定義
//!
//! 抽出サーバーが返すJSONを受け取る型:
//! - ExtractedResult: スリップ1枚分の抽出フィールド（全て任意）
//! - ServiceStatus: サーバールート (`GET /`) の稼働状況

use serde::{Deserialize, Deserializer, Serialize};

/// スリップから抽出されたフィールド
///
/// サーバーは欠損フィールドを `null` で返すか、キー自体を省略する。
/// どちらも `None` として扱い、表示時に "N/A" となる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExtractedWire")]
pub struct ExtractedResult {
    pub bank: Option<String>,
    pub recipient_name: Option<String>,
    pub amount: Option<f64>,
    pub transaction_datetime: Option<String>,
    pub transaction_id: Option<String>,
}

/// 受信時の形式
///
/// バックエンドの旧キー（`recipient`, `date`）も受け付ける。
/// 両方あれば正式キーを優先。
#[derive(Deserialize, Default)]
#[serde(default)]
struct ExtractedWire {
    bank: Option<String>,
    recipient_name: Option<String>,
    recipient: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    amount: Option<f64>,
    transaction_datetime: Option<String>,
    date: Option<String>,
    transaction_id: Option<String>,
}

impl From<ExtractedWire> for ExtractedResult {
    fn from(wire: ExtractedWire) -> Self {
        Self {
            bank: wire.bank,
            recipient_name: wire.recipient_name.or(wire.recipient),
            amount: wire.amount,
            transaction_datetime: wire.transaction_datetime.or(wire.date),
            transaction_id: wire.transaction_id,
        }
    }
}

impl ExtractedResult {
    /// 全フィールドが欠損しているか（スリップ以外の画像など）
    pub fn is_empty(&self) -> bool {
        self.bank.is_none()
            && self.recipient_name.is_none()
            && self.amount.is_none()
            && self.transaction_datetime.is_none()
            && self.transaction_id.is_none()
    }
}

/// サーバーの稼働状況
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
}

impl ServiceStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok") || self.status.eq_ignore_ascii_case("healthy")
    }
}

/// 金額は数値または数値文字列（"1,500.00" など）を受け付ける
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawAmount::Number(value)) => Some(value),
        Some(RawAmount::Text(text)) => parse_amount_text(&text),
        None => None,
    })
}

fn parse_amount_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('฿')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
