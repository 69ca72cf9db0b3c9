//! 抽出結果の表示整形
//!
//! - 金額: タイバーツ（th-TH）の通貨表記 `฿1,500.00`
//! - 日時: ローカルタイムゾーンで `1/3/2024, 17:15:00`（ブラウザはロケール表記に差し替え）
//! - 欠損値: "N/A"

use crate::types::ExtractedResult;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt::Display;

/// 欠損フィールドの表示
pub const NOT_AVAILABLE: &str = "N/A";

/// 日時として解釈できない値の表示（ブラウザの表記に合わせる）
pub const INVALID_DATE: &str = "Invalid Date";

/// 日時の表示形式
pub const DATETIME_DISPLAY_FORMAT: &str = "%-d/%-m/%Y, %H:%M:%S";

const BAHT_SIGN: char = '฿';

/// オフセットなし日時の入力形式（ローカル時刻として解釈）
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// 結果パネルの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub label: &'static str,
    pub value: String,
    /// 金額行（強調表示）
    pub emphasized: bool,
}

/// 文字列フィールドを表示用に整形（欠損・空白のみは "N/A"）
pub fn display_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// 金額をタイバーツ表記に整形
pub fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value.is_finite() => format_baht(value),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn format_baht(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, BAHT_SIGN, group_thousands(integer), fraction)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 日時を閲覧者のローカルタイムゾーンで整形
pub fn format_datetime(value: Option<&str>) -> String {
    format_datetime_in(value, &Local)
}

/// 日時を指定タイムゾーンで整形
///
/// オフセット付き（RFC 3339）はそのタイムゾーンへ変換し、
/// オフセットなしは指定タイムゾーンのローカル時刻として扱う。
pub fn format_datetime_in<Tz>(value: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    match parse_datetime(raw, tz) {
        Some(datetime) => datetime.format(DATETIME_DISPLAY_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_datetime<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(tz));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

/// 結果パネルの行を生成（ローカルタイムゾーン）
pub fn result_rows(result: &ExtractedResult) -> Vec<ResultRow> {
    result_rows_in(result, &Local)
}

/// 結果パネルの行を生成（指定タイムゾーン）
pub fn result_rows_in<Tz>(result: &ExtractedResult, tz: &Tz) -> Vec<ResultRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    result_rows_with(result, |value| format_datetime_in(value, tz))
}

/// 結果パネルの行を生成
///
/// 日時の整形は呼び出し側が決める（ブラウザはロケール表記を使う）。
pub fn result_rows_with<D>(result: &ExtractedResult, render_datetime: D) -> Vec<ResultRow>
where
    D: Fn(Option<&str>) -> String,
{
    let row = |label, value| ResultRow { label, value, emphasized: false };

    vec![
        row("Bank", display_text(result.bank.as_deref())),
        row("Recipient", display_text(result.recipient_name.as_deref())),
        ResultRow {
            label: "Amount",
            value: format_amount(result.amount),
            emphasized: true,
        },
        row("Date & Time", render_datetime(result.transaction_datetime.as_deref())),
        row("Transaction ID", display_text(result.transaction_id.as_deref())),
    ]
}
