pub mod excel;

use crate::error::Result;
use crate::extractor::LedgerRecord;
use std::path::{Path, PathBuf};

/// 台帳の既定ファイル名（拡張子なし）
pub const DEFAULT_LEDGER_NAME: &str = "slips";

/// 出力先がフォルダ（または拡張子なし）ならファイル名を補う
pub fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_LEDGER_NAME, extension))
    } else {
        output.to_path_buf()
    }
}

/// 抽出結果をJSONで保存
pub fn export_json(records: &[LedgerRecord], output: &Path) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, "json");
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(&output_path, json)?;
    Ok(output_path)
}

/// 抽出結果をExcel台帳で保存
pub fn export_ledger(records: &[LedgerRecord], output: &Path) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, "xlsx");
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    excel::generate_ledger(records, &output_path)?;
    Ok(output_path)
}
