//! Excel台帳生成
//!
//! 列順は抽出サーバーがシートへ追記する順（日時, 取引ID, 銀行, 受取人, 金額）に
//! 元ファイル名を加えたもの。

use crate::error::{SlipReaderError, Result};
use crate::extractor::LedgerRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "Slips";

/// (見出し, 列幅)
const LEDGER_COLUMNS: &[(&str, f64)] = &[
    ("Date & Time", 20.0),
    ("Transaction ID", 24.0),
    ("Bank", 18.0),
    ("Recipient", 28.0),
    ("Amount (THB)", 16.0),
    ("File", 28.0),
];

const AMOUNT_NUM_FORMAT: &str = "#,##0.00";

pub fn generate_ledger(records: &[LedgerRecord], output_path: &Path) -> Result<()> {
    write_ledger(records, output_path)
        .map_err(|e| SlipReaderError::ExcelGeneration(e.to_string()))
}

fn write_ledger(records: &[LedgerRecord], output_path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format(AMOUNT_NUM_FORMAT);

    for (col, (title, width)) in LEDGER_COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &header_format)?;
        sheet.set_column_width(col, *width)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = (index + 1) as u32;
        let result = &record.result;

        let text_cells = [
            (0, result.transaction_datetime.as_deref()),
            (1, result.transaction_id.as_deref()),
            (2, result.bank.as_deref()),
            (3, result.recipient_name.as_deref()),
        ];
        for (col, value) in text_cells {
            if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
                sheet.write_string(row, col, value)?;
            }
        }

        if let Some(amount) = result.amount.filter(|a| a.is_finite()) {
            sheet.write_number_with_format(row, 4, amount, &amount_format)?;
        }

        sheet.write_string(row, 5, &record.file_name)?;
    }

    sheet.set_freeze_panes(1, 0)?;
    workbook.save(output_path)?;
    Ok(())
}
