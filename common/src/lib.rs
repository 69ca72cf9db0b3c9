//! Slip Reader Common Library
//!
//! CLIとWeb(WASM)で共有される型・表示整形・アップロード画面の状態

pub mod types;
pub mod error;
pub mod parser;
pub mod format;
pub mod upload;
pub mod view;

pub use types::{ExtractedResult, ServiceStatus};
pub use error::{Error, Result};
pub use parser::{extract_from_value, parse_extraction_response};
pub use format::{
    display_text, format_amount, format_datetime, format_datetime_in, result_rows,
    result_rows_in, result_rows_with, ResultRow, DATETIME_DISPLAY_FORMAT, INVALID_DATE,
    NOT_AVAILABLE,
};
pub use upload::{mime_for_file_name, DEFAULT_ENDPOINT, UPLOAD_FIELD_NAME};
pub use view::{PreviewHandle, PreviewProvider, SlipUploadView, SubmitStatus, SubmitTicket, UploadPhase};
