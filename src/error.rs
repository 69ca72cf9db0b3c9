use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlipReaderError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("スリップ画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("全てのアップロードに失敗しました（{0}件）")]
    AllUploadsFailed(usize),

    #[error(transparent)]
    Common(#[from] slip_reader_common::Error),
}

pub type Result<T> = std::result::Result<T, SlipReaderError>;
