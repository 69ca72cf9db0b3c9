//! 抽出サーバーHTTPクライアント
//!
//! - POST エンドポイント: multipart（`file`）で画像を送信
//! - GET サーバールート: 稼働確認

use crate::error::{SlipReaderError, Result};
use crate::scanner::SlipFile;
use reqwest::multipart::{Form, Part};
use slip_reader_common::{
    parse_extraction_response, Error as CommonError, ExtractedResult, ServiceStatus,
    UPLOAD_FIELD_NAME,
};
use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SlipClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SlipClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SlipReaderError::ApiCall(format!("HTTPクライアント作成エラー: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// スリップ画像を送信して抽出結果を受け取る
    ///
    /// 2xx以外のステータス、JSONでない本文はエラー。
    pub async fn extract(&self, file: SlipFile) -> slip_reader_common::Result<ExtractedResult> {
        let mime = file.mime_type();
        tracing::debug!(file = %file.file_name, bytes = file.bytes.len(), mime, endpoint = %self.endpoint, "uploading slip");

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(mime)
            .map_err(|e| CommonError::Http(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CommonError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommonError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CommonError::Http(e.to_string()))?;
        tracing::debug!(body_len = body.len(), "extraction response received");

        parse_extraction_response(&body)
    }

    /// エンドポイントと同じサーバーのルートURL（クエリ・パスは落とす）
    pub fn service_root(&self) -> Result<Url> {
        Url::parse(&self.endpoint)
            .and_then(|url| url.join("/"))
            .map_err(|e| {
                SlipReaderError::Config(format!("エンドポイントURLが不正です: {} ({})", self.endpoint, e))
            })
    }

    /// サーバールートの稼働状況を取得
    pub async fn health(&self) -> Result<ServiceStatus> {
        let url = self.service_root()?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SlipReaderError::ApiCall(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlipReaderError::ApiCall(format!("{}: HTTP {}", url, status)));
        }

        response
            .json::<ServiceStatus>()
            .await
            .map_err(|e| SlipReaderError::ApiParse(e.to_string()))
    }
}
