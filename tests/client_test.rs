//! 抽出サーバー連携テスト
//!
//! モックサーバーに対してアップロード画面の状態遷移を通しで検証

use mockito::{Matcher, Server};
use slip_reader::error::SlipReaderError;
use slip_reader::extractor::{self, FilePreviews, SlipClient};
use slip_reader::scanner::{self, SlipFile};
use slip_reader_common::{result_rows, Error, SlipUploadView, SubmitStatus, UploadPhase};
use std::path::Path;
use tempfile::tempdir;

const UPLOAD_PATH: &str = "/api/upload";

fn write_slip(dir: &Path, name: &str, content: &[u8]) -> SlipFile {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("スリップ作成失敗");
    SlipFile::read(&path).expect("スリップ読み込み失敗")
}

/// ドロップ → 送信 → 結果表示
#[tokio::test]
async fn test_drop_submit_and_render() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", UPLOAD_PATH)
        .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".to_string()))
        .match_body(Matcher::Regex(r#"name="file"; filename="receipt.jpg""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"bank":"Demo Bank","amount":250.5}"#)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let slip = write_slip(dir.path(), "receipt.jpg", b"fake-jpeg-bytes");
    let client = SlipClient::new(format!("{}{}", server.url(), UPLOAD_PATH), None).unwrap();

    let mut view = SlipUploadView::new();
    view.drag_enter();
    assert!(view.drop_files(vec![slip], &FilePreviews));
    assert!(!view.is_drag_active());
    assert!(view.preview().unwrap().url().starts_with("file://"));
    assert!(view.preview().unwrap().url().ends_with("receipt.jpg"));

    let ticket = view.begin_submit().expect("ファイル選択済みなのに送信できない");
    assert!(view.is_loading());
    assert_eq!(view.phase(), UploadPhase::Submitting);

    let outcome = client.extract(ticket.file().clone()).await;
    let status = view.finish_submit(ticket, outcome);

    assert_eq!(status, SubmitStatus::Extracted);
    assert!(!view.is_loading());
    mock.assert_async().await;

    let rows = result_rows(view.result().expect("結果がない"));
    let value = |label: &str| rows.iter().find(|r| r.label == label).unwrap().value.clone();
    assert_eq!(value("Bank"), "Demo Bank");
    assert_eq!(value("Amount"), "฿250.50");
    assert_eq!(value("Recipient"), "N/A");
    assert_eq!(value("Date & Time"), "N/A");
    assert_eq!(value("Transaction ID"), "N/A");
}

/// サーバーの `extracted_data` 形式
#[tokio::test]
async fn test_enveloped_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", UPLOAD_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"extracted_data":{"date":"2025-06-01T09:00:00","transaction_id":"015150","bank":"K-Bank","recipient":"Somchai","amount":1500}}"#,
        )
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let slip = write_slip(dir.path(), "kbank.png", b"png");
    let client = SlipClient::new(format!("{}{}", server.url(), UPLOAD_PATH), None).unwrap();

    let (view, status) = extractor::extract_one(&client, slip).await;

    assert_eq!(status, SubmitStatus::Extracted);
    let result = view.result().unwrap();
    assert_eq!(result.bank.as_deref(), Some("K-Bank"));
    assert_eq!(result.recipient_name.as_deref(), Some("Somchai"));
    assert_eq!(result.transaction_id.as_deref(), Some("015150"));
    assert_eq!(result.amount, Some(1500.0));
    // 送信後もプレビューは解放済み
    assert!(view.preview().is_none());
}

/// 2xx以外のステータスは失敗扱い
#[tokio::test]
async fn test_server_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", UPLOAD_PATH)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Internal Server Error"}"#)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let slip = write_slip(dir.path(), "receipt.jpg", b"jpeg");
    let client = SlipClient::new(format!("{}{}", server.url(), UPLOAD_PATH), None).unwrap();

    let result = client.extract(slip.clone()).await;
    assert!(matches!(result, Err(Error::Status(500))));

    let (view, status) = extractor::extract_one(&client, slip).await;
    assert_eq!(status, SubmitStatus::Failed);
    assert!(view.result().is_none());
    assert!(!view.is_loading());
    assert!(view.last_error().unwrap().contains("500"));
}

/// JSONでないレスポンス
#[tokio::test]
async fn test_non_json_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", UPLOAD_PATH)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let slip = write_slip(dir.path(), "receipt.jpg", b"jpeg");
    let client = SlipClient::new(format!("{}{}", server.url(), UPLOAD_PATH), None).unwrap();

    let (view, status) = extractor::extract_one(&client, slip).await;
    assert_eq!(status, SubmitStatus::Failed);
    assert!(view.result().is_none());
    assert!(!view.is_loading());
}

/// 到達できないエンドポイント: 送信中フラグは戻り、結果は出ない
#[tokio::test]
async fn test_unreachable_endpoint() {
    let dir = tempdir().unwrap();
    let slip = write_slip(dir.path(), "receipt.jpg", b"jpeg");
    let client = SlipClient::new("http://127.0.0.1:1/api/upload", None).unwrap();

    let mut view = SlipUploadView::new();
    view.select_file(slip, &FilePreviews);
    let ticket = view.begin_submit().unwrap();
    assert!(view.is_loading());

    let outcome = client.extract(ticket.file().clone()).await;
    assert!(matches!(outcome, Err(Error::Http(_))));

    let status = view.finish_submit(ticket, outcome);
    assert_eq!(status, SubmitStatus::Failed);
    assert!(!view.is_loading());
    assert!(view.result().is_none());
    assert_eq!(view.phase(), UploadPhase::FileChosen);
}

/// 失敗しても前回の結果は残る
#[tokio::test]
async fn test_failure_keeps_previous_result() {
    let mut server = Server::new_async().await;
    let ok_mock = server
        .mock("POST", UPLOAD_PATH)
        .with_status(200)
        .with_body(r#"{"bank":"SCB"}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let slip = write_slip(dir.path(), "receipt.jpg", b"jpeg");
    let client = SlipClient::new(format!("{}{}", server.url(), UPLOAD_PATH), None).unwrap();

    let mut view = SlipUploadView::new();
    view.select_file(slip, &FilePreviews);
    assert_eq!(view.submit(|f| client.extract(f)).await, SubmitStatus::Extracted);
    ok_mock.assert_async().await;

    let offline = SlipClient::new("http://127.0.0.1:1/api/upload", None).unwrap();
    assert_eq!(view.submit(|f| offline.extract(f)).await, SubmitStatus::Failed);
    assert_eq!(view.result().and_then(|r| r.bank.as_deref()), Some("SCB"));
}

/// サーバールートの稼働確認
#[tokio::test]
async fn test_health() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"OK","message":"Slip Reader API is running"}"#)
        .create_async()
        .await;

    let client = SlipClient::new(format!("{}{}", server.url(), UPLOAD_PATH), None).unwrap();
    let status = client.health().await.unwrap();

    assert!(status.is_ok());
    assert_eq!(status.message, "Slip Reader API is running");
}

/// サーバールートはクエリやパスを含まない
#[test]
fn test_service_root_drops_path_and_query() {
    let root = |endpoint: &str| {
        SlipClient::new(endpoint, None)
            .unwrap()
            .service_root()
            .map(|url| url.to_string())
    };

    assert_eq!(root("http://localhost:5001/api/upload").unwrap(), "http://localhost:5001/");
    assert_eq!(root("https://slips.example.com/v1/api/upload").unwrap(), "https://slips.example.com/");
    assert_eq!(root("http://localhost:5001?x=1").unwrap(), "http://localhost:5001/");
    assert_eq!(root("http://localhost:5001?token=a/b").unwrap(), "http://localhost:5001/");
    assert_eq!(root("http://127.0.0.1:8080/upload?token=a/b#frag").unwrap(), "http://127.0.0.1:8080/");
}

/// URLとして解釈できないエンドポイント
#[tokio::test]
async fn test_health_rejects_invalid_endpoint() {
    let client = SlipClient::new("not a url", None).unwrap();

    assert!(matches!(client.service_root(), Err(SlipReaderError::Config(_))));
    assert!(matches!(client.health().await, Err(SlipReaderError::Config(_))));
}

/// クエリ付きエンドポイントでもルートへ問い合わせる
#[tokio::test]
async fn test_health_with_query_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(r#"{"status":"OK","message":"up"}"#)
        .create_async()
        .await;

    let client = SlipClient::new(format!("{}/api/upload?token=a/b", server.url()), None).unwrap();
    let status = client.health().await.unwrap();

    assert!(status.is_ok());
    mock.assert_async().await;
}

/// フォルダ一括抽出とキャッシュ
#[tokio::test]
async fn test_batch_with_cache() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", UPLOAD_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"bank":"Krungthai","amount":99}"#)
        .expect(2)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    write_slip(dir.path(), "a.jpg", b"slip-a");
    write_slip(dir.path(), "b.png", b"slip-b");
    std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

    let client = SlipClient::new(format!("{}{}", server.url(), UPLOAD_PATH), None).unwrap();
    let images = scanner::scan_folder(dir.path(), false).unwrap();
    assert_eq!(images.len(), 2);

    let first = extractor::extract_folder_with_cache(&client, &images, dir.path(), false)
        .await
        .unwrap();
    assert_eq!(first.records.len(), 2);
    assert_eq!(first.cache_hits, 0);
    assert!(first.failures.is_empty());
    assert_eq!(first.records[0].file_name, "a.jpg");

    // 2回目は全てキャッシュから
    let second = extractor::extract_folder_with_cache(&client, &images, dir.path(), false)
        .await
        .unwrap();
    assert_eq!(second.records.len(), 2);
    assert_eq!(second.cache_hits, 2);
    assert_eq!(second.records[1].result.bank.as_deref(), Some("Krungthai"));

    mock.assert_async().await;
}

/// 一括抽出で失敗したファイルは記録して続行
#[tokio::test]
async fn test_batch_records_failures() {
    let dir = tempdir().unwrap();
    write_slip(dir.path(), "a.jpg", b"slip-a");

    let client = SlipClient::new("http://127.0.0.1:1/api/upload", None).unwrap();
    let images = scanner::scan_folder(dir.path(), false).unwrap();

    let outcome = extractor::extract_batch(&client, &images, None, false).await.unwrap();
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, "a.jpg");
}
