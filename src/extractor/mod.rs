pub mod cache;
mod client;

pub use cache::{compute_file_hash, CacheFile};
pub use client::SlipClient;

use crate::error::Result;
use crate::scanner::{SlipFile, SlipImage};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use slip_reader_common::{
    ExtractedResult, PreviewHandle, PreviewProvider, SlipUploadView, SubmitStatus,
};
use std::path::Path;

/// CLIのプレビュー参照（ファイルURL、解放不要）
pub struct FilePreviews;

impl PreviewProvider<SlipFile> for FilePreviews {
    fn create(&self, file: &SlipFile) -> PreviewHandle {
        let path = std::fs::canonicalize(&file.path).unwrap_or_else(|_| file.path.clone());
        PreviewHandle::new(format!("file://{}", path.display()))
    }

    fn release(&self, _handle: &PreviewHandle) {}
}

/// 台帳の1行（スリップ1枚）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub file_name: String,
    #[serde(flatten)]
    pub result: ExtractedResult,
}

/// 一括抽出の結果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<LedgerRecord>,
    /// (ファイル名, エラー内容)
    pub failures: Vec<(String, String)>,
    pub cache_hits: usize,
}

/// スリップ1枚を選択して送信
///
/// 画面と同じ状態遷移（選択 → 送信 → 結果）を通す。
pub async fn extract_one(client: &SlipClient, file: SlipFile) -> (SlipUploadView<SlipFile>, SubmitStatus) {
    let mut view = SlipUploadView::new();
    view.select_file(file, &FilePreviews);
    let status = view.submit(|file| client.extract(file)).await;
    view.dispose(&FilePreviews);
    (view, status)
}

/// フォルダ内のスリップを順番に送信
///
/// 失敗したファイルは記録して次へ進む。
pub async fn extract_batch(
    client: &SlipClient,
    images: &[SlipImage],
    mut cache: Option<&mut CacheFile>,
    show_progress: bool,
) -> Result<BatchOutcome> {
    let progress = if show_progress {
        let bar = ProgressBar::new(images.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut outcome = BatchOutcome::default();

    for image in images {
        progress.set_message(image.file_name.clone());

        let file = match SlipFile::read(&image.path) {
            Ok(file) => file,
            Err(e) => {
                outcome.failures.push((image.file_name.clone(), e.to_string()));
                progress.inc(1);
                continue;
            }
        };

        let hash = compute_file_hash(&file.bytes);
        if let Some(cached) = cache.as_deref().and_then(|c| c.get(&hash)) {
            tracing::debug!(file = %image.file_name, "cache hit");
            outcome.records.push(LedgerRecord {
                file_name: image.file_name.clone(),
                result: cached.clone(),
            });
            outcome.cache_hits += 1;
            progress.inc(1);
            continue;
        }

        let file_size = file.size();
        let (view, status) = extract_one(client, file).await;

        match (status, view.result()) {
            (SubmitStatus::Extracted, Some(result)) => {
                if let Some(cache) = cache.as_deref_mut() {
                    cache.insert(hash, image.file_name.clone(), file_size, result.clone());
                }
                outcome.records.push(LedgerRecord {
                    file_name: image.file_name.clone(),
                    result: result.clone(),
                });
            }
            _ => {
                let reason = view.last_error().unwrap_or("upload skipped").to_string();
                tracing::warn!(file = %image.file_name, error = %reason, "slip extraction failed");
                outcome.failures.push((image.file_name.clone(), reason));
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(outcome)
}

/// キャッシュを読み込み、一括抽出後に保存
pub async fn extract_folder_with_cache(
    client: &SlipClient,
    images: &[SlipImage],
    folder: &Path,
    show_progress: bool,
) -> Result<BatchOutcome> {
    let mut cache = CacheFile::load(folder);
    let outcome = extract_batch(client, images, Some(&mut cache), show_progress).await?;
    cache.save(folder)?;
    Ok(outcome)
}
