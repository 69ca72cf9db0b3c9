//! スリップアップロード画面の状態
//!
//! ファイル選択（ピッカー/ドラッグ&ドロップ）→ プレビュー → 送信 → 結果表示
//! の状態遷移を、UI実装（Leptos / CLI）から切り離して保持する。
//!
//! ```text
//! Idle --select--> FileChosen --submit--> Submitting --response--> IdleWithResult
//!   ^                  ^                                                |
//!   +------clear-------+<-------------------select/drop-----------------+
//! ```

use crate::error::Result;
use crate::types::ExtractedResult;
use std::future::Future;

/// プレビュー用の一時参照（ブラウザのobject URLなど）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

/// プレビュー参照の生成と解放
pub trait PreviewProvider<F> {
    fn create(&self, file: &F) -> PreviewHandle;

    fn release(&self, handle: &PreviewHandle);
}

/// 画面のフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    FileChosen,
    Submitting,
    IdleWithResult,
}

/// 送信結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// ファイル未選択、または送信中のため何もしなかった
    Skipped,
    /// 結果を受け取り表示対象にした
    Extracted,
    /// 送信または解析に失敗（結果は据え置き）
    Failed,
    /// 送信中に別ファイルが選択されたため応答を破棄
    Discarded,
}

/// 送信中の1リクエスト
///
/// `begin_submit` で受け取り、応答後に `finish_submit` へ返す。
#[derive(Debug)]
pub struct SubmitTicket<F> {
    file: F,
    generation: u64,
}

impl<F> SubmitTicket<F> {
    pub fn file(&self) -> &F {
        &self.file
    }
}

/// アップロード画面の状態
#[derive(Debug, Clone)]
pub struct SlipUploadView<F> {
    selected: Option<F>,
    preview: Option<PreviewHandle>,
    result: Option<ExtractedResult>,
    loading: bool,
    drag_active: bool,
    last_error: Option<String>,
    /// ファイル選択ごとに増える世代番号
    generation: u64,
}

impl<F> Default for SlipUploadView<F> {
    fn default() -> Self {
        Self {
            selected: None,
            preview: None,
            result: None,
            loading: false,
            drag_active: false,
            last_error: None,
            generation: 0,
        }
    }
}

impl<F> SlipUploadView<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&ExtractedResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.loading
    }

    pub fn phase(&self) -> UploadPhase {
        if self.loading {
            UploadPhase::Submitting
        } else if self.result.is_some() {
            UploadPhase::IdleWithResult
        } else if self.selected.is_some() {
            UploadPhase::FileChosen
        } else {
            UploadPhase::Idle
        }
    }

    /// ファイルを選択（前回の結果とプレビューは破棄）
    pub fn select_file<P>(&mut self, file: F, previews: &P)
    where
        P: PreviewProvider<F> + ?Sized,
    {
        self.release_preview(previews);
        self.preview = Some(previews.create(&file));
        self.selected = Some(file);
        self.result = None;
        self.last_error = None;
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(generation = self.generation, "slip file selected");
    }

    pub fn drag_enter(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_over(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// ドロップされたファイルの先頭を選択
    ///
    /// ファイルを含まないドロップはドラッグ状態の解除のみ。
    pub fn drop_files<I, P>(&mut self, files: I, previews: &P) -> bool
    where
        I: IntoIterator<Item = F>,
        P: PreviewProvider<F> + ?Sized,
    {
        self.drag_active = false;
        match files.into_iter().next() {
            Some(file) => {
                self.select_file(file, previews);
                true
            }
            None => false,
        }
    }

    /// 「Change」: 選択ファイルとプレビューを外す（結果は残す）
    pub fn clear<P>(&mut self, previews: &P)
    where
        P: PreviewProvider<F> + ?Sized,
    {
        self.release_preview(previews);
        self.selected = None;
    }

    /// 画面破棄時にプレビュー参照を解放
    pub fn dispose<P>(&mut self, previews: &P)
    where
        P: PreviewProvider<F> + ?Sized,
    {
        self.release_preview(previews);
    }

    fn release_preview<P>(&mut self, previews: &P)
    where
        P: PreviewProvider<F> + ?Sized,
    {
        if let Some(handle) = self.preview.take() {
            previews.release(&handle);
        }
    }

    /// 送信開始
    ///
    /// ファイル未選択または送信中なら `None`（状態は変えない）。
    pub fn begin_submit(&mut self) -> Option<SubmitTicket<F>>
    where
        F: Clone,
    {
        if self.loading {
            tracing::debug!("submit ignored: request already in flight");
            return None;
        }
        let file = self.selected.clone()?;
        self.loading = true;
        self.last_error = None;
        Some(SubmitTicket {
            file,
            generation: self.generation,
        })
    }

    /// 送信完了（成功・失敗とも送信中フラグを下ろす）
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket<F>,
        outcome: Result<ExtractedResult>,
    ) -> SubmitStatus {
        self.loading = false;

        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding response for a replaced slip"
            );
            return SubmitStatus::Discarded;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                SubmitStatus::Extracted
            }
            Err(err) => {
                tracing::error!(error = %err, "Error uploading file");
                self.last_error = Some(err.to_string());
                SubmitStatus::Failed
            }
        }
    }

    /// 送信して応答を待つ
    ///
    /// `send` はファイルを受け取り抽出結果を返す非同期処理。
    pub async fn submit<S, Fut>(&mut self, send: S) -> SubmitStatus
    where
        F: Clone,
        S: FnOnce(F) -> Fut,
        Fut: Future<Output = Result<ExtractedResult>>,
    {
        let Some(ticket) = self.begin_submit() else {
            return SubmitStatus::Skipped;
        };
        let outcome = send(ticket.file.clone()).await;
        self.finish_submit(ticket, outcome)
    }
}
