//! object URLによるプレビュー参照

use slip_reader_common::{PreviewHandle, PreviewProvider};
use web_sys::{File, Url};

/// `URL.createObjectURL` / `URL.revokeObjectURL` で管理するプレビュー
pub struct ObjectUrlPreviews;

impl PreviewProvider<File> for ObjectUrlPreviews {
    fn create(&self, file: &File) -> PreviewHandle {
        match Url::create_object_url_with_blob(file) {
            Ok(url) => PreviewHandle::new(url),
            Err(err) => {
                // 壊れたプレビューとして表示される（アップロードは可能）
                web_sys::console::error_2(&"Error creating preview:".into(), &err);
                PreviewHandle::new(String::new())
            }
        }
    }

    fn release(&self, handle: &PreviewHandle) {
        if !handle.url().is_empty() {
            let _ = Url::revoke_object_url(handle.url());
        }
    }
}
