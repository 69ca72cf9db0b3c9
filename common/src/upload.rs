//! 抽出サーバーへのアップロード定数とヘルパー

use std::path::Path;

/// 抽出エンドポイント（固定）
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/api/upload";

/// multipartで画像を載せるフィールド名
pub const UPLOAD_FIELD_NAME: &str = "file";

/// ファイル名の拡張子からMIMEタイプを推定
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_file_name() {
        assert_eq!(mime_for_file_name("receipt.jpg"), "image/jpeg");
        assert_eq!(mime_for_file_name("RECEIPT.JPEG"), "image/jpeg");
        assert_eq!(mime_for_file_name("slip.png"), "image/png");
        assert_eq!(mime_for_file_name("slip.webp"), "image/webp");
        assert_eq!(mime_for_file_name("notes.txt"), "application/octet-stream");
        assert_eq!(mime_for_file_name("no_extension"), "application/octet-stream");
    }
}
