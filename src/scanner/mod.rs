use crate::error::{SlipReaderError, Result};
use slip_reader_common::mime_for_file_name;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// フォルダ内のスリップ画像
#[derive(Debug, Clone)]
pub struct SlipImage {
    pub path: PathBuf,
    pub file_name: String,
}

/// アップロード対象のスリップ（メモリ上に読み込んだ画像）
#[derive(Debug, Clone)]
pub struct SlipFile {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SlipFile {
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SlipReaderError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            bytes,
        })
    }

    pub fn mime_type(&self) -> &'static str {
        mime_for_file_name(&self.file_name)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<SlipImage>> {
    if !folder.is_dir() {
        return Err(SlipReaderError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_image = path
            .extension()
            .map(|ext| is_image_extension(&ext.to_string_lossy()))
            .unwrap_or(false);

        if is_image {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            images.push(SlipImage {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name).then_with(|| a.path.cmp(&b.path)));

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("png"));
        assert!(is_image_extension("WebP"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("pdf"));
        assert!(!is_image_extension("json"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"), false);
        assert!(matches!(result, Err(SlipReaderError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images() {
        let dir = tempdir().unwrap();

        File::create(dir.path().join("slip2.JPG")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("slip1.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("slip3.png")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("readme.txt")).unwrap().write_all(b"text").unwrap();
        File::create(dir.path().join(".slip-cache.json")).unwrap().write_all(b"{}").unwrap();

        let result = scan_folder(dir.path(), false).unwrap();
        let names: Vec<&str> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["slip1.jpg", "slip2.JPG", "slip3.png"]);
    }

    #[test]
    fn test_scan_folder_recursive() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("2025-06");
        fs::create_dir_all(&nested).unwrap();

        File::create(dir.path().join("a.jpg")).unwrap();
        File::create(nested.join("b.jpg")).unwrap();

        assert_eq!(scan_folder(dir.path(), false).unwrap().len(), 1);
        assert_eq!(scan_folder(dir.path(), true).unwrap().len(), 2);
    }

    #[test]
    fn test_slip_file_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("receipt.jpg");
        fs::write(&path, b"fake-jpeg").unwrap();

        let file = SlipFile::read(&path).unwrap();
        assert_eq!(file.file_name, "receipt.jpg");
        assert_eq!(file.bytes, b"fake-jpeg");
        assert_eq!(file.mime_type(), "image/jpeg");
        assert_eq!(file.size(), 9);
    }

    #[test]
    fn test_slip_file_missing() {
        let result = SlipFile::read(Path::new("/nonexistent/receipt.jpg"));
        assert!(matches!(result, Err(SlipReaderError::FileNotFound(_))));
    }
}
