//! Story asset staging and media kind detection.

use std::path::Path;

use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// File extensions treated as video.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "avi", "mkv"];

/// File extensions treated as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Broad media kind of an asset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// Classify an asset filename by its extension.
///
/// Anything that is not a known video extension counts as an image,
/// which is how the renderer treats unknown files too.
pub fn detect_media_kind(filename: &str) -> MediaKind {
    let ext = Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

/// Copy an asset into the production cache.
///
/// Returns the number of bytes copied.
pub async fn stage_asset(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> MediaResult<u64> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    if !source.exists() {
        return Err(MediaError::FileNotFound(source.to_path_buf()));
    }
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let bytes = tokio::fs::copy(source, dest).await?;
    debug!(
        "Staged asset {} -> {} ({} bytes)",
        source.display(),
        dest.display(),
        bytes
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_media_kind() {
        assert_eq!(detect_media_kind("demo.mp4"), MediaKind::Video);
        assert_eq!(detect_media_kind("DEMO.MOV"), MediaKind::Video);
        assert_eq!(detect_media_kind("chart.png"), MediaKind::Image);
        assert_eq!(detect_media_kind("notes.pdf"), MediaKind::Image);
        assert_eq!(detect_media_kind("no-extension"), MediaKind::Image);
    }

    #[tokio::test]
    async fn test_stage_asset_copies_into_new_directory() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("screenshot.png");
        std::fs::write(&source, b"pixels").unwrap();

        let dest = tmp.path().join("cache/story/asset-2.png");
        let bytes = stage_asset(&source, &dest).await.unwrap();

        assert_eq!(bytes, 6);
        assert_eq!(std::fs::read(&dest).unwrap(), b"pixels");
    }

    #[tokio::test]
    async fn test_stage_asset_missing_source() {
        let tmp = TempDir::new().unwrap();
        let err = stage_asset(tmp.path().join("nope.png"), tmp.path().join("out.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
