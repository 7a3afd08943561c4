//! Audio track extraction from synthesized video clips.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Pulls the audio track out of a video file.
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Extract the audio of `video` into `audio_out` as MP3.
    async fn extract_audio(&self, video: &Path, audio_out: &Path) -> MediaResult<()>;
}

/// FFmpeg-backed extractor.
///
/// Skips the extraction entirely when the output already exists, so
/// repeated runs over a warm cache never shell out.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegExtractor;

#[async_trait]
impl AudioExtractor for FfmpegExtractor {
    async fn extract_audio(&self, video: &Path, audio_out: &Path) -> MediaResult<()> {
        if audio_out.exists() {
            debug!("Audio track already extracted: {}", audio_out.display());
            return Ok(());
        }
        if !video.exists() {
            return Err(MediaError::FileNotFound(video.to_path_buf()));
        }

        check_ffmpeg()?;
        debug!(
            "Extracting audio: {} -> {}",
            video.display(),
            audio_out.display()
        );

        let output = Command::new("ffmpeg")
            .arg("-i")
            .arg(video)
            .args(["-vn", "-acodec", "libmp3lame", "-q:a", "2"])
            .arg(audio_out)
            .arg("-y")
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(MediaError::ffmpeg_failed(
                "FFmpeg audio extraction failed",
                Some(stderr),
                output.status.code(),
            ));
        }

        info!("Extracted audio track to {}", audio_out.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_extract_skips_when_audio_exists() {
        let tmp = TempDir::new().unwrap();
        let video = tmp.path().join("shot-1.mp4");
        let audio = tmp.path().join("shot-1.mp3");
        std::fs::write(&audio, b"already here").unwrap();

        // Never shells out, so a missing video file is fine
        FfmpegExtractor
            .extract_audio(&video, &audio)
            .await
            .unwrap();
        assert_eq!(std::fs::read(&audio).unwrap(), b"already here");
    }

    #[tokio::test]
    async fn test_extract_missing_video_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let video = tmp.path().join("absent.mp4");
        let audio = tmp.path().join("absent.mp3");

        let err = FfmpegExtractor
            .extract_audio(&video, &audio)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
