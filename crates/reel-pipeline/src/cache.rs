//! Production artifact cache.
//!
//! Artifacts are cached purely by file existence: a file that exists
//! was produced, a file that does not was not. Deleting a story's
//! cache folder forces a full resynthesis.

use std::path::{Path, PathBuf};

/// Artifacts a production run caches per story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Synthesized avatar clip for a shot
    AvatarVideo { shot_id: u32 },
    /// Audio track extracted from an avatar clip
    AvatarAudio { shot_id: u32 },
    /// Synthesized narration for a shot
    Voiceover { shot_id: u32 },
    /// Staged story asset for a shot
    Asset { shot_id: u32, ext: String },
}

impl ArtifactKind {
    /// Asset artifact for a shot, with the cache extension derived
    /// from the source filename.
    pub fn asset_for(shot_id: u32, filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        ArtifactKind::Asset { shot_id, ext }
    }

    /// Cache filename for this artifact.
    pub fn filename(&self) -> String {
        match self {
            ArtifactKind::AvatarVideo { shot_id } => format!("shot-{shot_id}.mp4"),
            ArtifactKind::AvatarAudio { shot_id } => format!("shot-{shot_id}.mp3"),
            ArtifactKind::Voiceover { shot_id } => format!("voiceover-{shot_id}.mp3"),
            ArtifactKind::Asset { shot_id, ext } => {
                if ext.is_empty() {
                    format!("asset-{shot_id}")
                } else {
                    format!("asset-{shot_id}.{ext}")
                }
            }
        }
    }
}

/// Cache of production artifacts, one folder per story.
#[derive(Debug, Clone)]
pub struct ArtifactCache {
    root: PathBuf,
}

impl ArtifactCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for one story's artifacts.
    pub fn story_dir(&self, slug: &str) -> PathBuf {
        self.root.join(slug)
    }

    /// Path to one artifact.
    pub fn path(&self, slug: &str, kind: &ArtifactKind) -> PathBuf {
        self.story_dir(slug).join(kind.filename())
    }

    /// Whether an artifact is already produced.
    pub fn contains(&self, slug: &str, kind: &ArtifactKind) -> bool {
        self.path(slug, kind).exists()
    }

    /// Ensure a story's cache directory exists.
    pub fn ensure_story_dir(&self, slug: &str) -> std::io::Result<PathBuf> {
        let dir = self.story_dir(slug);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_filenames() {
        assert_eq!(
            ArtifactKind::AvatarVideo { shot_id: 2 }.filename(),
            "shot-2.mp4"
        );
        assert_eq!(
            ArtifactKind::AvatarAudio { shot_id: 2 }.filename(),
            "shot-2.mp3"
        );
        assert_eq!(
            ArtifactKind::Voiceover { shot_id: 5 }.filename(),
            "voiceover-5.mp3"
        );
        assert_eq!(
            ArtifactKind::asset_for(3, "Demo.MP4").filename(),
            "asset-3.mp4"
        );
        assert_eq!(ArtifactKind::asset_for(3, "notes").filename(), "asset-3");
    }

    #[test]
    fn test_contains_tracks_file_existence() {
        let tmp = TempDir::new().unwrap();
        let cache = ArtifactCache::new(tmp.path());
        let kind = ArtifactKind::AvatarVideo { shot_id: 1 };

        assert!(!cache.contains("launch", &kind));

        cache.ensure_story_dir("launch").unwrap();
        std::fs::write(cache.path("launch", &kind), b"clip").unwrap();
        assert!(cache.contains("launch", &kind));
    }
}
