//! Shot resolution: cached artifacts become renderer props.

use std::path::Path;

use reel_models::{ResolvedShot, Shot, ShotType, TextCardProps};

use crate::cache::{ArtifactCache, ArtifactKind};

/// Rewrite a produced file path as a renderer static path.
///
/// The renderer serves files from the public directory, so anything
/// under it is addressed relative to it; other paths pass through.
pub fn to_static_path(public_dir: &Path, path: &Path) -> String {
    match path.strip_prefix(public_dir) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// Resolves shots against the production cache.
pub struct MediaResolver<'a> {
    pub cache: &'a ArtifactCache,
    pub public_dir: &'a Path,
}

impl MediaResolver<'_> {
    /// Resolve every shot of a timeline.
    pub fn resolve_shots(&self, slug: &str, shots: &[Shot]) -> Vec<ResolvedShot> {
        shots
            .iter()
            .map(|shot| self.resolve_shot(slug, shot))
            .collect()
    }

    fn resolve_shot(&self, slug: &str, shot: &Shot) -> ResolvedShot {
        let mut resolved = ResolvedShot::new(shot.clone());

        match shot.shot_type {
            ShotType::Avatar => {
                let video = self
                    .cache
                    .path(slug, &ArtifactKind::AvatarVideo { shot_id: shot.id });
                if video.exists() {
                    resolved.video_src = Some(self.static_path(&video));
                }
                let audio = self
                    .cache
                    .path(slug, &ArtifactKind::AvatarAudio { shot_id: shot.id });
                if audio.exists() {
                    resolved.audio_src = Some(self.static_path(&audio));
                }
            }
            ShotType::ScreenCapture => {
                if let Some(asset) = shot.screen_asset() {
                    let path = self
                        .cache
                        .path(slug, &ArtifactKind::asset_for(shot.id, asset));
                    if path.exists() {
                        let kind = reel_media::detect_media_kind(asset);
                        resolved.is_video = Some(kind.is_video());
                        if kind.is_video() {
                            resolved.video_src = Some(self.static_path(&path));
                        } else {
                            resolved.image_src = Some(self.static_path(&path));
                        }
                    }
                }
            }
            ShotType::TextCard => {
                resolved.text_card = Some(text_card_props(shot));
            }
            ShotType::BRollPlaceholder | ShotType::BrandedIntro | ShotType::BrandedOutro => {}
        }

        // Narration lands last so it wins over any other audio source
        if shot.is_narrated() {
            let voiceover = self
                .cache
                .path(slug, &ArtifactKind::Voiceover { shot_id: shot.id });
            if voiceover.exists() {
                resolved.audio_src = Some(self.static_path(&voiceover));
            }
        }

        resolved
    }

    fn static_path(&self, path: &Path) -> String {
        to_static_path(self.public_dir, path)
    }
}

fn text_card_props(shot: &Shot) -> TextCardProps {
    let text = shot
        .text
        .as_deref()
        .or(shot.script.as_deref())
        .unwrap_or_default();
    TextCardProps {
        card_type: shot.text_card_type.unwrap_or_default(),
        lines: text.lines().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::{StoryBeat, TextCardType, VoiceoverSource};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cache_with(slug: &str, files: &[&str]) -> (TempDir, ArtifactCache) {
        let tmp = TempDir::new().unwrap();
        let cache = ArtifactCache::new(tmp.path().join("raw"));
        let dir = cache.ensure_story_dir(slug).unwrap();
        for file in files {
            std::fs::write(dir.join(file), b"x").unwrap();
        }
        (tmp, cache)
    }

    #[test]
    fn test_static_path_strips_public_prefix() {
        let public = PathBuf::from("/srv/studio/public");
        assert_eq!(
            to_static_path(&public, &public.join("raw/launch/shot-1.mp4")),
            "raw/launch/shot-1.mp4"
        );
        assert_eq!(
            to_static_path(&public, Path::new("/elsewhere/clip.mp4")),
            "/elsewhere/clip.mp4"
        );
    }

    #[test]
    fn test_avatar_shot_resolves_cached_video_and_audio() {
        let (tmp, cache) = cache_with("launch", &["shot-2.mp4", "shot-2.mp3"]);
        let resolver = MediaResolver {
            cache: &cache,
            public_dir: tmp.path(),
        };

        let shot = Shot::new(2, StoryBeat::Setup, ShotType::Avatar, 5.0);
        let resolved = &resolver.resolve_shots("launch", &[shot])[0];

        assert_eq!(
            resolved.video_src.as_deref(),
            Some("raw/launch/shot-2.mp4")
        );
        assert_eq!(
            resolved.audio_src.as_deref(),
            Some("raw/launch/shot-2.mp3")
        );
    }

    #[test]
    fn test_avatar_without_extracted_audio_keeps_embedded_track() {
        let (tmp, cache) = cache_with("launch", &["shot-2.mp4"]);
        let resolver = MediaResolver {
            cache: &cache,
            public_dir: tmp.path(),
        };

        let shot = Shot::new(2, StoryBeat::Setup, ShotType::Avatar, 5.0);
        let resolved = &resolver.resolve_shots("launch", &[shot])[0];

        assert!(resolved.video_src.is_some());
        assert!(resolved.audio_src.is_none());
    }

    #[test]
    fn test_screen_capture_resolves_by_media_kind() {
        let (tmp, cache) = cache_with("launch", &["asset-3.mp4", "asset-4.png"]);
        let resolver = MediaResolver {
            cache: &cache,
            public_dir: tmp.path(),
        };

        let shots = vec![
            Shot::new(3, StoryBeat::Setup, ShotType::ScreenCapture, 4.0).with_asset("demo.mp4"),
            Shot::new(4, StoryBeat::Setup, ShotType::ScreenCapture, 4.0).with_asset("chart.png"),
        ];
        let resolved = resolver.resolve_shots("launch", &shots);

        assert_eq!(resolved[0].is_video, Some(true));
        assert_eq!(
            resolved[0].video_src.as_deref(),
            Some("raw/launch/asset-3.mp4")
        );
        assert!(resolved[0].image_src.is_none());

        assert_eq!(resolved[1].is_video, Some(false));
        assert_eq!(
            resolved[1].image_src.as_deref(),
            Some("raw/launch/asset-4.png")
        );
        assert!(resolved[1].video_src.is_none());
    }

    #[test]
    fn test_unstaged_asset_leaves_shot_bare() {
        let (tmp, cache) = cache_with("launch", &[]);
        let resolver = MediaResolver {
            cache: &cache,
            public_dir: tmp.path(),
        };

        let shot =
            Shot::new(3, StoryBeat::Setup, ShotType::ScreenCapture, 4.0).with_asset("gone.png");
        let resolved = &resolver.resolve_shots("launch", &[shot])[0];

        assert!(resolved.image_src.is_none());
        assert!(resolved.is_video.is_none());
    }

    #[test]
    fn test_text_card_splits_lines_and_falls_back_to_script() {
        let (tmp, cache) = cache_with("launch", &[]);
        let resolver = MediaResolver {
            cache: &cache,
            public_dir: tmp.path(),
        };

        let with_text = Shot::new(1, StoryBeat::Takeaway, ShotType::TextCard, 3.0)
            .with_text("Ship it\nEvery week");
        let from_script = Shot::new(2, StoryBeat::Takeaway, ShotType::TextCard, 3.0)
            .with_script("Fallback line");

        let resolved = resolver.resolve_shots("launch", &[with_text, from_script]);

        let card = resolved[0].text_card.as_ref().unwrap();
        assert_eq!(card.card_type, TextCardType::Statement);
        assert_eq!(card.lines, vec!["Ship it", "Every week"]);

        let fallback = resolved[1].text_card.as_ref().unwrap();
        assert_eq!(fallback.lines, vec!["Fallback line"]);
    }

    #[test]
    fn test_voiceover_overrides_other_audio() {
        let (tmp, cache) = cache_with("launch", &["asset-3.png", "voiceover-3.mp3"]);
        let resolver = MediaResolver {
            cache: &cache,
            public_dir: tmp.path(),
        };

        let shot = Shot::new(3, StoryBeat::Setup, ShotType::ScreenCapture, 4.0)
            .with_asset("chart.png")
            .with_voiceover("explain the chart", VoiceoverSource::Elevenlabs);
        let resolved = &resolver.resolve_shots("launch", &[shot])[0];

        assert_eq!(
            resolved.audio_src.as_deref(),
            Some("raw/launch/voiceover-3.mp3")
        );
        assert!(resolved.image_src.is_some());
    }
}
