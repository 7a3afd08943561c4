//! Voiceover narration stage.

use tracing::{debug, info};

use reel_models::Shot;

use crate::cache::{ArtifactCache, ArtifactKind};
use crate::error::ProduceResult;
use crate::metrics;
use crate::progress::{ProducePhase, ProgressReporter};
use crate::services::VoiceProvider;

/// Voiceover synthesis over one timeline's shots.
pub struct VoiceoverStage<'a> {
    pub voice: &'a VoiceProvider,
    pub cache: &'a ArtifactCache,
    pub progress: &'a ProgressReporter,
}

impl VoiceoverStage<'_> {
    /// Synthesize narration for every narrated shot, one at a time in
    /// shot order.
    pub async fn run(&self, slug: &str, shots: &[Shot]) -> ProduceResult<()> {
        let narrated: Vec<&Shot> = shots.iter().filter(|s| s.is_narrated()).collect();
        if narrated.is_empty() {
            return Ok(());
        }

        let mut uncached = Vec::new();
        for shot in narrated {
            let kind = ArtifactKind::Voiceover { shot_id: shot.id };
            if self.cache.contains(slug, &kind) {
                debug!(slug = %slug, shot_id = shot.id, "Voiceover already produced");
                metrics::record_voiceover_cache_hit();
            } else {
                uncached.push(shot);
            }
        }
        if uncached.is_empty() {
            return Ok(());
        }

        let synth = self.voice.get()?;
        self.progress.update(
            slug,
            ProducePhase::Voiceovers,
            format!("Synthesizing {} voiceovers", uncached.len()),
        );

        for shot in uncached {
            let Some(text) = &shot.voiceover else { continue };

            let bytes = synth.synthesize(text).await?;
            let path = self
                .cache
                .path(slug, &ArtifactKind::Voiceover { shot_id: shot.id });
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &bytes).await?;

            metrics::record_voiceover_synthesized();
            info!(slug = %slug, shot_id = shot.id, bytes = bytes.len(), "Voiceover produced");
        }

        Ok(())
    }
}
