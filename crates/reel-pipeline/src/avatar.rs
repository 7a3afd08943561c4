//! Avatar clip synthesis stage.
//!
//! Uncached avatar shots are submitted to the provider in small
//! batches. Each job is followed from submission through polling to
//! download, and a batch fully settles before the next one starts, so
//! the provider never sees more than the configured number of
//! concurrent jobs.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info};

use reel_media::AudioExtractor;
use reel_models::{Shot, ShotType};
use reel_synth::{AvatarJobState, AvatarRequest, AvatarSynth};

use crate::cache::{ArtifactCache, ArtifactKind};
use crate::error::{ProduceError, ProduceResult};
use crate::metrics;
use crate::progress::{ProducePhase, ProgressReporter};
use crate::services::AvatarProvider;

/// Avatar synthesis over one timeline's shots.
pub struct AvatarStage<'a> {
    pub avatar: &'a AvatarProvider,
    pub extractor: &'a dyn AudioExtractor,
    pub cache: &'a ArtifactCache,
    /// ElevenLabs voice the avatar speaks through, when linked
    pub voice_id: Option<&'a str>,
    pub poll_interval: Duration,
    pub max_polls: u32,
    pub max_concurrent: usize,
    pub progress: &'a ProgressReporter,
}

impl AvatarStage<'_> {
    /// Ensure every avatar shot has a clip in the cache.
    pub async fn run(&self, slug: &str, shots: &[Shot]) -> ProduceResult<()> {
        let avatar_shots: Vec<&Shot> = shots
            .iter()
            .filter(|s| s.shot_type == ShotType::Avatar)
            .collect();
        if avatar_shots.is_empty() {
            return Ok(());
        }

        let mut uncached = Vec::new();
        for shot in avatar_shots {
            let kind = ArtifactKind::AvatarVideo { shot_id: shot.id };
            if self.cache.contains(slug, &kind) {
                debug!(slug = %slug, shot_id = shot.id, "Avatar clip already produced");
                metrics::record_avatar_cache_hit();
                // A cached clip can still be missing its audio track
                self.ensure_audio_track(slug, shot.id).await;
            } else {
                uncached.push(shot);
            }
        }
        if uncached.is_empty() {
            return Ok(());
        }

        let synth = self.avatar.get()?;
        self.progress.update(
            slug,
            ProducePhase::Avatars,
            format!("Synthesizing {} avatar clips", uncached.len()),
        );

        for batch in uncached.chunks(self.max_concurrent.max(1)) {
            let results = join_all(
                batch
                    .iter()
                    .map(|shot| self.produce_clip(synth.as_ref(), slug, shot)),
            )
            .await;

            // join_all keeps input order, so the earliest failed shot
            // surfaces first
            for result in results {
                result?;
            }
        }

        Ok(())
    }

    /// Submit one shot, follow it to completion, download the clip.
    async fn produce_clip(
        &self,
        synth: &dyn AvatarSynth,
        slug: &str,
        shot: &Shot,
    ) -> ProduceResult<()> {
        let request = AvatarRequest {
            script: shot.script.clone().unwrap_or_default(),
            title: format!("{} / shot-{} / {}", slug, shot.id, shot.beat),
            voice_id: self.voice_id.map(str::to_string),
        };

        let job_id = synth.submit(&request).await?;
        info!(slug = %slug, shot_id = shot.id, job_id = %job_id, "Avatar job queued");

        let mut polls = 0u32;
        let video_url = loop {
            metrics::record_avatar_poll();
            match synth.poll(&job_id).await? {
                AvatarJobState::Completed { video_url } => break video_url,
                AvatarJobState::Failed { error } => {
                    return Err(ProduceError::avatar_failed(
                        shot.id,
                        &job_id,
                        error.unwrap_or_else(|| "no detail from provider".to_string()),
                    ));
                }
                AvatarJobState::InProgress => {}
            }
            polls += 1;
            if polls >= self.max_polls {
                return Err(ProduceError::avatar_timeout(shot.id, &job_id, self.max_polls));
            }
            tokio::time::sleep(self.poll_interval).await;
        };

        let video_path = self
            .cache
            .path(slug, &ArtifactKind::AvatarVideo { shot_id: shot.id });
        synth.download(&video_url, &video_path).await?;
        metrics::record_avatar_synthesized();
        info!(slug = %slug, shot_id = shot.id, "Avatar clip produced");

        self.ensure_audio_track(slug, shot.id).await;
        Ok(())
    }

    /// Extract the clip's audio track for the renderer.
    ///
    /// Failures are warnings: the renderer falls back to the clip's
    /// embedded audio when no extracted track exists.
    async fn ensure_audio_track(&self, slug: &str, shot_id: u32) {
        let video = self
            .cache
            .path(slug, &ArtifactKind::AvatarVideo { shot_id });
        let audio = self
            .cache
            .path(slug, &ArtifactKind::AvatarAudio { shot_id });

        if let Err(e) = self.extractor.extract_audio(&video, &audio).await {
            self.progress.warn(
                slug,
                ProducePhase::Avatars,
                format!("Audio extraction failed for shot {}: {}", shot_id, e),
            );
        }
    }
}
