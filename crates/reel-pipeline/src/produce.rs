//! Production orchestration: stages, status transitions, rollback.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use reel_models::timing::FPS;
use reel_models::{Timeline, TimelineStatus};
use reel_vault::Vault;
use tracing::{error, info};

use crate::assets::{self, AssetStage, AssetStatus};
use crate::avatar::AvatarStage;
use crate::cache::ArtifactCache;
use crate::config::{PipelineConfig, StudioConfig};
use crate::error::{ProduceError, ProduceResult};
use crate::lock::SlugLock;
use crate::metrics;
use crate::progress::{ProducePhase, ProgressReporter};
use crate::render::{RenderBackend, RenderProps, StudioRenderer};
use crate::resolve::MediaResolver;
use crate::services::StudioServices;
use crate::transitions::{assign_transitions, recalculate_frame_offsets};
use crate::voiceover::VoiceoverStage;

/// Drives a timeline from its markdown source to a rendered video.
///
/// One pipeline instance serves all stories; per-story exclusivity is
/// enforced with a lock file at production time.
pub struct ProducePipeline {
    config: PipelineConfig,
    studio: StudioConfig,
    vault: Vault,
    cache: ArtifactCache,
    services: StudioServices,
    renderer: Arc<dyn RenderBackend>,
    progress: ProgressReporter,
}

impl ProducePipeline {
    pub fn new(config: PipelineConfig, studio: StudioConfig) -> Self {
        let vault = Vault::new(&config.stories_dir);
        let cache = ArtifactCache::new(&config.cache_dir);
        let services = StudioServices::from_config(&studio);
        let renderer = Arc::new(StudioRenderer::new(config.composition.clone()));
        Self {
            config,
            studio,
            vault,
            cache,
            services,
            renderer,
            progress: ProgressReporter::new(),
        }
    }

    /// Swap in different synthesis services.
    pub fn with_services(mut self, services: StudioServices) -> Self {
        self.services = services;
        self
    }

    /// Swap in a different render backend.
    pub fn with_renderer(mut self, renderer: Arc<dyn RenderBackend>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Report progress events through a channel as well as the log.
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    /// Slugs of every story that has a timeline.
    pub fn list_timelines(&self) -> ProduceResult<Vec<String>> {
        Ok(self.vault.list_timelines()?)
    }

    /// Check which declared assets exist on disk, without producing.
    pub fn validate_assets(&self, slug: &str) -> ProduceResult<Vec<AssetStatus>> {
        let timeline = self
            .vault
            .read_timeline(slug)?
            .ok_or_else(|| ProduceError::TimelineNotFound(slug.to_string()))?;
        Ok(assets::validate(
            &self.vault.assets_dir(slug),
            &timeline.frontmatter.shots,
        ))
    }

    /// Produce the story's newest timeline end to end.
    ///
    /// The timeline moves to `producing` for the duration of the run and
    /// lands on `rendered`; any failure rolls it back to `draft` and
    /// surfaces the original error.
    pub async fn produce(&self, slug: &str) -> ProduceResult<PathBuf> {
        let started = Instant::now();
        metrics::record_run_started();

        let _lock = SlugLock::acquire(self.cache.root(), slug)?;

        let mut timeline = self
            .vault
            .read_timeline(slug)?
            .ok_or_else(|| ProduceError::TimelineNotFound(slug.to_string()))?;

        info!(
            slug = %slug,
            timeline = %timeline.filename,
            shots = timeline.frontmatter.shots.len(),
            "Producing timeline"
        );
        self.progress.update(
            slug,
            ProducePhase::Reading,
            format!(
                "{} shots from {}",
                timeline.frontmatter.shots.len(),
                timeline.filename
            ),
        );

        self.vault
            .update_status(slug, &mut timeline, TimelineStatus::Producing)?;

        match self.run_stages(slug, &mut timeline).await {
            Ok(output) => {
                metrics::record_run_completed(started.elapsed().as_secs_f64());
                self.progress.update(
                    slug,
                    ProducePhase::Done,
                    format!("Rendered {}", output.display()),
                );
                Ok(output)
            }
            Err(err) => {
                metrics::record_run_failed();
                // The run's own error outranks rollback trouble
                if let Err(rollback) =
                    self.vault
                        .update_status(slug, &mut timeline, TimelineStatus::Draft)
                {
                    error!(
                        slug = %slug,
                        error = %rollback,
                        "Failed to roll timeline back to draft"
                    );
                }
                Err(err)
            }
        }
    }

    async fn run_stages(&self, slug: &str, timeline: &mut Timeline) -> ProduceResult<PathBuf> {
        let shots = timeline.frontmatter.shots.clone();
        self.cache.ensure_story_dir(slug)?;

        AvatarStage {
            avatar: &self.services.avatar,
            extractor: self.services.extractor.as_ref(),
            cache: &self.cache,
            voice_id: self.studio.elevenlabs_voice_id.as_deref(),
            poll_interval: self.config.poll_interval,
            max_polls: self.config.max_polls,
            max_concurrent: self.config.max_concurrent_jobs,
            progress: &self.progress,
        }
        .run(slug, &shots)
        .await?;

        VoiceoverStage {
            voice: &self.services.voice,
            cache: &self.cache,
            progress: &self.progress,
        }
        .run(slug, &shots)
        .await?;

        AssetStage {
            vault: &self.vault,
            cache: &self.cache,
            progress: &self.progress,
        }
        .run(slug, &shots)
        .await?;

        self.progress.update(
            slug,
            ProducePhase::Planning,
            "Resolving media and planning transitions",
        );
        let resolver = MediaResolver {
            cache: &self.cache,
            public_dir: &self.config.public_dir,
        };
        let mut resolved = resolver.resolve_shots(slug, &shots);
        assign_transitions(&mut resolved);
        let duration_in_frames = recalculate_frame_offsets(&mut resolved);

        let props = RenderProps {
            shots: resolved,
            title: timeline.frontmatter.title.clone(),
            duration_in_frames,
            fps: FPS,
        };
        let output = self.vault.story_dir(slug).join(format!("{slug}.mp4"));

        self.progress.update(
            slug,
            ProducePhase::Rendering,
            format!("Rendering {duration_in_frames} frames"),
        );
        let render_started = Instant::now();
        self.renderer.render(&props, &output).await?;
        metrics::record_render_duration(render_started.elapsed().as_secs_f64());

        self.vault
            .update_status(slug, timeline, TimelineStatus::Rendered)?;

        Ok(output)
    }
}
