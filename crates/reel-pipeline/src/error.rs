//! Pipeline error types.

use thiserror::Error;

pub type ProduceResult<T> = Result<T, ProduceError>;

#[derive(Debug, Error)]
pub enum ProduceError {
    #[error("No timeline found for story {0}")]
    TimelineNotFound(String),

    #[error("Studio config missing {field}. Set it in the environment or .env.")]
    MissingCredential { field: &'static str },

    #[error("Another production run holds the lock for {slug}")]
    ProductionLocked { slug: String },

    #[error("HeyGen failed for shot {shot_id} (job {job_id}): {message}")]
    AvatarJobFailed {
        shot_id: u32,
        job_id: String,
        message: String,
    },

    #[error("HeyGen timed out for shot {shot_id} (job {job_id}) after {polls} polls")]
    AvatarJobTimeout {
        shot_id: u32,
        job_id: String,
        polls: u32,
    },

    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error("Synthesis error: {0}")]
    Synth(#[from] reel_synth::SynthError),

    #[error("Media error: {0}")]
    Media(#[from] reel_media::MediaError),

    #[error("Vault error: {0}")]
    Vault(#[from] reel_vault::VaultError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProduceError {
    pub fn missing_credential(field: &'static str) -> Self {
        Self::MissingCredential { field }
    }

    pub fn avatar_failed(
        shot_id: u32,
        job_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::AvatarJobFailed {
            shot_id,
            job_id: job_id.into(),
            message: message.into(),
        }
    }

    pub fn avatar_timeout(shot_id: u32, job_id: impl Into<String>, polls: u32) -> Self {
        Self::AvatarJobTimeout {
            shot_id,
            job_id: job_id.into(),
            polls,
        }
    }

    pub fn render_failed(msg: impl Into<String>) -> Self {
        Self::RenderFailed(msg.into())
    }
}
