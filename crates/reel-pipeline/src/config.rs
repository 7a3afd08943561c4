//! Pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Credentials and IDs for the synthesis services.
///
/// All values are optional at load time; a run only demands the ones
/// its uncached work actually needs.
#[derive(Debug, Clone, Default)]
pub struct StudioConfig {
    /// HeyGen API key
    pub heygen_api_key: Option<String>,
    /// HeyGen avatar to synthesize with
    pub heygen_avatar_id: Option<String>,
    /// ElevenLabs API key
    pub elevenlabs_api_key: Option<String>,
    /// ElevenLabs voice for narration and linked avatar speech
    pub elevenlabs_voice_id: Option<String>,
}

impl StudioConfig {
    /// Load credentials from environment variables.
    pub fn from_env() -> Self {
        Self {
            heygen_api_key: env_non_empty("HEYGEN_API_KEY"),
            heygen_avatar_id: env_non_empty("HEYGEN_AVATAR_ID"),
            elevenlabs_api_key: env_non_empty("ELEVENLABS_API_KEY"),
            elevenlabs_voice_id: env_non_empty("ELEVENLABS_VOICE_ID"),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Stories vault directory
    pub stories_dir: PathBuf,
    /// Directory the renderer serves static files from
    pub public_dir: PathBuf,
    /// Production cache root, kept under the public directory so the
    /// renderer can address cached files
    pub cache_dir: PathBuf,
    /// Wait between synthesis status polls
    pub poll_interval: Duration,
    /// Polls before a synthesis job counts as timed out
    pub max_polls: u32,
    /// Avatar jobs to run against the provider at once
    pub max_concurrent_jobs: usize,
    /// Renderer composition ID
    pub composition: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let public_dir = PathBuf::from("studio/public");
        Self {
            stories_dir: PathBuf::from("vault/stories"),
            cache_dir: public_dir.join("raw"),
            public_dir,
            poll_interval: Duration::from_secs(10),
            max_polls: 120,
            max_concurrent_jobs: 3,
            composition: "DirectorCut".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let public_dir = std::env::var("STUDIO_PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("studio/public"));

        Self {
            stories_dir: std::env::var("VAULT_STORIES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("vault/stories")),
            cache_dir: public_dir.join("raw"),
            public_dir,
            poll_interval: Duration::from_secs(
                std::env::var("PRODUCE_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            max_polls: std::env::var("PRODUCE_MAX_POLLS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
            max_concurrent_jobs: std::env::var("PRODUCE_MAX_CONCURRENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            composition: std::env::var("PRODUCE_COMPOSITION")
                .unwrap_or_else(|_| "DirectorCut".to_string()),
        }
    }
}
