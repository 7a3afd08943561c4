//! HeyGen avatar synthesis client.
//!
//! HeyGen renders avatar clips through an async job API: one call
//! queues the video, then status polling reports progress until a
//! download URL appears.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SynthError, SynthResult};

const SERVICE: &str = "HeyGen";
const DEFAULT_BASE_URL: &str = "https://api.heygen.com";
const AVATAR_STYLE: &str = "normal";
const BACKGROUND_COLOR: &str = "#FFFFFF";
const VIDEO_WIDTH: u32 = 1920;
const VIDEO_HEIGHT: u32 = 1080;

/// What the pipeline asks HeyGen to synthesize.
#[derive(Debug, Clone)]
pub struct AvatarRequest {
    /// Script the avatar speaks
    pub script: String,
    /// Title shown in the HeyGen dashboard
    pub title: String,
    /// ElevenLabs voice to speak with, when the account links one
    pub voice_id: Option<String>,
}

/// Where an avatar job currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarJobState {
    /// Queued or rendering, keep polling
    InProgress,
    /// Finished with a downloadable video
    Completed { video_url: String },
    /// The provider gave up on the job
    Failed { error: Option<String> },
}

/// Avatar synthesis service.
#[async_trait]
pub trait AvatarSynth: Send + Sync {
    /// Queue an avatar video, returning the provider's job ID.
    async fn submit(&self, request: &AvatarRequest) -> SynthResult<String>;

    /// Check on a queued job.
    ///
    /// A job reported completed before its download URL exists still
    /// counts as in progress.
    async fn poll(&self, video_id: &str) -> SynthResult<AvatarJobState>;

    /// Download a finished clip to a local file.
    async fn download(&self, url: &str, dest: &Path) -> SynthResult<()>;
}

/// HeyGen API client.
pub struct HeyGenClient {
    api_key: String,
    avatar_id: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    video_inputs: Vec<VideoInput>,
    dimension: Dimension,
    title: String,
}

#[derive(Debug, Serialize)]
struct VideoInput {
    character: Character,
    voice: Voice,
    background: Background,
}

#[derive(Debug, Serialize)]
struct Character {
    #[serde(rename = "type")]
    character_type: String,
    avatar_id: String,
    avatar_style: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Voice {
    /// Speak through a linked ElevenLabs voice
    Audio {
        #[serde(rename = "type")]
        voice_type: String,
        audio_type: String,
        voice_id: String,
    },
    /// Speak the script with HeyGen's own TTS
    Text {
        #[serde(rename = "type")]
        voice_type: String,
        input_text: String,
    },
}

#[derive(Debug, Serialize)]
struct Background {
    #[serde(rename = "type")]
    background_type: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct Dimension {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    data: Option<GenerateData>,
}

#[derive(Debug, Deserialize)]
struct GenerateData {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    data: Option<StatusData>,
}

#[derive(Debug, Deserialize)]
struct StatusData {
    status: WireStatus,
    video_url: Option<String>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum WireStatus {
    Pending,
    Waiting,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl HeyGenClient {
    /// Create a client for the given API key and avatar.
    pub fn new(api_key: impl Into<String>, avatar_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            avatar_id: avatar_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl AvatarSynth for HeyGenClient {
    async fn submit(&self, request: &AvatarRequest) -> SynthResult<String> {
        let voice = match &request.voice_id {
            Some(voice_id) => Voice::Audio {
                voice_type: "audio".to_string(),
                audio_type: "elevenlabs".to_string(),
                voice_id: voice_id.clone(),
            },
            None => Voice::Text {
                voice_type: "text".to_string(),
                input_text: request.script.clone(),
            },
        };

        let body = GenerateRequest {
            video_inputs: vec![VideoInput {
                character: Character {
                    character_type: "avatar".to_string(),
                    avatar_id: self.avatar_id.clone(),
                    avatar_style: AVATAR_STYLE.to_string(),
                },
                voice,
                background: Background {
                    background_type: "color".to_string(),
                    value: BACKGROUND_COLOR.to_string(),
                },
            }],
            dimension: Dimension {
                width: VIDEO_WIDTH,
                height: VIDEO_HEIGHT,
            },
            title: request.title.clone(),
        };

        debug!(title = %request.title, "Submitting avatar video");

        let response = self
            .client
            .post(format!("{}/v2/video/generate", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SynthError::api(SERVICE, status, message));
        }

        let generate: GenerateResponse = response.json().await?;
        let video_id = generate
            .data
            .and_then(|d| d.video_id)
            .ok_or_else(|| SynthError::missing_field(SERVICE, "data.video_id"))?;

        info!(video_id = %video_id, "Avatar video queued");
        Ok(video_id)
    }

    async fn poll(&self, video_id: &str) -> SynthResult<AvatarJobState> {
        let response = self
            .client
            .get(format!("{}/v1/video_status.get", self.base_url))
            .query(&[("video_id", video_id)])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SynthError::api(SERVICE, status, message));
        }

        let status: StatusResponse = response.json().await?;
        let data = status
            .data
            .ok_or_else(|| SynthError::missing_field(SERVICE, "data"))?;

        let state = match data.status {
            WireStatus::Completed => match data.video_url {
                Some(video_url) => AvatarJobState::Completed { video_url },
                // The URL can lag the completed flag
                None => AvatarJobState::InProgress,
            },
            WireStatus::Failed => AvatarJobState::Failed {
                error: data.error.map(|e| e.to_string()),
            },
            WireStatus::Pending
            | WireStatus::Waiting
            | WireStatus::Processing
            | WireStatus::Unknown => AvatarJobState::InProgress,
        };

        Ok(state)
    }

    async fn download(&self, url: &str, dest: &Path) -> SynthResult<()> {
        reel_media::download_to_file(&self.client, url, dest).await?;
        Ok(())
    }
}
