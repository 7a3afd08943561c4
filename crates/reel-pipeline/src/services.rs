//! Lazily configured synthesis services.

use std::sync::Arc;

use reel_media::{AudioExtractor, FfmpegExtractor};
use reel_synth::{AvatarSynth, ElevenLabsClient, HeyGenClient, VoiceSynth};

use crate::config::StudioConfig;
use crate::error::{ProduceError, ProduceResult};

/// Avatar service, possibly unconfigured.
///
/// Missing credentials only matter once a run has uncached avatar
/// work, so construction never fails; `get` names the missing field
/// when it does.
#[derive(Clone)]
pub enum AvatarProvider {
    Configured(Arc<dyn AvatarSynth>),
    Unconfigured(&'static str),
}

impl AvatarProvider {
    pub fn get(&self) -> ProduceResult<Arc<dyn AvatarSynth>> {
        match self {
            AvatarProvider::Configured(client) => Ok(client.clone()),
            AvatarProvider::Unconfigured(field) => Err(ProduceError::missing_credential(field)),
        }
    }
}

/// Voice service, possibly unconfigured.
#[derive(Clone)]
pub enum VoiceProvider {
    Configured(Arc<dyn VoiceSynth>),
    Unconfigured(&'static str),
}

impl VoiceProvider {
    pub fn get(&self) -> ProduceResult<Arc<dyn VoiceSynth>> {
        match self {
            VoiceProvider::Configured(client) => Ok(client.clone()),
            VoiceProvider::Unconfigured(field) => Err(ProduceError::missing_credential(field)),
        }
    }
}

/// The services a production run calls on.
#[derive(Clone)]
pub struct StudioServices {
    pub avatar: AvatarProvider,
    pub voice: VoiceProvider,
    pub extractor: Arc<dyn AudioExtractor>,
}

impl StudioServices {
    /// Wire up real clients from whatever credentials are present.
    pub fn from_config(config: &StudioConfig) -> Self {
        let avatar = match (&config.heygen_api_key, &config.heygen_avatar_id) {
            (Some(api_key), Some(avatar_id)) => AvatarProvider::Configured(Arc::new(
                HeyGenClient::new(api_key.clone(), avatar_id.clone()),
            )),
            (None, _) => AvatarProvider::Unconfigured("HEYGEN_API_KEY"),
            (Some(_), None) => AvatarProvider::Unconfigured("HEYGEN_AVATAR_ID"),
        };

        let voice = match (&config.elevenlabs_api_key, &config.elevenlabs_voice_id) {
            (Some(api_key), Some(voice_id)) => VoiceProvider::Configured(Arc::new(
                ElevenLabsClient::new(api_key.clone(), voice_id.clone()),
            )),
            (None, _) => VoiceProvider::Unconfigured("ELEVENLABS_API_KEY"),
            (Some(_), None) => VoiceProvider::Unconfigured("ELEVENLABS_VOICE_ID"),
        };

        Self {
            avatar,
            voice,
            extractor: Arc::new(FfmpegExtractor),
        }
    }
}
