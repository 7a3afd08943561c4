//! ElevenLabs voice synthesis client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SynthError, SynthResult};

const SERVICE: &str = "ElevenLabs";
const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
const MODEL_ID: &str = "eleven_multilingual_v2";

/// Voice synthesis service.
#[async_trait]
pub trait VoiceSynth: Send + Sync {
    /// Synthesize narration text into MP3 bytes.
    async fn synthesize(&self, text: &str) -> SynthResult<Vec<u8>>;
}

/// ElevenLabs API client.
pub struct ElevenLabsClient {
    api_key: String,
    voice_id: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SpeechRequest {
    text: String,
    model_id: String,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<VoiceInfo>,
}

/// A voice available on the account.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceInfo {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl ElevenLabsClient {
    /// Create a client for the given API key and voice.
    pub fn new(api_key: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            voice_id: voice_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// List the voices available on the account.
    pub async fn voices(&self) -> SynthResult<Vec<VoiceInfo>> {
        let response = self
            .client
            .get(format!("{}/v1/voices", self.base_url))
            .header("xi-api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SynthError::api(SERVICE, status, message));
        }

        let voices: VoicesResponse = response.json().await?;
        Ok(voices.voices)
    }
}

#[async_trait]
impl VoiceSynth for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> SynthResult<Vec<u8>> {
        debug!(chars = text.len(), "Synthesizing narration");

        let body = SpeechRequest {
            text: text.to_string(),
            model_id: MODEL_ID.to_string(),
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.base_url, self.voice_id
            ))
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SynthError::api(SERVICE, status, message));
        }

        let bytes = response.bytes().await?.to_vec();
        info!(bytes = bytes.len(), "Narration synthesized");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_synthesize_posts_text_and_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/voice-9"))
            .and(header("xi-api-key", "test-key"))
            .and(body_json(json!({
                "text": "read this aloud",
                "model_id": "eleven_multilingual_v2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3 bytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let client = ElevenLabsClient::new("test-key", "voice-9").with_base_url(server.uri());
        let bytes = client.synthesize("read this aloud").await.unwrap();
        assert_eq!(bytes, b"mp3 bytes");
    }

    #[tokio::test]
    async fn test_synthesize_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("text too long"))
            .mount(&server)
            .await;

        let client = ElevenLabsClient::new("test-key", "voice-9").with_base_url(server.uri());
        let err = client.synthesize("way too long").await.unwrap_err();
        match err {
            SynthError::Api {
                service,
                status,
                message,
            } => {
                assert_eq!(service, "ElevenLabs");
                assert_eq!(status, 422);
                assert_eq!(message, "text too long");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_voices_lists_account_voices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/voices"))
            .and(header("xi-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "voices": [
                    { "voice_id": "voice-9", "name": "Clara", "category": "premade" },
                    { "voice_id": "voice-10", "name": "Brian" }
                ]
            })))
            .mount(&server)
            .await;

        let client = ElevenLabsClient::new("test-key", "voice-9").with_base_url(server.uri());
        let voices = client.voices().await.unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].name, "Clara");
        assert_eq!(voices[1].category, None);
    }
}
