//! Clients for the synthesis services the pipeline leans on.
//!
//! HeyGen turns a script into a talking-head avatar clip through an
//! async job API; ElevenLabs turns narration text into speech in a
//! single call. Both clients hide the wire formats behind small
//! traits so the pipeline can be driven by fakes in tests.

pub mod elevenlabs;
pub mod error;
pub mod heygen;

pub use elevenlabs::{ElevenLabsClient, VoiceInfo, VoiceSynth};
pub use error::{SynthError, SynthResult};
pub use heygen::{AvatarJobState, AvatarRequest, AvatarSynth, HeyGenClient};
