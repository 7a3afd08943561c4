//! Timeline production pipeline.
//!
//! This crate provides:
//! - The produce pipeline: avatar synthesis, voiceovers, asset staging,
//!   transition planning, and rendering
//! - A file-existence artifact cache keyed by story slug
//! - Per-story lock files so concurrent runs cannot collide
//! - Progress reporting over a channel and structured logs

pub mod assets;
pub mod avatar;
pub mod cache;
pub mod config;
pub mod error;
pub mod lock;
pub mod metrics;
pub mod produce;
pub mod progress;
pub mod render;
pub mod resolve;
pub mod services;
pub mod transitions;
pub mod voiceover;

pub use cache::{ArtifactCache, ArtifactKind};
pub use config::{PipelineConfig, StudioConfig};
pub use error::{ProduceError, ProduceResult};
pub use produce::ProducePipeline;
pub use progress::{ProducePhase, ProgressEvent, ProgressReporter};
pub use render::{RenderBackend, RenderProps, StudioRenderer};
pub use services::{AvatarProvider, StudioServices, VoiceProvider};
