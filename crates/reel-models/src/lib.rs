//! Shared data models for the Reelsmith production pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Authored shots, story beats, and text cards
//! - Timeline documents and their production status
//! - Transitions between shots
//! - Resolved shots handed to the render compositions
//! - Frame timing constants

pub mod resolved;
pub mod shot;
pub mod timeline;
pub mod timing;
pub mod transition;

// Re-export common types
pub use resolved::{ResolvedShot, TextCardProps};
pub use shot::{Shot, ShotType, StoryBeat, TextCardType, VoiceoverSource};
pub use timeline::{Timeline, TimelineFrontmatter, TimelineStatus};
pub use transition::{TransitionConfig, TransitionType};
