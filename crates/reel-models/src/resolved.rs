//! Resolved shots: the shot list as the render compositions consume it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::shot::{Shot, TextCardType};
use crate::timing;
use crate::transition::TransitionConfig;

/// Text card contents after resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextCardProps {
    /// Card layout style
    #[serde(rename = "type")]
    pub card_type: TextCardType,
    /// Lines of display text
    pub lines: Vec<String>,
}

/// An authored shot plus everything production attached to it.
///
/// The source shot is flattened so the composition sees one flat object
/// per shot. Media paths are relative to the studio's public directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedShot {
    /// The authored shot
    #[serde(flatten)]
    pub shot: Shot,

    /// Shot length in frames, always at least one
    pub duration_in_frames: u32,

    /// Frame the shot starts on. Overlapping transitions can pull this
    /// before the unshifted position, so it is signed.
    pub start_frame: i64,

    /// Video source for avatar clips and video assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_src: Option<String>,

    /// Audio source (extracted avatar track or synthesized narration)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_src: Option<String>,

    /// Image source for still assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,

    /// Whether a staged asset plays as video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_video: Option<bool>,

    /// Resolved text card contents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_card: Option<TextCardProps>,

    /// Transition into this shot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_in: Option<TransitionConfig>,
}

impl ResolvedShot {
    /// Start resolving a shot: frame length comes from the authored
    /// duration, placement and media are filled in later.
    pub fn new(shot: Shot) -> Self {
        let duration_in_frames = timing::duration_to_frames(shot.duration);
        Self {
            shot,
            duration_in_frames,
            start_frame: 0,
            video_src: None,
            audio_src: None,
            image_src: None,
            is_video: None,
            text_card: None,
            transition_in: None,
        }
    }
}
