//! Timeline documents and their production status.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shot::Shot;

/// Production status of a timeline.
///
/// Authoring moves a timeline from `draft` to `approved`; production
/// flips it to `producing` for the duration of a run and leaves it at
/// `rendered` on success or back at `draft` on failure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStatus {
    #[default]
    Draft,
    Approved,
    Producing,
    Rendered,
}

impl TimelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineStatus::Draft => "draft",
            TimelineStatus::Approved => "approved",
            TimelineStatus::Producing => "producing",
            TimelineStatus::Rendered => "rendered",
        }
    }
}

impl fmt::Display for TimelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// YAML frontmatter of a timeline document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFrontmatter {
    /// Video title
    pub title: String,

    /// Document discriminator, always "timeline"
    #[serde(rename = "type", default = "default_doc_type")]
    pub doc_type: String,

    /// Production status
    #[serde(default)]
    pub status: TimelineStatus,

    /// Source story this timeline was cut from
    pub source: String,

    /// Opening hook line
    pub hook: String,

    /// Narrative structure label
    pub structure: String,

    /// Persuasion techniques used
    #[serde(default)]
    pub persuasion: Vec<String>,

    /// Target platform
    pub platform: String,

    /// Intended length in seconds
    pub target_duration: u32,

    /// The shot list
    pub shots: Vec<Shot>,
}

fn default_doc_type() -> String {
    "timeline".to_string()
}

/// A timeline document read from the vault.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Filename the document was read from (video-*.md or timeline.md)
    pub filename: String,
    /// Path relative to the stories directory
    pub path: String,
    /// Parsed frontmatter including shots
    pub frontmatter: TimelineFrontmatter,
    /// Markdown content below the frontmatter (director's notes)
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shot::{ShotType, StoryBeat};

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TimelineStatus::Producing).unwrap(),
            "\"producing\""
        );
        assert_eq!(TimelineStatus::Rendered.to_string(), "rendered");
        assert_eq!(TimelineStatus::default(), TimelineStatus::Draft);
    }

    #[test]
    fn test_frontmatter_round_trip() {
        let frontmatter = TimelineFrontmatter {
            title: "Launch Story".to_string(),
            doc_type: "timeline".to_string(),
            status: TimelineStatus::Approved,
            source: "launch-story".to_string(),
            hook: "We shipped in a weekend".to_string(),
            structure: "hook-setup-payoff".to_string(),
            persuasion: vec!["social-proof".to_string()],
            platform: "youtube-shorts".to_string(),
            target_duration: 45,
            shots: vec![Shot::new(1, StoryBeat::Hook, ShotType::Avatar, 5.0)],
        };

        let json = serde_json::to_value(&frontmatter).unwrap();
        assert_eq!(json["type"], "timeline");
        assert_eq!(json["targetDuration"], 45);
        assert_eq!(json["status"], "approved");

        let back: TimelineFrontmatter = serde_json::from_value(json).unwrap();
        assert_eq!(back, frontmatter);
    }
}
