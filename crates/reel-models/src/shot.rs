//! Shot models: the authored building blocks of a timeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Narrative beat a shot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StoryBeat {
    Hook,
    Intro,
    Setup,
    Tension,
    FiveSecondMoment,
    Transformation,
    Takeaway,
    Cta,
    BRoll,
    Outro,
}

impl StoryBeat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryBeat::Hook => "hook",
            StoryBeat::Intro => "intro",
            StoryBeat::Setup => "setup",
            StoryBeat::Tension => "tension",
            StoryBeat::FiveSecondMoment => "five-second-moment",
            StoryBeat::Transformation => "transformation",
            StoryBeat::Takeaway => "takeaway",
            StoryBeat::Cta => "cta",
            StoryBeat::BRoll => "b-roll",
            StoryBeat::Outro => "outro",
        }
    }
}

impl fmt::Display for StoryBeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a shot is realized on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ShotType {
    /// Talking-head clip synthesized from the script
    Avatar,
    /// Full-frame typographic card
    TextCard,
    /// Local screenshot or screen recording from the story's assets
    ScreenCapture,
    /// Placeholder the editor fills manually later
    BRollPlaceholder,
    /// Branded opening sting
    BrandedIntro,
    /// Branded closing sting
    BrandedOutro,
}

impl ShotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Avatar => "avatar",
            ShotType::TextCard => "text-card",
            ShotType::ScreenCapture => "screen-capture",
            ShotType::BRollPlaceholder => "b-roll-placeholder",
            ShotType::BrandedIntro => "branded-intro",
            ShotType::BrandedOutro => "branded-outro",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Layout style of a text card.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum TextCardType {
    Stat,
    Quote,
    Contrast,
    List,
    #[default]
    Statement,
}

/// Provider that synthesizes a shot's narration audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum VoiceoverSource {
    Elevenlabs,
}

/// A single authored shot in a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    /// Unique ID within the timeline (1-indexed)
    pub id: u32,

    /// Narrative beat
    pub beat: StoryBeat,

    /// Shot realization
    pub shot_type: ShotType,

    /// Duration in seconds
    pub duration: f64,

    /// Spoken script, drives avatar synthesis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    /// Director's note, carried through to the renderer untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    /// On-screen text for text cards (falls back to the script)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Text card layout style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_card_type: Option<TextCardType>,

    /// Asset filename resolved against the story's assets folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,

    /// Narration text for voiceover synthesis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<String>,

    /// Narration provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voiceover_source: Option<VoiceoverSource>,
}

impl Shot {
    /// Create a bare shot.
    pub fn new(id: u32, beat: StoryBeat, shot_type: ShotType, duration: f64) -> Self {
        Self {
            id,
            beat,
            shot_type,
            duration,
            script: None,
            direction: None,
            text: None,
            text_card_type: None,
            asset: None,
            voiceover: None,
            voiceover_source: None,
        }
    }

    /// Attach a spoken script.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Attach on-screen text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach an asset filename.
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Attach narration to be synthesized.
    pub fn with_voiceover(mut self, voiceover: impl Into<String>, source: VoiceoverSource) -> Self {
        self.voiceover = Some(voiceover.into());
        self.voiceover_source = Some(source);
        self
    }

    /// Whether this shot gets synthesized narration audio.
    ///
    /// Avatar shots speak for themselves, so narration only applies to
    /// the other shot types and only when a provider is declared.
    pub fn is_narrated(&self) -> bool {
        self.shot_type != ShotType::Avatar
            && self.voiceover.is_some()
            && matches!(self.voiceover_source, Some(VoiceoverSource::Elevenlabs))
    }

    /// The asset filename, for screen-capture shots that declare one.
    pub fn screen_asset(&self) -> Option<&str> {
        if self.shot_type == ShotType::ScreenCapture {
            self.asset.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&StoryBeat::FiveSecondMoment).unwrap(),
            "\"five-second-moment\""
        );
        assert_eq!(serde_json::to_string(&StoryBeat::BRoll).unwrap(), "\"b-roll\"");
        assert_eq!(
            serde_json::to_string(&ShotType::BRollPlaceholder).unwrap(),
            "\"b-roll-placeholder\""
        );
        assert_eq!(
            serde_json::to_string(&ShotType::ScreenCapture).unwrap(),
            "\"screen-capture\""
        );
        assert_eq!(
            serde_json::to_string(&VoiceoverSource::Elevenlabs).unwrap(),
            "\"elevenlabs\""
        );
    }

    #[test]
    fn test_shot_camel_case_fields() {
        let shot = Shot::new(3, StoryBeat::Setup, ShotType::TextCard, 2.5)
            .with_text("line one\nline two");
        let json = serde_json::to_value(&shot).unwrap();
        assert_eq!(json["shotType"], "text-card");
        assert_eq!(json["duration"], 2.5);
        // None fields stay off the wire
        assert!(json.get("script").is_none());
        assert!(json.get("voiceoverSource").is_none());
    }

    #[test]
    fn test_is_narrated_requires_source_and_non_avatar() {
        let narrated = Shot::new(1, StoryBeat::Setup, ShotType::TextCard, 3.0)
            .with_voiceover("read this", VoiceoverSource::Elevenlabs);
        assert!(narrated.is_narrated());

        let mut avatar = narrated.clone();
        avatar.shot_type = ShotType::Avatar;
        assert!(!avatar.is_narrated());

        let mut no_source = narrated.clone();
        no_source.voiceover_source = None;
        assert!(!no_source.is_narrated());
    }

    #[test]
    fn test_screen_asset_only_for_screen_captures() {
        let screen = Shot::new(2, StoryBeat::Setup, ShotType::ScreenCapture, 4.0)
            .with_asset("demo.png");
        assert_eq!(screen.screen_asset(), Some("demo.png"));

        let card = Shot::new(2, StoryBeat::Setup, ShotType::TextCard, 4.0).with_asset("demo.png");
        assert_eq!(card.screen_asset(), None);
    }
}
