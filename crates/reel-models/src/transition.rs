//! Transitions between consecutive shots.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Visual transition played on a shot's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionType {
    Fade,
    Slide,
    Wipe,
    LightLeak,
    None,
}

impl TransitionType {
    /// Whether the transition blends into the previous shot.
    ///
    /// Overlapping transitions consume frames from the running timeline
    /// position; overlay transitions play on top without shifting it.
    pub fn is_overlapping(&self) -> bool {
        matches!(
            self,
            TransitionType::Fade | TransitionType::Slide | TransitionType::Wipe
        )
    }
}

/// Transition assigned to a shot's entry edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionConfig {
    /// Transition kind
    #[serde(rename = "type")]
    pub transition_type: TransitionType,
    /// Length of the transition in frames
    pub duration_in_frames: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_classification() {
        assert!(TransitionType::Fade.is_overlapping());
        assert!(TransitionType::Slide.is_overlapping());
        assert!(TransitionType::Wipe.is_overlapping());
        assert!(!TransitionType::LightLeak.is_overlapping());
        assert!(!TransitionType::None.is_overlapping());
    }

    #[test]
    fn test_wire_shape() {
        let config = TransitionConfig {
            transition_type: TransitionType::LightLeak,
            duration_in_frames: 30,
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["type"], "light-leak");
        assert_eq!(json["durationInFrames"], 30);
    }
}
