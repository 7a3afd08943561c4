//! Frame timing for the studio compositions.

/// Frames per second of every composition.
pub const FPS: u32 = 30;

/// Frame length of a fade transition.
pub const TRANSITION_FADE_FRAMES: u32 = 15;

/// Frame length of a slide transition.
pub const TRANSITION_SLIDE_FRAMES: u32 = 20;

/// Frame length of an overlay transition (light leak).
pub const TRANSITION_OVERLAY_FRAMES: u32 = 30;

/// Convert a duration in seconds to whole frames, never below one.
pub fn duration_to_frames(seconds: f64) -> u32 {
    let frames = (seconds * f64::from(FPS)).round() as i64;
    frames.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_to_frames_rounds() {
        assert_eq!(duration_to_frames(3.0), 90);
        assert_eq!(duration_to_frames(2.5), 75);
        assert_eq!(duration_to_frames(4.984), 150);
        assert_eq!(duration_to_frames(4.981), 149);
    }

    #[test]
    fn test_duration_to_frames_floors_at_one() {
        assert_eq!(duration_to_frames(0.0), 1);
        assert_eq!(duration_to_frames(0.01), 1);
    }
}
