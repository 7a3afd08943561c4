//! Transition planning and frame layout.
//!
//! Each shot gets an incoming transition chosen from its predecessor,
//! then the shots are laid onto the timeline. Overlapping transitions
//! pull a shot back over the end of the one before it; overlay
//! transitions play on top of the boundary and shift nothing.

use reel_models::timing::{
    TRANSITION_FADE_FRAMES, TRANSITION_OVERLAY_FRAMES, TRANSITION_SLIDE_FRAMES,
};
use reel_models::{ResolvedShot, Shot, ShotType, StoryBeat, TransitionConfig, TransitionType};

/// Pick the incoming transition for every shot.
///
/// The first shot never has one. After that, the first matching rule
/// wins: a branded intro or a hook hands off through a light leak,
/// crossing between the avatar and flat material slides, everything
/// else fades.
pub fn assign_transitions(shots: &mut [ResolvedShot]) {
    if let Some(first) = shots.first_mut() {
        first.transition_in = None;
    }
    for i in 1..shots.len() {
        let transition = pick_transition(&shots[i - 1].shot, &shots[i].shot);
        shots[i].transition_in = Some(transition);
    }
}

fn pick_transition(prev: &Shot, current: &Shot) -> TransitionConfig {
    if prev.shot_type == ShotType::BrandedIntro || prev.beat == StoryBeat::Hook {
        return TransitionConfig {
            transition_type: TransitionType::LightLeak,
            duration_in_frames: TRANSITION_OVERLAY_FRAMES,
        };
    }
    if crosses_avatar_boundary(prev, current) {
        return TransitionConfig {
            transition_type: TransitionType::Slide,
            duration_in_frames: TRANSITION_SLIDE_FRAMES,
        };
    }
    TransitionConfig {
        transition_type: TransitionType::Fade,
        duration_in_frames: TRANSITION_FADE_FRAMES,
    }
}

fn crosses_avatar_boundary(prev: &Shot, current: &Shot) -> bool {
    let flat = |t: ShotType| matches!(t, ShotType::TextCard | ShotType::ScreenCapture);
    (prev.shot_type == ShotType::Avatar && flat(current.shot_type))
        || (flat(prev.shot_type) && current.shot_type == ShotType::Avatar)
}

/// Lay shots onto the timeline and return the total length in frames.
///
/// Overlapping transitions subtract their duration from the running
/// position before the shot is placed, so the shot starts while its
/// predecessor is still on screen. Start frames can go negative when
/// a transition outlasts everything before it; the renderer clips
/// those. The total never reports below one frame.
pub fn recalculate_frame_offsets(shots: &mut [ResolvedShot]) -> u32 {
    let mut cursor: i64 = 0;
    for shot in shots.iter_mut() {
        if let Some(transition) = &shot.transition_in {
            if transition.transition_type.is_overlapping() {
                cursor -= i64::from(transition.duration_in_frames);
            }
        }
        shot.start_frame = cursor;
        cursor += i64::from(shot.duration_in_frames);
    }
    cursor.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(id: u32, beat: StoryBeat, shot_type: ShotType, duration: f64) -> ResolvedShot {
        ResolvedShot::new(Shot::new(id, beat, shot_type, duration))
    }

    fn transition_of(shot: &ResolvedShot) -> (TransitionType, u32) {
        let t = shot.transition_in.as_ref().unwrap();
        (t.transition_type, t.duration_in_frames)
    }

    #[test]
    fn test_intro_avatar_card_layout() {
        let mut shots = vec![
            resolved(1, StoryBeat::Intro, ShotType::BrandedIntro, 3.0),
            resolved(2, StoryBeat::Setup, ShotType::Avatar, 5.0),
            resolved(3, StoryBeat::Takeaway, ShotType::TextCard, 3.0),
        ];
        assign_transitions(&mut shots);
        let total = recalculate_frame_offsets(&mut shots);

        assert!(shots[0].transition_in.is_none());
        assert_eq!(shots[0].start_frame, 0);

        // Light leak overlays the boundary without shifting the shot
        assert_eq!(transition_of(&shots[1]), (TransitionType::LightLeak, 30));
        assert_eq!(shots[1].start_frame, 90);

        // The slide pulls the card back over the avatar's tail
        assert_eq!(transition_of(&shots[2]), (TransitionType::Slide, 20));
        assert_eq!(shots[2].start_frame, 220);

        assert_eq!(total, 310);
    }

    #[test]
    fn test_hook_beat_wins_over_avatar_boundary() {
        let mut shots = vec![
            resolved(1, StoryBeat::Hook, ShotType::Avatar, 2.0),
            resolved(2, StoryBeat::Setup, ShotType::TextCard, 2.0),
        ];
        assign_transitions(&mut shots);
        assert_eq!(transition_of(&shots[1]), (TransitionType::LightLeak, 30));
    }

    #[test]
    fn test_avatar_boundary_slides_both_directions() {
        let mut into_avatar = vec![
            resolved(1, StoryBeat::Setup, ShotType::ScreenCapture, 2.0),
            resolved(2, StoryBeat::Tension, ShotType::Avatar, 2.0),
        ];
        assign_transitions(&mut into_avatar);
        assert_eq!(transition_of(&into_avatar[1]), (TransitionType::Slide, 20));

        let mut out_of_avatar = vec![
            resolved(1, StoryBeat::Setup, ShotType::Avatar, 2.0),
            resolved(2, StoryBeat::Tension, ShotType::ScreenCapture, 2.0),
        ];
        assign_transitions(&mut out_of_avatar);
        assert_eq!(transition_of(&out_of_avatar[1]), (TransitionType::Slide, 20));
    }

    #[test]
    fn test_everything_else_fades() {
        let mut shots = vec![
            resolved(1, StoryBeat::Setup, ShotType::TextCard, 2.0),
            resolved(2, StoryBeat::Tension, ShotType::ScreenCapture, 2.0),
            resolved(3, StoryBeat::Outro, ShotType::BrandedOutro, 2.0),
        ];
        assign_transitions(&mut shots);
        assert_eq!(transition_of(&shots[1]), (TransitionType::Fade, 15));
        assert_eq!(transition_of(&shots[2]), (TransitionType::Fade, 15));
    }

    #[test]
    fn test_overlap_shortens_the_timeline() {
        let mut shots = vec![
            resolved(1, StoryBeat::Setup, ShotType::TextCard, 5.0),
            resolved(2, StoryBeat::Tension, ShotType::ScreenCapture, 5.0),
        ];
        assign_transitions(&mut shots);
        let total = recalculate_frame_offsets(&mut shots);

        assert_eq!(shots[1].start_frame, 135);
        assert_eq!(total, 285);
    }

    #[test]
    fn test_transition_longer_than_predecessor_goes_negative() {
        let mut shots = vec![
            resolved(1, StoryBeat::Setup, ShotType::TextCard, 0.2),
            resolved(2, StoryBeat::Tension, ShotType::ScreenCapture, 5.0),
        ];
        assign_transitions(&mut shots);
        let total = recalculate_frame_offsets(&mut shots);

        // 6 frames of card, then a 15 frame fade reaches back past zero
        assert_eq!(shots[0].duration_in_frames, 6);
        assert_eq!(shots[1].start_frame, -9);
        assert_eq!(total, 141);
    }

    #[test]
    fn test_empty_timeline_still_reports_one_frame() {
        let mut shots: Vec<ResolvedShot> = Vec::new();
        assign_transitions(&mut shots);
        assert_eq!(recalculate_frame_offsets(&mut shots), 1);
    }

    #[test]
    fn test_starts_are_monotonic_for_full_length_shots() {
        let mut shots = vec![
            resolved(1, StoryBeat::Intro, ShotType::BrandedIntro, 3.0),
            resolved(2, StoryBeat::Setup, ShotType::Avatar, 4.0),
            resolved(3, StoryBeat::Tension, ShotType::TextCard, 2.0),
            resolved(4, StoryBeat::Transformation, ShotType::Avatar, 4.0),
            resolved(5, StoryBeat::Outro, ShotType::BrandedOutro, 3.0),
        ];
        assign_transitions(&mut shots);
        recalculate_frame_offsets(&mut shots);

        for pair in shots.windows(2) {
            assert!(pair[0].start_frame < pair[1].start_frame);
        }
    }
}
