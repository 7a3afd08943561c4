//! Metrics for production runs.
//!
//! Counters and histograms go through the `metrics` facade; a recorder
//! can be installed by whatever hosts the pipeline.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const PRODUCE_RUNS_TOTAL: &str = "reel_produce_runs_total";
    pub const PRODUCE_FAILURES_TOTAL: &str = "reel_produce_failures_total";
    pub const PRODUCE_DURATION_SECONDS: &str = "reel_produce_duration_seconds";

    pub const AVATAR_CLIPS_SYNTHESIZED_TOTAL: &str = "reel_avatar_clips_synthesized_total";
    pub const AVATAR_CACHE_HITS_TOTAL: &str = "reel_avatar_cache_hits_total";
    pub const AVATAR_POLLS_TOTAL: &str = "reel_avatar_polls_total";

    pub const VOICEOVERS_SYNTHESIZED_TOTAL: &str = "reel_voiceovers_synthesized_total";
    pub const VOICEOVER_CACHE_HITS_TOTAL: &str = "reel_voiceover_cache_hits_total";

    pub const ASSETS_STAGED_TOTAL: &str = "reel_assets_staged_total";
    pub const RENDER_DURATION_SECONDS: &str = "reel_render_duration_seconds";
}

/// Record a production run starting.
pub fn record_run_started() {
    counter!(names::PRODUCE_RUNS_TOTAL).increment(1);
}

/// Record a production run finishing successfully.
pub fn record_run_completed(duration_secs: f64) {
    histogram!(names::PRODUCE_DURATION_SECONDS).record(duration_secs);
}

/// Record a production run failing.
pub fn record_run_failed() {
    counter!(names::PRODUCE_FAILURES_TOTAL).increment(1);
}

/// Record an avatar clip synthesized from scratch.
pub fn record_avatar_synthesized() {
    counter!(names::AVATAR_CLIPS_SYNTHESIZED_TOTAL).increment(1);
}

/// Record an avatar clip served from the cache.
pub fn record_avatar_cache_hit() {
    counter!(names::AVATAR_CACHE_HITS_TOTAL).increment(1);
}

/// Record one status poll against the avatar service.
pub fn record_avatar_poll() {
    counter!(names::AVATAR_POLLS_TOTAL).increment(1);
}

/// Record a voiceover synthesized from scratch.
pub fn record_voiceover_synthesized() {
    counter!(names::VOICEOVERS_SYNTHESIZED_TOTAL).increment(1);
}

/// Record a voiceover served from the cache.
pub fn record_voiceover_cache_hit() {
    counter!(names::VOICEOVER_CACHE_HITS_TOTAL).increment(1);
}

/// Record a story asset staged into the cache.
pub fn record_asset_staged() {
    counter!(names::ASSETS_STAGED_TOTAL).increment(1);
}

/// Record render duration.
pub fn record_render_duration(duration_secs: f64) {
    histogram!(names::RENDER_DURATION_SECONDS).record(duration_secs);
}
