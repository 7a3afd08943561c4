//! Local media plumbing for the production pipeline.
//!
//! Covers the pieces that touch the filesystem and external tools:
//! audio extraction via FFmpeg, staging of story assets into the
//! production cache, and HTTP downloads of synthesized clips.

pub mod assets;
pub mod audio;
pub mod download;
pub mod error;

pub use assets::{detect_media_kind, stage_asset, MediaKind};
pub use audio::{check_ffmpeg, AudioExtractor, FfmpegExtractor};
pub use download::download_to_file;
pub use error::{MediaError, MediaResult};
