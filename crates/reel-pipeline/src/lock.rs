//! Per-story production lock.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ProduceError, ProduceResult};

/// Age after which a leftover lock counts as stale (1 hour).
const LOCK_STALE_SECS: i64 = 3600;

/// On-disk lock payload.
#[derive(Debug, Serialize, Deserialize)]
struct LockInfo {
    pid: u32,
    token: String,
    acquired_at: DateTime<Utc>,
}

/// Exclusive production lock for one story.
///
/// Backed by a `{slug}.lock` file at the cache root. Dropping the
/// guard releases the lock, but only while the file still carries this
/// guard's token, so a stolen stale lock is never removed by its old
/// owner.
#[derive(Debug)]
pub struct SlugLock {
    path: PathBuf,
    token: String,
}

impl SlugLock {
    /// Try to take the lock for a story.
    pub fn acquire(cache_root: &Path, slug: &str) -> ProduceResult<Self> {
        std::fs::create_dir_all(cache_root)?;
        let path = cache_root.join(format!("{slug}.lock"));
        let token = uuid::Uuid::new_v4().to_string();

        if !Self::try_create(&path, &token)? {
            if !Self::is_stale(&path) {
                return Err(ProduceError::ProductionLocked {
                    slug: slug.to_string(),
                });
            }
            warn!(slug = %slug, "Removing stale production lock");
            std::fs::remove_file(&path).ok();
            if !Self::try_create(&path, &token)? {
                return Err(ProduceError::ProductionLocked {
                    slug: slug.to_string(),
                });
            }
        }

        debug!(slug = %slug, "Acquired production lock");
        Ok(Self { path, token })
    }

    fn try_create(path: &Path, token: &str) -> ProduceResult<bool> {
        let info = LockInfo {
            pid: std::process::id(),
            token: token.to_string(),
            acquired_at: Utc::now(),
        };
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                file.write_all(serde_json::to_string(&info)?.as_bytes())?;
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn is_stale(path: &Path) -> bool {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return true;
        };
        match serde_json::from_str::<LockInfo>(&raw) {
            Ok(info) => (Utc::now() - info.acquired_at).num_seconds() >= LOCK_STALE_SECS,
            // An unreadable lock file counts as stale
            Err(_) => true,
        }
    }
}

impl Drop for SlugLock {
    fn drop(&mut self) {
        let still_ours = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str::<LockInfo>(&raw).ok())
            .map(|info| info.token == self.token)
            .unwrap_or(false);

        if still_ours {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Failed to remove production lock: {}", e);
            }
        }
    }
}
