//! Story vault access.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use reel_models::{Timeline, TimelineFrontmatter, TimelineStatus};

use crate::error::VaultResult;
use crate::frontmatter;

/// Filesystem vault rooted at a stories directory.
#[derive(Debug, Clone)]
pub struct Vault {
    stories_dir: PathBuf,
}

impl Vault {
    /// Create a vault rooted at the given stories directory.
    pub fn new(stories_dir: impl Into<PathBuf>) -> Self {
        Self {
            stories_dir: stories_dir.into(),
        }
    }

    /// Directory holding a single story.
    pub fn story_dir(&self, slug: &str) -> PathBuf {
        self.stories_dir.join(slug)
    }

    /// Directory holding a story's local assets.
    pub fn assets_dir(&self, slug: &str) -> PathBuf {
        self.story_dir(slug).join("assets")
    }

    /// Read the most recent video timeline for a story.
    ///
    /// Prefers the newest `video-*.md`, falling back to the legacy
    /// `timeline.md`. Returns `None` when the story folder or document
    /// is absent.
    pub fn read_timeline(&self, slug: &str) -> VaultResult<Option<Timeline>> {
        let story_dir = self.story_dir(slug);
        if !story_dir.exists() {
            return Ok(None);
        }

        let mut video_files: Vec<String> = Vec::new();
        let mut has_legacy = false;
        for entry in fs::read_dir(&story_dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.starts_with("video-") && name.ends_with(".md") {
                video_files.push(name);
            } else if name == "timeline.md" {
                has_legacy = true;
            }
        }

        video_files.sort();
        let filename = match video_files.pop() {
            Some(name) => name,
            None if has_legacy => "timeline.md".to_string(),
            None => return Ok(None),
        };

        let raw = fs::read_to_string(story_dir.join(&filename))?;
        let doc = frontmatter::parse::<TimelineFrontmatter>(&raw)?;

        debug!(slug = %slug, filename = %filename, "Read timeline");

        Ok(Some(Timeline {
            path: format!("{}/{}", slug, filename),
            filename,
            frontmatter: doc.frontmatter,
            content: doc.content,
        }))
    }

    /// Write a timeline document back to its story folder.
    ///
    /// The document goes to the same filename the timeline was read
    /// from, so a status update never forks state across files.
    pub fn write_timeline(&self, slug: &str, timeline: &Timeline) -> VaultResult<PathBuf> {
        let dir = self.story_dir(slug);
        fs::create_dir_all(&dir)?;

        let filepath = dir.join(&timeline.filename);
        let markdown = frontmatter::serialize(&timeline.frontmatter, &timeline.content)?;
        fs::write(&filepath, markdown)?;

        debug!(slug = %slug, path = ?filepath, "Wrote timeline");
        Ok(filepath)
    }

    /// Rewrite a timeline with a new production status.
    pub fn update_status(
        &self,
        slug: &str,
        timeline: &mut Timeline,
        status: TimelineStatus,
    ) -> VaultResult<PathBuf> {
        timeline.frontmatter.status = status;
        self.write_timeline(slug, timeline)
    }

    /// List all story slugs that have a video timeline.
    pub fn list_timelines(&self) -> VaultResult<Vec<String>> {
        if !self.stories_dir.exists() {
            return Ok(Vec::new());
        }

        let mut slugs = Vec::new();
        for entry in fs::read_dir(&self.stories_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if dir_has_timeline(&entry.path())? {
                slugs.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        slugs.sort();
        Ok(slugs)
    }
}

fn dir_has_timeline(dir: &Path) -> VaultResult<bool> {
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if (name.starts_with("video-") && name.ends_with(".md")) || name == "timeline.md" {
            return Ok(true);
        }
    }
    Ok(false)
}
