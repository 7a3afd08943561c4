//! Render backend: hand resolved shots to the studio renderer.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use reel_models::ResolvedShot;
use serde::Serialize;
use tokio::process::Command;
use tracing::info;

use crate::error::{ProduceError, ProduceResult};

/// Input props for the renderer composition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderProps {
    pub shots: Vec<ResolvedShot>,
    pub title: String,
    pub duration_in_frames: u32,
    pub fps: u32,
}

/// Renders a resolved timeline to a video file.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    async fn render(&self, props: &RenderProps, output: &Path) -> ProduceResult<()>;
}

/// Invokes the studio's Remotion composition through npx.
pub struct StudioRenderer {
    composition: String,
}

impl StudioRenderer {
    pub fn new(composition: impl Into<String>) -> Self {
        Self {
            composition: composition.into(),
        }
    }
}

#[async_trait]
impl RenderBackend for StudioRenderer {
    async fn render(&self, props: &RenderProps, output: &Path) -> ProduceResult<()> {
        // Props go through a file: serialized timelines overflow argv limits
        let props_file = tempfile::Builder::new()
            .prefix("render-props-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(props_file.as_file(), props)?;

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        info!(
            composition = %self.composition,
            frames = props.duration_in_frames,
            "Starting render"
        );

        let status = Command::new("npx")
            .arg("remotion")
            .arg("render")
            .arg(&self.composition)
            .arg("--props")
            .arg(props_file.path())
            .arg("--output")
            .arg(output)
            .stdin(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            return Err(ProduceError::render_failed(format!(
                "remotion render exited with {status}"
            )));
        }

        info!(output = %output.display(), "Render complete");
        Ok(())
    }
}
