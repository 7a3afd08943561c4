//! Story asset staging stage.

use std::path::Path;

use tracing::debug;

use reel_models::Shot;
use reel_vault::Vault;

use crate::cache::{ArtifactCache, ArtifactKind};
use crate::error::ProduceResult;
use crate::metrics;
use crate::progress::{ProducePhase, ProgressReporter};

/// Presence of one declared asset on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    pub shot_id: u32,
    pub filename: String,
    pub exists: bool,
}

/// Asset staging over one timeline's shots.
pub struct AssetStage<'a> {
    pub vault: &'a Vault,
    pub cache: &'a ArtifactCache,
    pub progress: &'a ProgressReporter,
}

impl AssetStage<'_> {
    /// Copy declared screen-capture assets into the production cache.
    ///
    /// A missing source file is a warning and the shot renders without
    /// its asset; production keeps going.
    pub async fn run(&self, slug: &str, shots: &[Shot]) -> ProduceResult<()> {
        let assets_dir = self.vault.assets_dir(slug);

        for shot in shots {
            let Some(asset) = shot.screen_asset() else {
                continue;
            };

            let kind = ArtifactKind::asset_for(shot.id, asset);
            if self.cache.contains(slug, &kind) {
                debug!(slug = %slug, shot_id = shot.id, "Asset already staged");
                continue;
            }

            let source = assets_dir.join(asset);
            if !source.exists() {
                self.progress.warn(
                    slug,
                    ProducePhase::Assets,
                    format!(
                        "Asset {} for shot {} not found in {}",
                        asset,
                        shot.id,
                        assets_dir.display()
                    ),
                );
                continue;
            }

            let dest = self.cache.path(slug, &kind);
            reel_media::stage_asset(&source, &dest).await?;
            metrics::record_asset_staged();
        }

        Ok(())
    }
}

/// Report which declared assets exist on disk.
pub fn validate(assets_dir: &Path, shots: &[Shot]) -> Vec<AssetStatus> {
    shots
        .iter()
        .filter_map(|shot| {
            shot.screen_asset().map(|asset| AssetStatus {
                shot_id: shot.id,
                filename: asset.to_string(),
                exists: assets_dir.join(asset).exists(),
            })
        })
        .collect()
}
