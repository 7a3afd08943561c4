//! HTTP downloads of synthesized media.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Download a URL to a local file.
pub async fn download_to_file(
    client: &reqwest::Client,
    url: &str,
    dest: impl AsRef<Path>,
) -> MediaResult<()> {
    let dest = dest.as_ref();
    debug!("Downloading {} to {}", url, dest.display());

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MediaError::download_failed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(MediaError::download_failed(format!(
            "HTTP {} fetching {}",
            response.status(),
            url
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| MediaError::download_failed(e.to_string()))?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, &bytes).await?;

    info!("Downloaded {} bytes to {}", bytes.len(), dest.display());
    Ok(())
}
