//! Saving remote resources and inline images to disk.

use crate::error::download::DownloadError;
use crate::error::fs_ops::FsOpError;
use crate::fs_ops;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::StreamExt;
use log::{debug, info};
use regex::Regex;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

/// `data:image/<subtype>;base64,<payload>`, scheme and media type matched
/// case-insensitively.
const DATA_IMAGE_PATTERN: &str = r"(?is)^data:image/(.+?);base64,(.+)$";

static DATA_IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();

fn data_image_regex() -> &'static Regex {
    DATA_IMAGE_REGEX.get_or_init(|| Regex::new(DATA_IMAGE_PATTERN).expect("valid regex pattern"))
}

/// Base64 payload of an inline image URI, or `None` for any other URL.
pub fn inline_image_payload(url: &str) -> Option<&str> {
    data_image_regex()
        .captures(url)
        .and_then(|captures| captures.get(2))
        .map(|payload| payload.as_str())
}

/// Save `url` to `destination`.
///
/// Inline `data:image/...;base64,` URIs are decoded locally; anything else is
/// fetched with an HTTP GET and streamed to the file. The parent directory of
/// `destination` is created when missing.
///
/// # Returns
///
/// The path the content was written to.
///
/// # Errors
///
/// - [`DownloadError::Decode`] for an inline image with an invalid payload
/// - [`DownloadError::InvalidUrl`] if `url` is not a valid absolute URL
/// - [`DownloadError::Http`] for transport failures and non-success statuses
/// - [`DownloadError::Fs`] if the file cannot be written
pub async fn download_to_path(
    client: &Client,
    url: &str,
    destination: &Path,
) -> Result<PathBuf, DownloadError> {
    if let Some(payload) = inline_image_payload(url) {
        let bytes = STANDARD.decode(payload.trim())?;
        debug!("Decoded {} byte inline image", bytes.len());
        fs_ops::write_file(destination, &bytes).await?;
        return Ok(destination.to_path_buf());
    }

    let url = Url::parse(url)?;
    info!("Downloading {url} to {}", destination.display());

    let response = client.get(url).send().await?.error_for_status()?;

    fs_ops::ensure_parent_dir(destination).await?;
    let mut file = File::create(destination)
        .await
        .map_err(|e| FsOpError::io("create", destination, e))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?)
            .await
            .map_err(|e| FsOpError::io("write", destination, e))?;
    }
    file.flush()
        .await
        .map_err(|e| FsOpError::io("write", destination, e))?;

    Ok(destination.to_path_buf())
}
