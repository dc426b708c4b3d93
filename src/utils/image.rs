use std::path::Path;
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use regex::Regex;

use crate::utils::error::ClientError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Image bytes recovered from a data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

static DATA_URL: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^data:([A-Za-z0-9!#$&^_.+-]+/[A-Za-z0-9!#$&^_.+-]+);base64,([A-Za-z0-9+/=]*)$")
});

/// Guess an image MIME type from the file extension
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        "ico" => Some("image/x-icon"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// Encode in-memory bytes as a base64 data URL
pub fn encode_bytes(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read a file in full and encode it as a data URL usable as `imageData`
pub async fn encode_file(path: impl AsRef<Path>) -> Result<String, ClientError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ClientError::ReadError(format!("{}: {}", path.display(), e)))?;

    let mime = mime_for_path(path).unwrap_or(FALLBACK_MIME);
    debug!("Encoded {} ({} bytes) as {}", path.display(), bytes.len(), mime);

    Ok(encode_bytes(&bytes, mime))
}

/// Decode a base64 data URL back to its bytes
pub fn decode(data_url: &str) -> Result<DecodedImage, ClientError> {
    let pattern = DATA_URL
        .as_ref()
        .map_err(|e| ClientError::ReadError(format!("Data URL pattern: {}", e)))?;
    let captures = pattern
        .captures(data_url.trim())
        .ok_or_else(|| ClientError::ReadError("Not a base64 data URL".into()))?;

    let bytes = STANDARD
        .decode(&captures[2])
        .map_err(|e| ClientError::ReadError(format!("Invalid base64 payload: {}", e)))?;

    Ok(DecodedImage {
        mime: captures[1].to_string(),
        bytes,
    })
}
