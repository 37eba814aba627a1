//! Encoding of image files as self-contained data-URL payloads.
//!
//! Cards embed their images directly in the database row, so an exported
//! backup needs no sidecar files.

use crate::error::{FlashdeckError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// Maps a file extension to the MIME type embedded in the data URL.
fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Reads an image file and encodes it as a `data:` URL string.
/// Returns an error for unknown extensions or unreadable files.
pub fn encode_image_file(path: &Path) -> Result<String> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let mime = mime_for_extension(ext)
        .ok_or_else(|| FlashdeckError::UnsupportedImage(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Decodes the payload of a data URL back into raw image bytes.
/// Returns None when the string is not a base64 data URL.
pub fn decode_payload(data_url: &str) -> Option<Vec<u8>> {
    let (_, b64) = data_url.split_once("base64,")?;
    STANDARD.decode(b64).ok()
}
