//! Base64 conversion between image files and text payloads.

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// Decode a base64 string and write the raw bytes to `file_name`.
///
/// Whitespace (e.g. line-wrapped payloads) is ignored. The decoded bytes
/// are not checked to be a valid image.
pub fn decode_image(img_string: &str, file_name: &Path) -> Result<()> {
    let compact: String = img_string
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let img_data = STANDARD.decode(compact.as_bytes())?;
    std::fs::write(file_name, img_data)?;
    Ok(())
}

/// Read an image file and return its contents as standard base64.
pub fn encode_image_into_base64(image_path: &Path) -> Result<String> {
    let bytes = std::fs::read(image_path)?;
    Ok(STANDARD.encode(bytes))
}
