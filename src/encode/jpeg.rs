use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::{ImageFormat, codecs::jpeg::JpegEncoder};

use crate::{
    foundation::error::{SpotgridError, SpotgridResult},
    render::compositor::RenderResult,
};

/// JPEG quality used when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a rendered image as baseline JPEG.
///
/// `quality` is clamped to `1..=100`.
pub fn encode_jpeg(result: &RenderResult, quality: u8) -> SpotgridResult<Vec<u8>> {
    let quality = quality.clamp(1, 100);
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(result.image())
        .map_err(|e| SpotgridError::encode(format!("jpeg: {e}")))?;
    Ok(buf)
}

/// Encode a rendered image as lossless PNG.
pub fn encode_png(result: &RenderResult) -> SpotgridResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    result
        .image()
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| SpotgridError::encode(format!("png: {e}")))?;
    Ok(buf.into_inner())
}

/// Write `result` to `path`; `.png` selects PNG, `.jpg`/`.jpeg` selects JPEG.
pub fn save(result: &RenderResult, path: &Path, jpeg_quality: u8) -> SpotgridResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let bytes = match ext.as_deref() {
        Some("png") => encode_png(result)?,
        Some("jpg" | "jpeg") => encode_jpeg(result, jpeg_quality)?,
        other => {
            return Err(SpotgridError::encode(format!(
                "unsupported output extension {other:?} for '{}'",
                path.display()
            )));
        }
    };
    std::fs::write(path, &bytes)
        .with_context(|| format!("write image '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved image");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
