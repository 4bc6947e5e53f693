use std::path::Path;

use anyhow::Context;

use crate::foundation::error::MorphResult;

/// Decode an encoded raster image (PNG, JPEG, ...) from memory.
pub fn decode_image(bytes: &[u8]) -> MorphResult<image::DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img)
}

/// Read and decode an image file.
pub fn read_image_file(path: &Path) -> MorphResult<image::DynamicImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
