use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig, create_parent_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::surface::FrameRGBA;

/// Writes every frame as `frame_00000.png`, `frame_00001.png`, ... into a directory.
///
/// Alpha is flattened over `bg_rgba`, so the files are opaque.
pub struct PngSequenceSink {
    out_dir: PathBuf,
    bg_rgba: [u8; 4],
    cfg: Option<SinkConfig>,
    scratch: Vec<u8>,
    written: u64,
}

impl PngSequenceSink {
    /// Create a sink writing into `out_dir` (created on `begin`).
    pub fn new(out_dir: impl Into<PathBuf>, bg_rgba: [u8; 4]) -> Self {
        Self {
            out_dir: out_dir.into(),
            bg_rgba,
            cfg: None,
            scratch: Vec::new(),
            written: 0,
        }
    }

    /// Path of the file written for frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.out_dir.join(format!("frame_{:05}.png", idx.0))
    }

    /// Frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(MorphError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        create_parent_dir(&self.out_dir.join("frame"))?;
        self.cfg = Some(cfg);
        self.written = 0;
        tracing::debug!(dir = %self.out_dir.display(), "png sequence started");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MorphResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| MorphError::encode("png sink not started"))?;
        cfg.check_frame(frame)?;
        frame.flatten_into(self.bg_rgba, &mut self.scratch)?;
        save_opaque_png(&self.frame_path(idx), frame.width, frame.height, &self.scratch)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> MorphResult<()> {
        if self.cfg.take().is_none() {
            return Err(MorphError::encode("png sink not started"));
        }
        tracing::info!(frames = self.written, dir = %self.out_dir.display(), "png sequence written");
        Ok(())
    }
}

/// Flatten `frame` over `bg_rgba` and write it as an opaque PNG, creating parent directories.
pub fn write_frame_png(path: &Path, frame: &FrameRGBA, bg_rgba: [u8; 4]) -> MorphResult<()> {
    let rgba = frame.to_opaque_rgba8(bg_rgba)?;
    create_parent_dir(path)?;
    save_opaque_png(path, frame.width, frame.height, &rgba)
}

fn save_opaque_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> MorphResult<()> {
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
