use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::surface::FrameRGBA;

/// Frame geometry and rate announced to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate of the rendered frames.
    pub fps: Fps,
}

impl SinkConfig {
    /// Reject frames whose size differs from the announced one.
    pub fn check_frame(&self, frame: &FrameRGBA) -> MorphResult<()> {
        if (frame.width, frame.height) == (self.width, self.height) {
            return Ok(());
        }
        Err(MorphError::validation(format!(
            "got a {}x{} frame in a {}x{} render",
            frame.width, frame.height, self.width, self.height
        )))
    }
}

/// Consumer of the frames of one offline render.
///
/// `begin` comes first, then one `push_frame` per tick with indices counting up from 0, then
/// `end`.
pub trait FrameSink {
    /// Prepare for frames of the given geometry.
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()>;
    /// Consume one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MorphResult<()>;
    /// Flush and close the output.
    fn end(&mut self) -> MorphResult<()>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry announced by the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once the render ended.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()> {
        *self = Self {
            cfg: Some(cfg),
            ..Self::default()
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MorphResult<()> {
        let Some(cfg) = self.cfg.filter(|_| !self.ended) else {
            return Err(MorphError::encode("in-memory sink is not accepting frames"));
        };
        cfg.check_frame(frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> MorphResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Create every missing directory above `path`.
pub fn create_parent_dir(path: &Path) -> MorphResult<()> {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(dir).with_context(|| format!("create directory '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
