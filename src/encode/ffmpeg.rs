use std::ffi::OsString;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::config::MorphConfig;
use crate::encode::sink::{FrameSink, SinkConfig, create_parent_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::surface::FrameRGBA;

/// Silent H.264 MP4 output through the system `ffmpeg` binary.
///
/// Frames are flattened over the background and piped to `ffmpeg` as raw RGBA.
pub struct FfmpegSink {
    out_path: PathBuf,
    background: [u8; 4],
    encoder: Option<Encoder>,
    opaque: Vec<u8>,
    frames: u64,
}

impl FfmpegSink {
    /// Sink writing `out_path`, flattening frames over `background` (straight RGBA8).
    pub fn new(out_path: impl Into<PathBuf>, background: [u8; 4]) -> Self {
        Self {
            out_path: out_path.into(),
            background,
            encoder: None,
            opaque: Vec::new(),
            frames: 0,
        }
    }

    /// Sink using the background of `cfg`.
    pub fn from_config(out_path: impl Into<PathBuf>, cfg: &MorphConfig) -> Self {
        Self::new(out_path, cfg.background)
    }

    /// Frames piped to `ffmpeg` in the current (or last) render.
    pub fn frames_written(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()> {
        if self.encoder.is_some() {
            return Err(MorphError::encode("ffmpeg sink is already encoding"));
        }
        // yuv420p subsamples chroma 2x2.
        if cfg.width == 0
            || cfg.height == 0
            || !cfg.width.is_multiple_of(2)
            || !cfg.height.is_multiple_of(2)
        {
            return Err(MorphError::validation(format!(
                "mp4 output needs a non-empty canvas with even sides, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        create_parent_dir(&self.out_path)?;

        self.encoder = Some(Encoder::spawn(cfg, &self.out_path)?);
        self.frames = 0;
        tracing::debug!(
            out = %self.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "ffmpeg started"
        );
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> MorphResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(MorphError::encode("ffmpeg sink is not encoding"));
        };
        encoder.cfg.check_frame(frame)?;
        frame.flatten_into(self.background, &mut self.opaque)?;
        encoder.write(&self.opaque)?;
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> MorphResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| MorphError::encode("ffmpeg sink is not encoding"))?;
        encoder.finish()?;
        tracing::info!(frames = self.frames, out = %self.out_path.display(), "mp4 written");
        Ok(())
    }
}

/// Command-line arguments for encoding raw RGBA frames of `cfg` from stdin into `out`.
pub fn encoder_args(cfg: &SinkConfig, out: &Path) -> Vec<OsString> {
    let size = format!("{}x{}", cfg.width, cfg.height);
    let rate = format!("{}/{}", cfg.fps.num, cfg.fps.den);
    let mut args: Vec<OsString> = [
        "-y",
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        size.as_str(),
        "-r",
        rate.as_str(),
        "-i",
        "-",
        "-an",
        "-c:v",
        "libx264",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(out.as_os_str().to_owned());
    args
}

struct Encoder {
    cfg: SinkConfig,
    child: Child,
}

impl Encoder {
    fn spawn(cfg: SinkConfig, out: &Path) -> MorphResult<Self> {
        let child = Command::new("ffmpeg")
            .args(encoder_args(&cfg, out))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => MorphError::encode("mp4 output needs `ffmpeg` on PATH"),
                _ => MorphError::encode(format!("could not start ffmpeg: {e}")),
            })?;
        Ok(Self { cfg, child })
    }

    fn write(&mut self, rgba: &[u8]) -> MorphResult<()> {
        let stdin = self
            .child
            .stdin
            .as_mut()
            .ok_or_else(|| MorphError::encode("ffmpeg stdin is closed"))?;
        stdin
            .write_all(rgba)
            .map_err(|e| MorphError::encode(format!("ffmpeg stopped reading frames: {e}")))
    }

    /// Close stdin, wait for ffmpeg and surface its stderr on failure.
    fn finish(mut self) -> MorphResult<()> {
        drop(self.child.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| MorphError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        if output.status.success() {
            return Ok(());
        }
        Err(MorphError::encode(format!(
            "ffmpeg failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
