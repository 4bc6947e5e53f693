use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::cpu::CpuSurface;
use crate::render::surface::{FrameRGBA, Surface};
use crate::session::animator::TickOutcome;
use crate::session::morph::MorphSession;
use crate::session::status::StatusSink;

/// Deterministic display clock for offline rendering.
///
/// Frame `k` is stamped `k * 1000 / fps` milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    fps: Fps,
    next: FrameIndex,
}

impl FrameClock {
    /// Clock starting at frame 0.
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            next: FrameIndex(0),
        }
    }

    /// Timestamp of frame `idx` in milliseconds.
    pub fn timestamp_ms(&self, idx: FrameIndex) -> f64 {
        self.fps.frames_to_secs(idx.0) * 1000.0
    }

    /// Return the next frame index and its timestamp, then advance.
    pub fn tick(&mut self) -> (FrameIndex, f64) {
        let idx = self.next;
        self.next = FrameIndex(idx.0 + 1);
        (idx, self.timestamp_ms(idx))
    }
}

/// Summary of an offline render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames: u64,
}

/// Drive the session's current run to completion, pushing one frame per tick into `sink`.
///
/// The session must have a run scheduled (see [`MorphSession::begin`]). Frames are stamped by a
/// [`FrameClock`] at the configured fps.
#[tracing::instrument(skip_all)]
pub fn render_transition<S: StatusSink>(
    session: &mut MorphSession<S>,
    surface: &mut CpuSurface,
    sink: &mut dyn FrameSink,
) -> MorphResult<RenderStats> {
    let fps = session.config().fps;
    let (width, height) = surface.size();
    if session.pending_frame().is_none() {
        return Err(MorphError::validation(
            "no transformation is running; begin one before rendering",
        ));
    }

    sink.begin(SinkConfig { width, height, fps })?;

    let mut clock = FrameClock::new(fps);
    let mut stats = RenderStats::default();
    while let Some(ticket) = session.pending_frame() {
        let (idx, ts) = clock.tick();
        let outcome = session.on_frame(ticket, ts, surface);
        if outcome == TickOutcome::Stale {
            return Err(MorphError::encode("frame ticket went stale during render"));
        }
        let frame = surface.snapshot();
        sink.push_frame(idx, &frame)?;
        stats.frames += 1;
    }

    sink.end()?;
    tracing::info!(frames = stats.frames, "transition rendered");
    Ok(stats)
}

/// Advance the session's current run up to `at_secs` and return that frame.
///
/// Ticks are delivered at the configured fps, so the result matches the frame a full render
/// would produce at the same time. Stops early when the run completes.
#[tracing::instrument(skip(session, surface))]
pub fn render_still<S: StatusSink>(
    session: &mut MorphSession<S>,
    surface: &mut CpuSurface,
    at_secs: f64,
) -> MorphResult<FrameRGBA> {
    if !at_secs.is_finite() || at_secs < 0.0 {
        return Err(MorphError::validation(format!(
            "still time must be finite and >= 0, got {at_secs}"
        )));
    }
    if session.pending_frame().is_none() {
        return Err(MorphError::validation(
            "no transformation is running; begin one before rendering",
        ));
    }

    let at_ms = at_secs * 1000.0;
    let mut clock = FrameClock::new(session.config().fps);
    while let Some(ticket) = session.pending_frame() {
        let (idx, ts) = clock.tick();
        if idx.0 > 0 && ts > at_ms {
            break;
        }
        session.on_frame(ticket, ts, surface);
    }
    Ok(surface.snapshot())
}

#[cfg(test)]
#[path = "../../tests/unit/session/offline.rs"]
mod tests;
