use std::fmt;

/// User-facing state of the morph pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The target image has not been prepared yet.
    WaitingForTarget,
    /// The target image failed to load. Permanent.
    TargetLoadFailed,
    /// Target cells are ready; transformations may start.
    Ready,
    /// A transformation was requested before the target was ready.
    StillLoading,
    /// A user image is being decoded and sampled.
    Preparing,
    /// The user image could not be decoded.
    Unreadable,
    /// A run is animating.
    Transforming,
    /// Every particle of the current run has arrived.
    Complete,
}

impl Status {
    /// Message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::WaitingForTarget => "Waiting for the target image…",
            Self::TargetLoadFailed => "Failed to load the target image.",
            Self::Ready => "Choose an image to begin.",
            Self::StillLoading => "Still loading the target image…",
            Self::Preparing => "Preparing your image…",
            Self::Unreadable => "Unable to read that file. Try another image.",
            Self::Transforming => "Reorganising pixels…",
            Self::Complete => "Transformation complete.",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receiver for status transitions.
pub trait StatusSink {
    /// Replace the current status.
    fn set(&mut self, status: Status);
}

/// Single-slot, last-write-wins status holder. Keeps no history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusSlot {
    current: Option<Status>,
}

impl StatusSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last status written, if any.
    pub fn current(&self) -> Option<Status> {
        self.current
    }
}

impl StatusSink for StatusSlot {
    fn set(&mut self, status: Status) {
        self.current = Some(status);
    }
}

/// Status sink that reports every transition through `tracing` and remembers the last one.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogStatusSink {
    slot: StatusSlot,
}

impl LogStatusSink {
    /// Create a logging sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last status written, if any.
    pub fn current(&self) -> Option<Status> {
        self.slot.current()
    }
}

impl StatusSink for LogStatusSink {
    fn set(&mut self, status: Status) {
        match status {
            Status::TargetLoadFailed | Status::Unreadable | Status::StillLoading => {
                tracing::warn!(status = ?status, "{}", status.message());
            }
            _ => tracing::info!(status = ?status, "{}", status.message()),
        }
        self.slot.set(status);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/status.rs"]
mod tests;
