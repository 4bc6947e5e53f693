//! cellmorph turns one still image into another by animating a grid of sampled color cells.
//!
//! Both images are cover-fitted onto a square canvas and sampled into cells. Every target cell is
//! paired with a (shuffled) source cell, and the resulting particles glide from source to target
//! with their own start delay and speed. The public API is session-oriented:
//!
//! - Build a [`MorphConfig`] and create a [`MorphSession`]
//! - Load the target image once, then [`MorphSession::begin`] with any source image
//! - Drive frames yourself, or render offline into a [`FrameSink`] with [`render_transition`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Particle easing and motion state.
pub mod animation;
/// Image decoding and cover-fit scaling.
pub mod assets;
/// Cell sampling and particle assignment.
pub mod cells;
/// Session configuration.
pub mod config;
/// Frame sinks (in-memory, PNG sequence, MP4).
pub mod encode;
/// Raster surfaces.
pub mod render;
/// Morph session, frame driver, status reporting and offline rendering.
pub mod session;

pub use crate::foundation::core::{CellColor, Fps, FrameIndex, Point, SampleColor};
pub use crate::foundation::error::{MorphError, MorphResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::particle::{Particle, ParticleState, ParticleStyle};
pub use crate::cells::assign::{AssignParams, assign_particles};
pub use crate::cells::sampler::{Cell, PixelBuffer, sample_cells};
pub use crate::config::MorphConfig;
pub use crate::encode::ffmpeg::FfmpegSink;
pub use crate::encode::png::{PngSequenceSink, write_frame_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::surface::{FrameRGBA, RecordingSurface, Surface};
pub use crate::session::animator::{Animator, FrameTicket, TickOutcome};
pub use crate::session::morph::MorphSession;
pub use crate::session::offline::{FrameClock, RenderStats, render_still, render_transition};
pub use crate::session::status::{LogStatusSink, Status, StatusSink, StatusSlot};
