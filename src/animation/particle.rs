use crate::animation::ease::Ease;
use crate::cells::sampler::Cell;
use crate::foundation::core::{Point, SampleColor};
use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::lerp;
use crate::render::surface::Surface;

/// Lifecycle of one particle. Transitions only move forward: `Delayed -> Animating -> Finished`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleState {
    /// Waiting to launch; `remaining` seconds of delay left (always > 0).
    Delayed {
        /// Seconds until the particle starts moving.
        remaining: f64,
    },
    /// Moving; `progress` in `[0, 1)`.
    Animating {
        /// Linear (un-eased) progress.
        progress: f64,
    },
    /// Arrived. Terminal.
    Finished,
}

impl ParticleState {
    /// Initial state for a particle launched after `delay` seconds.
    pub fn launch_after(delay: f64) -> Self {
        if delay > 0.0 {
            Self::Delayed { remaining: delay }
        } else {
            Self::Animating { progress: 0.0 }
        }
    }

    /// Advance by `dt` seconds at `speed` progress units per second.
    ///
    /// The step that burns the last of the delay does not also advance progress.
    /// Negative or non-finite deltas are treated as zero.
    pub fn step(self, dt: f64, speed: f64) -> Self {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self {
            Self::Finished => Self::Finished,
            Self::Delayed { remaining } => {
                let remaining = (remaining - dt).max(0.0);
                if remaining > 0.0 {
                    Self::Delayed { remaining }
                } else {
                    Self::Animating { progress: 0.0 }
                }
            }
            Self::Animating { progress } => {
                let progress = (progress + dt * speed).min(1.0);
                if progress >= 1.0 {
                    Self::Finished
                } else {
                    Self::Animating { progress }
                }
            }
        }
    }

    /// Seconds of delay left (0 once launched).
    pub fn delay(self) -> f64 {
        match self {
            Self::Delayed { remaining } => remaining,
            Self::Animating { .. } | Self::Finished => 0.0,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(self) -> f64 {
        match self {
            Self::Delayed { .. } => 0.0,
            Self::Animating { progress } => progress,
            Self::Finished => 1.0,
        }
    }

    /// `true` once the particle has arrived.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// How particles are painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleStyle {
    /// Side length of the painted square, in canvas pixels.
    pub side: f64,
    /// Easing applied to progress before interpolating.
    pub ease: Ease,
}

impl ParticleStyle {
    /// Squares of `cell_size` eased with [`Ease::OutCubic`].
    pub fn for_cell_size(cell_size: u32) -> Self {
        Self {
            side: f64::from(cell_size),
            ease: Ease::OutCubic,
        }
    }
}

/// Interpolated position and color of a particle at its current state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// Square center.
    pub center: Point,
    /// Paint color.
    pub color: SampleColor,
}

/// One start-cell to target-cell transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    start: Cell,
    target: Cell,
    speed: f64,
    state: ParticleState,
}

impl Particle {
    /// Create a particle that launches after `delay` seconds and advances `speed` per second.
    pub fn new(start: Cell, target: Cell, delay: f64, speed: f64) -> MorphResult<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(MorphError::validation(format!(
                "particle speed must be finite and > 0, got {speed}"
            )));
        }
        if !(delay.is_finite() && delay >= 0.0) {
            return Err(MorphError::validation(format!(
                "particle delay must be finite and >= 0, got {delay}"
            )));
        }
        Ok(Self {
            start,
            target,
            speed,
            state: ParticleState::launch_after(delay),
        })
    }

    /// Start cell.
    pub fn start(&self) -> &Cell {
        &self.start
    }

    /// Target cell.
    pub fn target(&self) -> &Cell {
        &self.target
    }

    /// Progress units per second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ParticleState {
        self.state
    }

    /// Seconds of delay left.
    pub fn delay(&self) -> f64 {
        self.state.delay()
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    /// `true` once the particle has arrived. Never reverts.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Advance the particle by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        self.state = self.state.step(dt, self.speed);
    }

    /// Eased position and quantized color. Delayed particles sit exactly on their start cell.
    pub fn appearance(&self, ease: Ease) -> Appearance {
        let t = match self.state {
            ParticleState::Delayed { .. } => 0.0,
            ParticleState::Animating { progress } => ease.apply(progress),
            ParticleState::Finished => ease.apply(1.0),
        };
        Appearance {
            center: Point::new(
                lerp(self.start.pos.x, self.target.pos.x, t),
                lerp(self.start.pos.y, self.target.pos.y, t),
            ),
            color: self.start.color.lerp(self.target.color, t).quantize(),
        }
    }

    /// Paint one square at the current appearance. Does not mutate the particle.
    pub fn render(&self, surface: &mut dyn Surface, style: &ParticleStyle) {
        let Appearance { center, color } = self.appearance(style.ease);
        surface.fill_square(center, style.side, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/particle.rs"]
mod tests;
