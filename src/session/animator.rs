use crate::animation::particle::{Particle, ParticleStyle};
use crate::render::surface::Surface;

/// Token for one scheduled frame callback.
///
/// Only the ticket most recently issued by an [`Animator`] is honored; tickets from a canceled
/// or replaced run are stale and never touch the current population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    run: u64,
    serial: u64,
}

impl FrameTicket {
    /// Id of the run this ticket was issued for.
    pub fn run_id(self) -> u64 {
        self.run
    }
}

/// Result of delivering a frame callback to the animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Particles are still moving; another frame was scheduled.
    Continue,
    /// The last particle arrived on this tick; nothing further is scheduled.
    Complete,
    /// The ticket was canceled or superseded; nothing was updated or painted.
    Stale,
}

/// Everything one transformation owns: its particles and its timestamp baseline.
///
/// A new transformation replaces the whole run rather than mutating this one.
#[derive(Clone, Debug)]
pub struct AnimationRun {
    id: u64,
    particles: Vec<Particle>,
    last_timestamp_ms: Option<f64>,
    ticks: u64,
}

impl AnimationRun {
    fn new(id: u64, particles: Vec<Particle>) -> Self {
        Self {
            id,
            particles,
            last_timestamp_ms: None,
            ticks: 0,
        }
    }

    /// Run id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The particle population, in assignment order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Particles that have not arrived yet.
    pub fn unfinished(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_finished()).count()
    }

    /// Update then paint every particle. Returns `true` while any particle is unfinished.
    ///
    /// The first tick of a run has no previous timestamp and advances by zero.
    fn tick(&mut self, timestamp_ms: f64, surface: &mut dyn Surface, style: &ParticleStyle) -> bool {
        let last = self.last_timestamp_ms.unwrap_or(timestamp_ms);
        let dt = ((timestamp_ms - last) / 1000.0).max(0.0);
        self.last_timestamp_ms = Some(timestamp_ms);
        self.ticks += 1;

        surface.clear();
        let mut any_unfinished = false;
        for particle in &mut self.particles {
            particle.update(dt);
            particle.render(surface, style);
            any_unfinished |= !particle.is_finished();
        }
        any_unfinished
    }
}

/// Frame-driven animation driver.
///
/// Holds at most one [`AnimationRun`] and at most one pending [`FrameTicket`]. Each delivered
/// ticket runs exactly one tick (update + render of the whole population) and, while particles
/// remain unfinished, issues the next ticket.
#[derive(Debug)]
pub struct Animator {
    style: ParticleStyle,
    run: Option<AnimationRun>,
    pending: Option<FrameTicket>,
    runs_started: u64,
}

impl Animator {
    /// Create an idle animator painting particles with `style`.
    pub fn new(style: ParticleStyle) -> Self {
        Self {
            style,
            run: None,
            pending: None,
            runs_started: 0,
        }
    }

    /// Paint style.
    pub fn style(&self) -> &ParticleStyle {
        &self.style
    }

    /// Cancel any pending frame, install `particles` as a fresh run and schedule its first frame.
    #[tracing::instrument(skip_all, fields(particles = particles.len()))]
    pub fn start(&mut self, particles: Vec<Particle>) -> FrameTicket {
        self.cancel();

        self.runs_started += 1;
        let run = AnimationRun::new(self.runs_started, particles);
        let ticket = FrameTicket {
            run: run.id,
            serial: 0,
        };
        tracing::debug!(run = run.id, "run started");
        self.run = Some(run);
        self.pending = Some(ticket);
        ticket
    }

    /// Drop the pending frame, if any. The current run stays installed but is no longer driven.
    pub fn cancel(&mut self) -> Option<FrameTicket> {
        let canceled = self.pending.take();
        if let Some(t) = canceled {
            tracing::debug!(run = t.run, serial = t.serial, "canceled pending frame");
        }
        canceled
    }

    /// The frame the host should deliver next, if one is scheduled.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// The current run, if one was ever started.
    pub fn run(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    /// `true` while a frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Deliver the frame callback for `ticket` at `timestamp_ms` (display-clock milliseconds).
    pub fn on_frame(
        &mut self,
        ticket: FrameTicket,
        timestamp_ms: f64,
        surface: &mut dyn Surface,
    ) -> TickOutcome {
        if self.pending != Some(ticket) {
            tracing::trace!(run = ticket.run, serial = ticket.serial, "ignoring stale frame");
            return TickOutcome::Stale;
        }
        self.pending = None;

        let Some(run) = self.run.as_mut() else {
            return TickOutcome::Stale;
        };

        if run.tick(timestamp_ms, surface, &self.style) {
            self.pending = Some(FrameTicket {
                run: run.id,
                serial: ticket.serial + 1,
            });
            TickOutcome::Continue
        } else {
            tracing::info!(run = run.id, ticks = run.ticks, "run complete");
            TickOutcome::Complete
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/animator.rs"]
mod tests;
