use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::cover::cover_fit;
use crate::assets::decode::{decode_image, read_image_file};
use crate::cells::assign::assign_particles;
use crate::cells::sampler::{Cell, sample_cells};
use crate::config::MorphConfig;
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::surface::Surface;
use crate::session::animator::{Animator, FrameTicket, TickOutcome};
use crate::session::status::{Status, StatusSink};

#[derive(Debug)]
enum TargetCells {
    Pending,
    Ready(Vec<Cell>),
    Failed,
}

/// Owns the target cell set, the animation driver, and status reporting.
///
/// The target is loaded once. Each [`MorphSession::begin`] call samples the user's image,
/// pairs it against the target cells and replaces the running animation wholesale.
/// Image loading failures are reported through the status sink at this boundary and never reach
/// the sampler, assignment stage, or driver.
pub struct MorphSession<S: StatusSink> {
    config: MorphConfig,
    target: TargetCells,
    animator: Animator,
    rng: StdRng,
    status: S,
}

impl<S: StatusSink> MorphSession<S> {
    /// Create a session waiting for its target image.
    pub fn new(config: MorphConfig, mut status: S) -> MorphResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        status.set(Status::WaitingForTarget);
        Ok(Self {
            animator: Animator::new(config.particle_style()),
            config,
            target: TargetCells::Pending,
            rng,
            status,
        })
    }

    /// Session configuration.
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Status sink.
    pub fn status(&self) -> &S {
        &self.status
    }

    /// Animation driver.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// `true` once target cells are prepared.
    pub fn is_ready(&self) -> bool {
        matches!(self.target, TargetCells::Ready(_))
    }

    /// Prepared target cells, if loaded.
    pub fn target_cells(&self) -> Option<&[Cell]> {
        match &self.target {
            TargetCells::Ready(cells) => Some(cells),
            TargetCells::Pending | TargetCells::Failed => None,
        }
    }

    /// Decode encoded bytes and prepare them as the target.
    pub fn load_target_bytes(&mut self, bytes: &[u8]) -> MorphResult<usize> {
        self.ensure_target_pending()?;
        match decode_image(bytes) {
            Ok(img) => self.load_target(&img),
            Err(e) => Err(self.fail_target(&e)),
        }
    }

    /// Read a file and prepare it as the target.
    pub fn load_target_file(&mut self, path: &Path) -> MorphResult<usize> {
        self.ensure_target_pending()?;
        match read_image_file(path) {
            Ok(img) => self.load_target(&img),
            Err(e) => Err(self.fail_target(&e)),
        }
    }

    /// Cover-fit and sample `img` into the target cell set. Returns the cell count.
    #[tracing::instrument(skip_all)]
    pub fn load_target(&mut self, img: &image::DynamicImage) -> MorphResult<usize> {
        self.ensure_target_pending()?;
        match self.sample(img) {
            Ok(cells) => {
                let n = cells.len();
                tracing::info!(cells = n, "target cells ready");
                self.target = TargetCells::Ready(cells);
                self.status.set(Status::Ready);
                Ok(n)
            }
            Err(e) => Err(self.fail_target(&e)),
        }
    }

    /// Begin a transformation from encoded image bytes. Returns the particle count.
    pub fn begin_bytes(&mut self, bytes: &[u8]) -> MorphResult<usize> {
        self.ensure_ready()?;
        self.status.set(Status::Preparing);
        match decode_image(bytes) {
            Ok(img) => self.start_from(&img),
            Err(e) => Err(self.reject_input(&e)),
        }
    }

    /// Begin a transformation from an image file. Returns the particle count.
    pub fn begin_file(&mut self, path: &Path) -> MorphResult<usize> {
        self.ensure_ready()?;
        self.status.set(Status::Preparing);
        match read_image_file(path) {
            Ok(img) => self.start_from(&img),
            Err(e) => Err(self.reject_input(&e)),
        }
    }

    /// Begin a transformation from an already decoded image. Returns the particle count.
    ///
    /// Refused with [`MorphError::NotReady`] until the target cells are prepared. A run that is
    /// still animating is canceled before the new particles are installed.
    pub fn begin(&mut self, img: &image::DynamicImage) -> MorphResult<usize> {
        self.ensure_ready()?;
        self.status.set(Status::Preparing);
        self.start_from(img)
    }

    /// The frame the host should deliver next, if a run is animating.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.animator.pending_frame()
    }

    /// Deliver one frame callback. Reports [`Status::Complete`] on the tick the run finishes.
    pub fn on_frame(
        &mut self,
        ticket: FrameTicket,
        timestamp_ms: f64,
        surface: &mut dyn Surface,
    ) -> TickOutcome {
        let outcome = self.animator.on_frame(ticket, timestamp_ms, surface);
        if outcome == TickOutcome::Complete {
            self.status.set(Status::Complete);
        }
        outcome
    }

    fn start_from(&mut self, img: &image::DynamicImage) -> MorphResult<usize> {
        let sources = match self.sample(img) {
            Ok(cells) => cells,
            Err(e) => return Err(self.reject_input(&e)),
        };
        let TargetCells::Ready(targets) = &self.target else {
            return Err(MorphError::NotReady);
        };

        let assigned = assign_particles(targets, &sources, &self.config.timing, &mut self.rng);
        let particles = match assigned {
            Ok(particles) => particles,
            Err(e) => {
                // Back to idle so the user can trigger again.
                tracing::warn!(error = %e, "particle assignment failed");
                self.status.set(Status::Ready);
                return Err(e);
            }
        };
        let n = particles.len();
        self.animator.start(particles);
        self.status.set(Status::Transforming);
        Ok(n)
    }

    fn sample(&self, img: &image::DynamicImage) -> MorphResult<Vec<Cell>> {
        let size = self.config.canvas_size;
        let pixels = cover_fit(img, size, size)?;
        sample_cells(&pixels, self.config.cell_size)
    }

    fn ensure_target_pending(&self) -> MorphResult<()> {
        match self.target {
            TargetCells::Pending => Ok(()),
            TargetCells::Ready(_) => Err(MorphError::validation("target image is already loaded")),
            TargetCells::Failed => Err(MorphError::asset_load(
                "target image failed to load earlier",
            )),
        }
    }

    fn ensure_ready(&mut self) -> MorphResult<()> {
        match self.target {
            TargetCells::Ready(_) => Ok(()),
            TargetCells::Pending => {
                self.status.set(Status::StillLoading);
                Err(MorphError::NotReady)
            }
            TargetCells::Failed => {
                // The load failure message is permanent.
                self.status.set(Status::TargetLoadFailed);
                Err(MorphError::NotReady)
            }
        }
    }

    fn fail_target(&mut self, cause: &MorphError) -> MorphError {
        tracing::warn!(error = %cause, "target image failed to load");
        self.target = TargetCells::Failed;
        self.status.set(Status::TargetLoadFailed);
        MorphError::asset_load(format!("{cause:#}"))
    }

    fn reject_input(&mut self, cause: &MorphError) -> MorphError {
        tracing::warn!(error = %cause, "input image is unreadable");
        self.status.set(Status::Unreadable);
        MorphError::unreadable_input(format!("{cause:#}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/morph.rs"]
mod tests;
