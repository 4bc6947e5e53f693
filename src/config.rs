//! Run configuration.
//!
//! Every field has a default, so an empty JSON object (or no config file at all) reproduces the
//! stock 480x480 canvas sampled every 4 pixels.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::animation::particle::ParticleStyle;
use crate::cells::assign::AssignParams;
use crate::foundation::core::Fps;
use crate::foundation::error::{MorphError, MorphResult};

/// Tunables for sampling, timing, and output.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorphConfig {
    /// Side of the square canvas both images are cover-fitted to.
    pub canvas_size: u32,
    /// Grid step of the sampler, also the side of each painted square.
    pub cell_size: u32,
    /// Per-particle delay and speed ranges.
    pub timing: AssignParams,
    /// Easing applied to particle progress.
    pub ease: Ease,
    /// Frame rate of the offline frame clock.
    pub fps: Fps,
    /// Straight-alpha RGBA8 background painted behind the particles.
    pub background: [u8; 4],
    /// Fixed RNG seed for reproducible shuffles. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            canvas_size: 480,
            cell_size: 4,
            timing: AssignParams::default(),
            ease: Ease::OutCubic,
            fps: Fps { num: 60, den: 1 },
            background: [18, 20, 28, 255],
            seed: None,
        }
    }
}

impl MorphConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> MorphResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MorphError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            MorphError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every field for values that would break sampling, rendering, or termination.
    pub fn validate(&self) -> MorphResult<()> {
        if self.canvas_size == 0 {
            return Err(MorphError::validation("canvas_size must be > 0"));
        }
        if self.canvas_size > u32::from(u16::MAX) {
            return Err(MorphError::validation(format!(
                "canvas_size must be <= {}",
                u16::MAX
            )));
        }
        if self.cell_size == 0 {
            return Err(MorphError::validation("cell_size must be > 0"));
        }
        if self.cell_size > self.canvas_size {
            return Err(MorphError::validation(
                "cell_size must not exceed canvas_size",
            ));
        }
        self.timing.validate()?;
        self.fps.validate()?;
        Ok(())
    }

    /// How particles are painted under this config.
    pub fn particle_style(&self) -> ParticleStyle {
        ParticleStyle {
            side: f64::from(self.cell_size),
            ease: self.ease,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
