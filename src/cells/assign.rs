use rand::Rng;
use rand::seq::SliceRandom;

use crate::animation::particle::Particle;
use crate::cells::sampler::Cell;
use crate::foundation::error::{MorphError, MorphResult};

/// Timing parameters drawn per particle by [`assign_particles`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssignParams {
    /// Upper bound of the uniform random delay component, in seconds.
    pub delay_jitter_secs: f64,
    /// Delay added linearly across target order, in seconds (last target gets almost all of it).
    pub delay_ramp_secs: f64,
    /// Inclusive lower bound of the per-particle speed. Must be > 0.
    pub speed_min: f64,
    /// Exclusive upper bound of the per-particle speed.
    pub speed_max: f64,
}

impl Default for AssignParams {
    fn default() -> Self {
        Self {
            delay_jitter_secs: 0.6,
            delay_ramp_secs: 0.4,
            speed_min: 0.65,
            speed_max: 1.10,
        }
    }
}

impl AssignParams {
    /// Reject parameters that could produce a run that never finishes.
    pub fn validate(&self) -> MorphResult<()> {
        for (name, v) in [
            ("delay_jitter_secs", self.delay_jitter_secs),
            ("delay_ramp_secs", self.delay_ramp_secs),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(MorphError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if !(self.speed_min.is_finite() && self.speed_min > 0.0) {
            return Err(MorphError::validation(format!(
                "speed_min must be finite and > 0, got {}",
                self.speed_min
            )));
        }
        if !(self.speed_max.is_finite() && self.speed_max > self.speed_min) {
            return Err(MorphError::validation(format!(
                "speed_max must be finite and > speed_min, got {}",
                self.speed_max
            )));
        }
        Ok(())
    }
}

/// Uniformly random permutation of `cells` (Fisher-Yates, last element down).
pub fn shuffled<R: Rng>(cells: &[Cell], rng: &mut R) -> Vec<Cell> {
    let mut out = cells.to_vec();
    out.shuffle(rng);
    out
}

/// Pair every target cell with a shuffled source cell and draw its delay and speed.
///
/// Output order follows `targets`. Target `i` starts from `shuffled[i % shuffled.len()]`, so
/// source cells are reused cyclically when there are fewer of them than targets.
/// Delay is `U(0, jitter) + (i / n) * ramp`; speed is `U(speed_min, speed_max)`.
#[tracing::instrument(skip_all, fields(targets = targets.len(), sources = sources.len()))]
pub fn assign_particles<R: Rng>(
    targets: &[Cell],
    sources: &[Cell],
    params: &AssignParams,
    rng: &mut R,
) -> MorphResult<Vec<Particle>> {
    params.validate()?;
    if targets.is_empty() {
        return Ok(Vec::new());
    }
    if sources.is_empty() {
        return Err(MorphError::validation(
            "cannot assign particles without source cells",
        ));
    }
    if sources.len() != targets.len() {
        tracing::debug!("source/target counts differ, reusing source cells cyclically");
    }

    let shuffled = shuffled(sources, rng);
    let n = targets.len() as f64;

    targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let start = shuffled[i % shuffled.len()];
            let jitter = rng.r#gen::<f64>() * params.delay_jitter_secs;
            let ramp = (i as f64 / n) * params.delay_ramp_secs;
            let speed = rng.gen_range(params.speed_min..params.speed_max);
            Particle::new(start, *target, jitter + ramp, speed)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/cells/assign.rs"]
mod tests;
