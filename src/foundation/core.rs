use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::lerp;

pub use kurbo::Point;

/// Absolute 0-based frame index of an offline render.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> MorphResult<Self> {
        let fps = Self { num, den };
        fps.validate()?;
        Ok(fps)
    }

    /// Reject zero numerators or denominators.
    pub fn validate(self) -> MorphResult<()> {
        if self.den == 0 {
            return Err(MorphError::validation("Fps den must be > 0"));
        }
        if self.num == 0 {
            return Err(MorphError::validation("Fps num must be > 0"));
        }
        Ok(())
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Full-precision sample color: `r,g,b` in `0..=255`, `a` normalized to `0..=1`.
///
/// Alpha is straight (not premultiplied), matching what a 2D canvas reads back.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellColor {
    /// Red channel, `0..=255`.
    pub r: f64,
    /// Green channel, `0..=255`.
    pub g: f64,
    /// Blue channel, `0..=255`.
    pub b: f64,
    /// Alpha, `0..=1`.
    pub a: f64,
}

impl CellColor {
    /// Build a cell color from one straight-alpha RGBA8 pixel.
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self {
            r: f64::from(px[0]),
            g: f64::from(px[1]),
            b: f64::from(px[2]),
            a: f64::from(px[3]) / 255.0,
        }
    }

    /// Interpolate every channel independently.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    /// Quantize for painting: `r,g,b` rounded to the nearest integer, `a` kept fractional.
    pub fn quantize(self) -> SampleColor {
        fn channel(v: f64) -> u8 {
            v.round().clamp(0.0, 255.0) as u8
        }

        SampleColor {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a.clamp(0.0, 1.0),
        }
    }
}

/// Color handed to a rasterizer: integer `r,g,b` with fractional alpha (`rgba(r, g, b, a)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha, `0..=1`.
    pub a: f64,
}

impl SampleColor {
    /// Straight-alpha RGBA8 with alpha rounded to 8 bits.
    pub fn to_rgba8(self) -> [u8; 4] {
        let a = (self.a * 255.0).round().clamp(0.0, 255.0) as u8;
        [self.r, self.g, self.b, a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
