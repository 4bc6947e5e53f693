use crate::foundation::core::{Point, SampleColor};
use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::flatten_premul_over_bg_to_opaque_rgba8;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Read one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Composite the frame over `bg_rgba` into `dst` as opaque straight RGBA8, reusing its
    /// allocation.
    pub fn flatten_into(&self, bg_rgba: [u8; 4], dst: &mut Vec<u8>) -> MorphResult<()> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(MorphError::validation(format!(
                "frame has {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        dst.resize(expected, 0);
        flatten_premul_over_bg_to_opaque_rgba8(dst, &self.data, bg_rgba)
    }

    /// Opaque straight RGBA8 copy of the frame, composited over `bg_rgba`. Ready for PNG.
    pub fn to_opaque_rgba8(&self, bg_rgba: [u8; 4]) -> MorphResult<Vec<u8>> {
        let mut out = Vec::new();
        self.flatten_into(bg_rgba, &mut out)?;
        Ok(out)
    }
}

/// Opaque 2D rasterizer the animation draws into.
///
/// Exactly one driver owns a surface during a run; it clears it once per tick and then paints
/// every particle.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Drop everything painted since the last clear.
    fn clear(&mut self);

    /// Fill an axis-aligned square of side `side` centered on `center`.
    fn fill_square(&mut self, center: Point, side: f64, color: SampleColor);
}

/// One recorded [`Surface::fill_square`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    /// Square center.
    pub center: Point,
    /// Square side.
    pub side: f64,
    /// Paint color.
    pub color: SampleColor,
}

/// Surface that records fills instead of rasterizing them. Useful for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    fills: Vec<Fill>,
    clears: u64,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Fills since the last clear, in paint order.
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Number of clears so far (one per tick when driven by the animator).
    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.fills.clear();
        self.clears += 1;
    }

    fn fill_square(&mut self, center: Point, side: f64, color: SampleColor) {
        self.fills.push(Fill {
            center,
            side,
            color,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
