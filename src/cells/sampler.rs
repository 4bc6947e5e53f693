use crate::foundation::core::{CellColor, Point};
use crate::foundation::error::{MorphError, MorphResult};

/// Straight-alpha RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba8: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes, checking the length against the dimensions.
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> MorphResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8.len() != expected {
            return Err(MorphError::validation(format!(
                "pixel buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }

    /// A buffer filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let px = (width as usize) * (height as usize);
        Self {
            width,
            height,
            rgba8: rgba.repeat(px),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba8
    }

    /// Read one pixel. Callers keep `x < width` and `y < height`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ]
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba8: img.into_raw(),
        }
    }
}

/// One color sample taken at a grid point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    /// Continuous (sub-pixel) canvas-space position of the grid point.
    pub pos: Point,
    /// Color of the pixel under the grid point.
    pub color: CellColor,
}

/// Number of grid columns and rows produced for a `width x height` buffer.
pub fn grid_dims(width: u32, height: u32, cell_size: u32) -> (u32, u32) {
    (width.div_ceil(cell_size), height.div_ceil(cell_size))
}

/// Sample `pixels` on a grid with step `cell_size`, starting at `cell_size / 2` on both axes.
///
/// Cells come out row-major, `ceil(w / s) * ceil(h / s)` of them. Each cell keeps the grid
/// point's continuous position; the pixel read is clamped to the last row/column so the final,
/// partially covered grid line still samples the image edge.
#[tracing::instrument(skip(pixels), fields(width = pixels.width(), height = pixels.height()))]
pub fn sample_cells(pixels: &PixelBuffer, cell_size: u32) -> MorphResult<Vec<Cell>> {
    if cell_size == 0 {
        return Err(MorphError::validation("cell size must be > 0"));
    }

    let (cols, rows) = grid_dims(pixels.width, pixels.height, cell_size);
    let step = f64::from(cell_size);
    let half = step / 2.0;

    let mut cells = Vec::with_capacity((cols as usize) * (rows as usize));
    for row in 0..rows {
        let y = half + f64::from(row) * step;
        let py = clamp_index(y, pixels.height);
        for col in 0..cols {
            let x = half + f64::from(col) * step;
            let px = clamp_index(x, pixels.width);
            cells.push(Cell {
                pos: Point::new(x, y),
                color: CellColor::from_rgba8(pixels.pixel(px, py)),
            });
        }
    }

    tracing::debug!(cells = cells.len(), cols, rows, "sampled cells");
    Ok(cells)
}

fn clamp_index(coord: f64, dim: u32) -> u32 {
    (coord.floor().max(0.0) as u32).min(dim.saturating_sub(1))
}

#[cfg(test)]
#[path = "../../tests/unit/cells/sampler.rs"]
mod tests;
