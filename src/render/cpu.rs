use crate::foundation::core::{Point, SampleColor};
use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::{premul_over_px, premul_rgba8};
use crate::render::surface::{FrameRGBA, Surface};

/// Options for [`CpuSurface`].
#[derive(Debug, Clone, Copy)]
pub struct CpuSurfaceOpts {
    /// Straight-alpha RGBA8 the surface is cleared to before particles are composited.
    pub clear_rgba: [u8; 4],
}

impl Default for CpuSurfaceOpts {
    fn default() -> Self {
        Self {
            clear_rgba: [18, 20, 28, 255],
        }
    }
}

/// CPU rasterizer surface powered by `vello_cpu`.
///
/// Fills are recorded into a `RenderContext` and rasterized on [`CpuSurface::snapshot`].
/// `vello_cpu` renders into a fresh buffer, so the particles land on a transparent pixmap and are
/// then composited over the clear color.
pub struct CpuSurface {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    clear_premul: [u8; 4],
    width: u32,
    height: u32,
}

impl CpuSurface {
    /// Create a surface of `width x height` pixels.
    pub fn new(width: u32, height: u32, opts: CpuSurfaceOpts) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::validation("surface width/height must be non-zero"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| MorphError::validation("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| MorphError::validation("surface height exceeds u16"))?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            clear_premul: premul_rgba8(opts.clear_rgba),
            width,
            height,
        })
    }

    /// Rasterize everything painted since the last clear and read the frame back.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let mut data = Vec::with_capacity(self.pixmap.data_as_u8_slice().len());
        for px in self.pixmap.data_as_u8_slice().chunks_exact(4) {
            let src = [px[0], px[1], px[2], px[3]];
            data.extend_from_slice(&premul_over_px(self.clear_premul, src));
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: true,
        }
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ctx.reset();
    }

    fn fill_square(&mut self, center: Point, side: f64, color: SampleColor) {
        let half = side / 2.0;
        let [r, g, b, a] = color.to_rgba8();
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
