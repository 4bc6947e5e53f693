use image::imageops::{self, FilterType};

use crate::cells::sampler::PixelBuffer;
use crate::foundation::error::{MorphError, MorphResult};

/// Where a cover-fitted image lands on the output surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverPlacement {
    /// Scaled image width.
    pub draw_width: f64,
    /// Scaled image height.
    pub draw_height: f64,
    /// Left edge of the scaled image (<= 0 when cropped horizontally).
    pub offset_x: f64,
    /// Top edge of the scaled image (<= 0 when cropped vertically).
    pub offset_y: f64,
}

/// Aspect-preserving scale that fully covers `out_w x out_h`, centered.
pub fn cover_placement(img_w: u32, img_h: u32, out_w: u32, out_h: u32) -> CoverPlacement {
    let out_w = f64::from(out_w);
    let out_h = f64::from(out_h);
    let canvas_ratio = out_w / out_h;
    let image_ratio = f64::from(img_w) / f64::from(img_h);

    if image_ratio > canvas_ratio {
        let draw_width = out_h * image_ratio;
        CoverPlacement {
            draw_width,
            draw_height: out_h,
            offset_x: (out_w - draw_width) / 2.0,
            offset_y: 0.0,
        }
    } else {
        let draw_height = out_w / image_ratio;
        CoverPlacement {
            draw_width: out_w,
            draw_height,
            offset_x: 0.0,
            offset_y: (out_h - draw_height) / 2.0,
        }
    }
}

/// Crop the part of `img` that stays visible after cover-fitting, then scale it to exactly
/// `out_w x out_h` and read the pixels back.
///
/// Cropping happens in source space, so extreme aspect ratios never allocate more than the source
/// and the output.
#[tracing::instrument(skip(img), fields(src_w = img.width(), src_h = img.height()))]
pub fn cover_fit(img: &image::DynamicImage, out_w: u32, out_h: u32) -> MorphResult<PixelBuffer> {
    if out_w == 0 || out_h == 0 {
        return Err(MorphError::validation("cover surface must be non-empty"));
    }
    if img.width() == 0 || img.height() == 0 {
        return Err(MorphError::validation("cannot cover-fit an empty image"));
    }

    let (x, y, w, h) = visible_source_rect(img.width(), img.height(), out_w, out_h);
    let visible = img.crop_imm(x, y, w, h).to_rgba8();
    let fitted = if (w, h) == (out_w, out_h) {
        visible
    } else {
        imageops::resize(&visible, out_w, out_h, FilterType::Triangle)
    };

    Ok(PixelBuffer::from(fitted))
}

/// Source-space rectangle `(x, y, w, h)` that maps onto the output under [`cover_placement`].
///
/// Always at least one pixel on each side and inside the image.
pub fn visible_source_rect(
    img_w: u32,
    img_h: u32,
    out_w: u32,
    out_h: u32,
) -> (u32, u32, u32, u32) {
    let place = cover_placement(img_w, img_h, out_w, out_h);
    let to_src = f64::from(img_w) / place.draw_width;

    let w = (f64::from(out_w) * to_src).round().clamp(1.0, f64::from(img_w)) as u32;
    let h = (f64::from(out_h) * to_src).round().clamp(1.0, f64::from(img_h)) as u32;
    let x = (-place.offset_x * to_src).round().clamp(0.0, f64::from(img_w - w)) as u32;
    let y = (-place.offset_y * to_src).round().clamp(0.0, f64::from(img_h - h)) as u32;
    (x, y, w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cover.rs"]
mod tests;
