use image::{imageops, Rgba, RgbaImage};
use tracing::debug;

use crate::capture::CapturedPhoto;
use crate::color::parse_hex_color;
use crate::decode::decode_batch;
use crate::error::{BoothError, BoothResult};
use crate::font::{self, TextStyle};
use crate::layout::Layout;

/// Brand label stamped on every composited surface.
pub const WATERMARK_LABEL: &str = "One 2 Kie Photo Booth";

/// Baseline of the brand label, measured up from the bottom edge.
const LABEL_BASELINE_OFFSET: u32 = 40;
/// Baseline of the date line, measured up from the bottom edge.
const DATE_BASELINE_OFFSET: u32 = 18;

/// Composite a batch of captured photos onto a fresh surface: solid
/// background, photos at native resolution in their layout cells, watermark
/// footer. Every call decodes and redraws from scratch; changing the
/// background means calling this again.
#[tracing::instrument(skip(photos, layout), fields(photos = photos.len(), grid = layout.grid.as_str()))]
pub fn render_photos(
    photos: &[CapturedPhoto],
    layout: &Layout,
    background: &str,
) -> BoothResult<RgbaImage> {
    layout.validate()?;
    if photos.is_empty() {
        return Err(BoothError::EmptyInput);
    }
    if photos.len() != layout.poses {
        return Err(BoothError::PhotoCountMismatch {
            expected: layout.poses,
            actual: photos.len(),
        });
    }
    let background = parse_hex_color(background)?;

    let images = decode_batch(photos)?;
    compose_decoded(&images, layout, background)
}

/// Same operation over already-decoded bitmaps.
pub fn compose_decoded(
    images: &[RgbaImage],
    layout: &Layout,
    background: Rgba<u8>,
) -> BoothResult<RgbaImage> {
    layout.validate()?;
    if images.is_empty() {
        return Err(BoothError::EmptyInput);
    }
    if images.len() != layout.poses {
        return Err(BoothError::PhotoCountMismatch {
            expected: layout.poses,
            actual: images.len(),
        });
    }

    // All photos come from one capture session at one resolution; anything
    // else is a caller bug surfaced before any drawing happens.
    let (photo_w, photo_h) = images[0].dimensions();
    for (index, img) in images.iter().enumerate() {
        let (w, h) = img.dimensions();
        if (w, h) != (photo_w, photo_h) {
            return Err(BoothError::DimensionMismatch {
                index,
                expected_w: photo_w,
                expected_h: photo_h,
                actual_w: w,
                actual_h: h,
            });
        }
    }

    let (surface_w, surface_h) = layout.surface_size(photo_w, photo_h);
    debug!(surface_w, surface_h, photo_w, photo_h, "compositing surface");

    let mut surface = RgbaImage::from_pixel(surface_w, surface_h, background);

    for (index, img) in images.iter().enumerate() {
        let (x, y) = layout.cell_origin(index, photo_w, photo_h);
        // Native resolution, no scaling or cropping.
        imageops::replace(&mut surface, img, i64::from(x), i64::from(y));
    }

    draw_watermark(&mut surface);
    Ok(surface)
}

/// Two centered footer lines: the brand label in bold, then the render date
/// as `dd/mm/yyyy`. The date reflects render time, not capture time.
fn draw_watermark(surface: &mut RgbaImage) {
    let (w, h) = surface.dimensions();

    let label_style = TextStyle {
        scale: 2,
        bold: true,
        color: Rgba([255, 255, 255, 230]),
    };
    font::draw_text_centered(
        surface,
        WATERMARK_LABEL,
        w / 2,
        h - LABEL_BASELINE_OFFSET,
        &label_style,
    );

    let date = chrono::Local::now().format("%d/%m/%Y").to_string();
    let date_style = TextStyle {
        scale: 1,
        bold: false,
        color: Rgba([255, 255, 255, 204]),
    };
    font::draw_text_centered(surface, &date, w / 2, h - DATE_BASELINE_OFFSET, &date_style);
}
