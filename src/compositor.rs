use crate::bands::Mask;
use crate::errors::{CloudError, Result};
use image::{imageops, Rgb, RgbImage};

/// Default highlight colour (yellow), in R, G, B order.
pub const HIGHLIGHT: [u8; 3] = [255, 255, 0];

/// Paints matched pixels of every mask onto a copy of `image`.
///
/// Masks are applied in order and a later mask simply overwrites what an
/// earlier one painted. The source image is never touched.
pub fn composite(image: &RgbImage, masks: &[Mask], highlight: Rgb<u8>) -> Result<RgbImage> {
    let mut out = image.clone();

    for mask in masks {
        let (mask_width, mask_height) = mask.dimensions();
        if (mask_width, mask_height) != out.dimensions() {
            return Err(CloudError::DimensionMismatch {
                band: mask.band().to_string(),
                mask_width,
                mask_height,
                image_width: out.width(),
                image_height: out.height(),
            });
        }

        for (x, y, pixel) in out.enumerate_pixels_mut() {
            if mask.is_matched(x, y) {
                *pixel = highlight;
            }
        }
    }

    Ok(out)
}

/// Places `left` and `right` next to each other on a black canvas.
pub fn side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::new(width, height);

    imageops::replace(&mut canvas, left, 0, 0);
    imageops::replace(&mut canvas, right, left.width() as i64, 0);

    canvas
}
