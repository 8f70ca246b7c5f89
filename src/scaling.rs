use image::imageops::{self, FilterType};
use image::RgbImage;

/// Largest width or height shown on screen.
pub const DEFAULT_MAX_DISPLAY: u32 = 800;

/// Target size when the image exceeds `max_display` in either dimension.
///
/// One factor is applied to both sides, so the longer side lands on
/// `max_display` and the aspect ratio is kept to within a pixel.
pub fn display_size(width: u32, height: u32, max_display: u32) -> Option<(u32, u32)> {
    if width <= max_display && height <= max_display {
        return None;
    }

    let factor = max_display as f64 / width.max(height) as f64;
    let new_width = ((width as f64 * factor).round() as u32).max(1);
    let new_height = ((height as f64 * factor).round() as u32).max(1);
    Some((new_width, new_height))
}

/// Downscales `image` for display, returning the new size if it changed.
pub fn fit_for_display(image: RgbImage, max_display: u32) -> (RgbImage, Option<(u32, u32)>) {
    match display_size(image.width(), image.height(), max_display) {
        Some((width, height)) => {
            log::debug!(
                "resizing {}x{} to {}x{} for display",
                image.width(),
                image.height(),
                width,
                height
            );
            let resized = imageops::resize(&image, width, height, FilterType::Triangle);
            (resized, Some((width, height)))
        }
        None => (image, None),
    }
}
