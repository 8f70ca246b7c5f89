use crate::errors::{CloudError, Result};
use image::RgbImage;
use std::path::Path;

/// Decodes `path` into 8-bit RGB.
///
/// Grey, alpha and 16-bit sources are converted, so callers always get
/// exactly three 8-bit channels.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(CloudError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    if !super::extensions::is_supported_image(path) {
        log::debug!("Unrecognised extension for {:?}; letting the decoder guess", path);
    }

    let decoded = crate::profiler::with_profiler(|p| p.time("image_load", || image::open(path)))
        .map_err(|e| CloudError::ImageLoadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    log::debug!(
        "Decoded {:?}: {}x{} {:?}",
        path,
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    Ok(decoded.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

    #[test]
    fn test_missing_file() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_loads_rgb_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sky.png");
        RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])).save(&path).unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(*image.get_pixel(2, 1), Rgb([10, 20, 30]));
    }

    #[test]
    fn test_grey_and_alpha_become_rgb() {
        let dir = tempfile::tempdir().unwrap();

        let grey_path = dir.path().join("grey.png");
        GrayImage::from_pixel(2, 2, Luma([77])).save(&grey_path).unwrap();
        assert_eq!(*load_image(&grey_path).unwrap().get_pixel(0, 0), Rgb([77, 77, 77]));

        let rgba_path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])).save(&rgba_path).unwrap();
        assert_eq!(*load_image(&rgba_path).unwrap().get_pixel(1, 1), Rgb([1, 2, 3]));
    }

    #[test]
    fn test_garbage_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"this is not a png").unwrap();

        let err = load_image(&path).unwrap_err();
        assert_eq!(err.error_code(), "IMAGE_LOAD_ERROR");
        assert!(err.to_string().contains("broken.png"));
    }
}
