//! Whole-image statistics over every channel of every pixel.
//!
//! The mean is computed twice on purpose: once with an explicit nested loop
//! and once from imageproc's channel histograms. The two must agree.

use image::RgbImage;
use imageproc::stats::histogram;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageStats {
    pub min: u8,
    pub max: u8,
    pub mean_direct: f64,
    pub mean_histogram: f64,
    pub std_dev: f64,
}

impl ImageStats {
    pub fn compute(image: &RgbImage) -> Self {
        let (min, max) = value_range(image);
        let mean_direct = mean_direct(image);
        let mean_histogram = mean_histogram(image);
        let std_dev = std_dev(image, mean_direct);

        if !means_agree(mean_direct, mean_histogram, 1e-6) {
            log::warn!(
                "mean cross-check disagrees: direct {} vs histogram {}",
                mean_direct,
                mean_histogram
            );
        }

        Self {
            min,
            max,
            mean_direct,
            mean_histogram,
            std_dev,
        }
    }
}

/// Smallest and largest channel value, `(0, 0)` for an empty image.
pub fn value_range(image: &RgbImage) -> (u8, u8) {
    let raw = image.as_raw();
    match (raw.iter().min(), raw.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => (0, 0),
    }
}

pub fn mean_direct(image: &RgbImage) -> f64 {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return 0.0;
    }

    let mut total: u64 = 0;
    for y in 0..height {
        for x in 0..width {
            let pixel = image.get_pixel(x, y);
            for c in 0..3 {
                total += pixel.0[c] as u64;
            }
        }
    }

    total as f64 / height as f64 / width as f64 / 3.0
}

pub fn mean_histogram(image: &RgbImage) -> f64 {
    let hist = histogram(image);

    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for channel in &hist.channels {
        for (value, &n) in channel.iter().enumerate() {
            sum += value as u64 * n as u64;
            count += n as u64;
        }
    }

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Population standard deviation around `mean`.
pub fn std_dev(image: &RgbImage, mean: f64) -> f64 {
    let raw = image.as_raw();
    if raw.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = raw
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum();

    (sum_sq / raw.len() as f64).sqrt()
}

/// Relative comparison, exact when both are zero.
pub fn means_agree(a: f64, b: f64, rel_tol: f64) -> bool {
    let scale = a.abs().max(b.abs());
    scale == 0.0 || (a - b).abs() <= rel_tol * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_uniform_image() {
        let image = RgbImage::from_pixel(4, 4, Rgb([100, 100, 100]));
        let stats = ImageStats::compute(&image);
        assert_eq!((stats.min, stats.max), (100, 100));
        assert_eq!(stats.mean_direct, 100.0);
        assert_eq!(stats.mean_histogram, 100.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_known_values() {
        // Channel values 0 and 255, half each.
        let image = RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) });
        let stats = ImageStats::compute(&image);
        assert_eq!((stats.min, stats.max), (0, 255));
        assert!((stats.mean_direct - 127.5).abs() < 1e-12);
        assert!((stats.std_dev - 127.5).abs() < 1e-12);
    }

    #[test]
    fn test_means_agree_on_noisy_image() {
        let image = RgbImage::from_fn(97, 61, |x, y| {
            let v = x.wrapping_mul(2654435761).wrapping_add(y.wrapping_mul(40503));
            Rgb([(v & 0xff) as u8, ((v >> 8) & 0xff) as u8, ((v >> 16) & 0xff) as u8])
        });
        let stats = ImageStats::compute(&image);
        assert!(means_agree(stats.mean_direct, stats.mean_histogram, 1e-6));
    }

    #[test]
    fn test_mixed_channels() {
        let image = RgbImage::from_pixel(1, 1, Rgb([10, 20, 60]));
        let stats = ImageStats::compute(&image);
        assert_eq!((stats.min, stats.max), (10, 60));
        assert!((stats.mean_direct - 30.0).abs() < 1e-12);
        // deviations -20, -10, 30 -> variance 1400 / 3
        assert!((stats.std_dev - (1400.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_image() {
        let image = RgbImage::new(0, 0);
        let stats = ImageStats::compute(&image);
        assert_eq!((stats.min, stats.max), (0, 0));
        assert_eq!(stats.mean_direct, 0.0);
        assert_eq!(stats.mean_histogram, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_means_agree_tolerance() {
        assert!(means_agree(0.0, 0.0, 1e-6));
        assert!(means_agree(100.0, 100.00001, 1e-6));
        assert!(!means_agree(100.0, 100.1, 1e-6));
    }
}
