//! The per-image transform: scale, classify, composite.

use crate::bands::{classify, Mask};
use crate::compositor::composite;
use crate::errors::Result;
use crate::profiler::with_profiler;
use crate::scaling::fit_for_display;
use crate::settings::DetectionSettings;
use image::RgbImage;
use imageproc::filter::gaussian_blur_f32;

/// Result of running the detector on one image.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The image masks were computed on, after any downscaling.
    pub display: RgbImage,
    /// `display` with matched pixels painted.
    pub annotated: RgbImage,
    /// One mask per band, in band order.
    pub masks: Vec<Mask>,
    /// New size if the source was downscaled.
    pub resized_to: Option<(u32, u32)>,
}

impl Analysis {
    /// `(band name, fraction matched)` for each mask.
    pub fn coverage(&self) -> Vec<(String, f64)> {
        self.masks
            .iter()
            .map(|m| (m.band().to_string(), m.coverage()))
            .collect()
    }
}

/// Thresholds are applied after resizing, so a large photo is classified at
/// display resolution. Blur, when enabled, only affects classification.
pub fn analyze(image: RgbImage, settings: &DetectionSettings) -> Result<Analysis> {
    settings.validate()?;

    let (display, resized_to) = fit_for_display(image, settings.max_display);

    let masks = match settings.blur_sigma {
        Some(sigma) => {
            let blurred = with_profiler(|p| p.time("blur", || gaussian_blur_f32(&display, sigma)));
            with_profiler(|p| p.time("classify", || classify(&blurred, &settings.bands)))
        }
        None => with_profiler(|p| p.time("classify", || classify(&display, &settings.bands))),
    };
    let annotated = with_profiler(|p| {
        p.time("composite", || {
            composite(&display, &masks, settings.highlight_color())
        })
    })?;

    Ok(Analysis {
        display,
        annotated,
        masks,
        resized_to,
    })
}
