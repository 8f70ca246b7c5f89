//! Brightness band classification.
//!
//! A band is an inclusive per-channel range. Each pixel is tested against
//! every band independently, so a pixel whose channels straddle a shared
//! boundary can match two bands at once.

use crate::errors::{CloudError, Result};
use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

// Boundary colours, in R, G, B order.
pub const DARK_GREY: [u8; 3] = [60, 60, 60];
pub const MEDIUM_GREY: [u8; 3] = [120, 120, 100];
pub const LIGHT_GREY: [u8; 3] = [150, 150, 150];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Mask value for a pixel inside the band.
pub const MATCHED: u8 = 255;
/// Mask value for a pixel outside the band.
pub const UNMATCHED: u8 = 0;

/// Serialized form of a band, validated into [`Band`] on load.
#[derive(Debug, Clone, Deserialize)]
pub struct BandSpec {
    name: String,
    lower: [u8; 3],
    upper: [u8; 3],
}

impl TryFrom<BandSpec> for Band {
    type Error = CloudError;

    fn try_from(spec: BandSpec) -> Result<Self> {
        Band::new(spec.name, spec.lower, spec.upper)
    }
}

/// An immutable, validated channel-wise range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BandSpec")]
pub struct Band {
    name: String,
    lower: [u8; 3],
    upper: [u8; 3],
}

impl Band {
    pub fn new(name: impl Into<String>, lower: [u8; 3], upper: [u8; 3]) -> Result<Self> {
        let name = name.into();
        for channel in 0..3 {
            if lower[channel] > upper[channel] {
                return Err(CloudError::InvalidBand {
                    band: name,
                    channel,
                    lower: lower[channel],
                    upper: upper[channel],
                });
            }
        }
        Ok(Self { name, lower, upper })
    }

    // Only for compile-time constants that are known to be ordered.
    fn fixed(name: &str, lower: [u8; 3], upper: [u8; 3]) -> Self {
        debug_assert!(lower.iter().zip(upper.iter()).all(|(lo, hi)| lo <= hi));
        Self {
            name: name.to_string(),
            lower,
            upper,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lower(&self) -> [u8; 3] {
        self.lower
    }

    pub fn upper(&self) -> [u8; 3] {
        self.upper
    }

    /// Inclusive test on each channel on its own.
    pub fn contains(&self, pixel: &Rgb<u8>) -> bool {
        pixel
            .0
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(value, (lo, hi))| lo <= value && value <= hi)
    }
}

/// The ordered set of bands. Order decides composite paint order only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandSet {
    bands: Vec<Band>,
}

impl Default for BandSet {
    fn default() -> Self {
        Self {
            bands: vec![
                Band::fixed("dark", DARK_GREY, MEDIUM_GREY),
                Band::fixed("medium", MEDIUM_GREY, LIGHT_GREY),
                Band::fixed("light", LIGHT_GREY, WHITE),
            ],
        }
    }
}

impl BandSet {
    pub fn new(bands: Vec<Band>) -> Result<Self> {
        let set = Self { bands };
        set.validate()?;
        Ok(set)
    }

    /// Rejects empty sets and duplicate band names.
    pub fn validate(&self) -> Result<()> {
        if self.bands.is_empty() {
            return Err(CloudError::InvalidSettings {
                message: "at least one band is required".to_string(),
            });
        }
        for (i, band) in self.bands.iter().enumerate() {
            if self.bands[..i].iter().any(|b| b.name == band.name) {
                return Err(CloudError::InvalidSettings {
                    message: format!("band name '{}' is used more than once", band.name),
                });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Band> {
        self.bands.iter()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

/// Binary per-pixel result of testing one band.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    band: String,
    pixels: GrayImage,
}

impl Mask {
    pub fn band(&self) -> &str {
        &self.band
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn is_matched(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y).0[0] == MATCHED
    }

    pub fn matched_count(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[0] == MATCHED).count()
    }

    /// Fraction of pixels matched, 0.0 for an empty image.
    pub fn coverage(&self) -> f64 {
        let total = self.pixels.width() as usize * self.pixels.height() as usize;
        if total == 0 {
            0.0
        } else {
            self.matched_count() as f64 / total as f64
        }
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.pixels
    }
}

/// One mask per band, in band order.
pub fn classify(image: &RgbImage, bands: &BandSet) -> Vec<Mask> {
    let (width, height) = image.dimensions();
    bands
        .iter()
        .map(|band| {
            let pixels = GrayImage::from_fn(width, height, |x, y| {
                if band.contains(image.get_pixel(x, y)) {
                    Luma([MATCHED])
                } else {
                    Luma([UNMATCHED])
                }
            });
            let mask = Mask {
                band: band.name.clone(),
                pixels,
            };
            log::debug!(
                "band '{}' matched {} of {} pixels",
                band.name,
                mask.matched_count(),
                width as u64 * height as u64
            );
            mask
        })
        .collect()
}
