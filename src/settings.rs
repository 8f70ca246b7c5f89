use crate::bands::BandSet;
use crate::compositor::HIGHLIGHT;
use crate::errors::{CloudError, Result};
use crate::scaling::DEFAULT_MAX_DISPLAY;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

/// Everything the detector needs, passed explicitly instead of globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Bands in paint order.
    pub bands: BandSet,
    pub highlight: [u8; 3],
    pub max_display: u32,
    /// Gaussian blur applied to the copy used for classification. Off by default.
    pub blur_sigma: Option<f32>,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            bands: BandSet::default(),
            highlight: HIGHLIGHT,
            max_display: DEFAULT_MAX_DISPLAY,
            blur_sigma: None,
        }
    }
}

impl DetectionSettings {
    /// Resolves settings from an explicit file, the user config file, or defaults.
    ///
    /// An explicit path must load cleanly. A broken file in the config
    /// directory is only warned about.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("Loading settings from {:?}", path);
            return Self::from_file(path);
        }

        if let Some(path) = Self::default_path() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(settings) => {
                        log::debug!("Loaded settings from {:?}", path);
                        return Ok(settings);
                    }
                    Err(e) => {
                        log::warn!("Ignoring settings file {:?}: {}", path, e);
                    }
                }
            }
        }

        log::debug!("Using built-in detection settings");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cloudmask", "cloudmask")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn validate(&self) -> Result<()> {
        self.bands.validate()?;

        if self.max_display == 0 {
            return Err(CloudError::InvalidSettings {
                message: "max_display must be at least 1".to_string(),
            });
        }

        if let Some(sigma) = self.blur_sigma {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(CloudError::InvalidSettings {
                    message: format!("blur_sigma must be a positive number, got {}", sigma),
                });
            }
        }

        Ok(())
    }

    pub fn highlight_color(&self) -> Rgb<u8> {
        Rgb(self.highlight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = DetectionSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bands.len(), 3);
        assert_eq!(settings.highlight_color(), Rgb([255, 255, 0]));
        assert_eq!(settings.max_display, 800);
        assert_eq!(settings.blur_sigma, None);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = DetectionSettings::from_json(r#"{"max_display": 640}"#).unwrap();
        assert_eq!(settings.max_display, 640);
        assert_eq!(settings.bands, BandSet::default());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let mut settings = DetectionSettings::default();
        settings.blur_sigma = Some(1.5);
        settings.highlight = [0, 255, 255];

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string_pretty(&settings).unwrap().as_bytes())
            .unwrap();

        let loaded = DetectionSettings::load(Some(file.path())).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_custom_bands() {
        let json = r#"{
            "bands": [
                {"name": "bright", "lower": [200, 200, 200], "upper": [255, 255, 255]}
            ]
        }"#;
        let settings = DetectionSettings::from_json(json).unwrap();
        assert_eq!(settings.bands.len(), 1);
        assert_eq!(settings.bands.iter().next().unwrap().name(), "bright");
    }

    #[test]
    fn test_inverted_band_is_rejected() {
        let json = r#"{"bands": [{"name": "bad", "lower": [10, 10, 10], "upper": [5, 20, 20]}]}"#;
        let err = DetectionSettings::from_json(json).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let zero = DetectionSettings::from_json(r#"{"max_display": 0}"#).unwrap_err();
        assert_eq!(zero.error_code(), "INVALID_SETTINGS");

        let blur = DetectionSettings::from_json(r#"{"blur_sigma": -1.0}"#).unwrap_err();
        assert_eq!(blur.error_code(), "INVALID_SETTINGS");

        let empty = DetectionSettings::from_json(r#"{"bands": []}"#).unwrap_err();
        assert_eq!(empty.error_code(), "INVALID_SETTINGS");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DetectionSettings::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = DetectionSettings::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }
}
