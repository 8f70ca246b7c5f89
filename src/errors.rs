use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Failed to load image '{path}': {message}")]
    ImageLoadError { path: PathBuf, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid band '{band}': channel {channel} has lower bound {lower} above upper bound {upper}")]
    InvalidBand {
        band: String,
        channel: usize,
        lower: u8,
        upper: u8,
    },

    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("Mask for band '{band}' is {mask_width}x{mask_height} but the image is {image_width}x{image_height}")]
    DimensionMismatch {
        band: String,
        mask_width: u32,
        mask_height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Display error: {message}")]
    DisplayError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CloudError>;

impl CloudError {
    /// Returns a user-friendly error message with recovery suggestions
    pub fn user_message(&self) -> String {
        let suggestion = match self {
            CloudError::FileNotFound { .. } => "Check the path and that you have permission to read it.",
            CloudError::ImageLoadError { .. } => "The file may be corrupted or in a format this build cannot decode.",
            CloudError::InvalidBand { .. } => "Every band needs lower <= upper on each of the three channels.",
            CloudError::InvalidSettings { .. } => "Fix the settings file or remove it to fall back to the built-in defaults.",
            CloudError::DimensionMismatch { .. } => "Masks must be computed from the image they are composited onto.",
            CloudError::DisplayError { .. } => "No usable display was found. Run with --no-window for a headless run.",
            CloudError::IoError { .. } => "File system error occurred. Check the path and permissions.",
            CloudError::JsonError { .. } => "The settings file is not valid JSON for this program.",
        };

        format!("{}\n\n{}", self, suggestion)
    }

    /// Returns an error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CloudError::ImageLoadError { .. } => "IMAGE_LOAD_ERROR",
            CloudError::FileNotFound { .. } => "FILE_NOT_FOUND",
            CloudError::InvalidBand { .. } => "INVALID_BAND",
            CloudError::InvalidSettings { .. } => "INVALID_SETTINGS",
            CloudError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            CloudError::DisplayError { .. } => "DISPLAY_ERROR",
            CloudError::IoError { .. } => "IO_ERROR",
            CloudError::JsonError { .. } => "JSON_ERROR",
        }
    }

    /// True for problems with the configuration rather than with one input image.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CloudError::InvalidBand { .. }
                | CloudError::InvalidSettings { .. }
                | CloudError::JsonError { .. }
        )
    }

    /// Logs the error and prints the user-facing message on stderr
    pub fn log_and_report(&self) {
        log::error!("[{}] {}", self.error_code(), self);
        eprintln!("Error [{}]: {}", self.error_code(), self.user_message());
    }
}
