//! Highlights probable cloud regions in photographs.
//!
//! Pixels are tested against fixed per-channel brightness bands, matches are
//! painted a highlight colour over a copy of the image, and the original and
//! annotated images are shown side by side.

pub mod bands;
pub mod compositor;
pub mod errors;
pub mod image_loader;
pub mod logging;
pub mod pipeline;
pub mod profiler;
pub mod report;
pub mod scaling;
pub mod settings;
pub mod stats;
pub mod viewer;


pub use errors::{CloudError, Result};
