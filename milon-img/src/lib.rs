//! milon-img: candidate images for vocabulary entries
//!
//! Two concerns: searching an image provider for candidate illustrations,
//! and normalizing a chosen image into the fixed-size square PNG that the
//! presentation layer depends on.

pub mod error;
pub mod pipeline;
pub mod search;

pub use error::ImagingError;
pub use pipeline::{prepare_previews, ImagePipeline, ImagePreparer};
pub use search::{ImageSearchProvider, PixabaySearch};
