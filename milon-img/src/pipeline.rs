//! Image normalization pipeline.
//!
//! Every stored illustration is an exactly square PNG: the source image is
//! downscaled (never upscaled) to fit, then centered on a fixed-size canvas.
//! Alpha-capable sources keep a transparent background, opaque sources get
//! white. The presentation layer depends on every asset having identical
//! dimensions.

use crate::error::ImagingError;
use async_trait::async_trait;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use milon_core::config::ImageConfig;
use milon_core::model::ImageCandidate;
use reqwest::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Fetch-and-normalize boundary the workflow engine sees, so tests can
/// substitute a preparer that never touches the network.
#[async_trait]
pub trait ImagePreparer: Send + Sync {
    /// Fetch an image URL and return PNG bytes normalized to a `size`
    /// square.
    async fn fetch_square_png(&self, url: &str, size: u32) -> Result<Vec<u8>, ImagingError>;

    /// Fetch, normalize to the canonical size, and write the PNG to `dest`,
    /// creating parent directories.
    async fn save_prepared(&self, url: &str, dest: &Path) -> Result<(), ImagingError>;
}

/// Fetches candidate images and produces normalized square PNGs.
pub struct ImagePipeline {
    client: Client,
    canonical_size: u32,
    preview_size: u32,
}

impl ImagePipeline {
    pub fn new(config: &ImageConfig) -> Result<Self, ImagingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| ImagingError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            canonical_size: config.canonical_size,
            preview_size: config.preview_size,
        })
    }

    pub fn canonical_size(&self) -> u32 {
        self.canonical_size
    }

    pub fn preview_size(&self) -> u32 {
        self.preview_size
    }
}

#[async_trait]
impl ImagePreparer for ImagePipeline {
    async fn fetch_square_png(&self, url: &str, size: u32) -> Result<Vec<u8>, ImagingError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImagingError::Search(format!(
                "Image fetch failed with HTTP {}",
                status
            )));
        }
        let raw = response.bytes().await?;
        square_png_from_bytes(&raw, size)
    }

    /// The only disk effect in this crate; not transactional. A commit
    /// re-run by id overwrites a partial file.
    async fn save_prepared(&self, url: &str, dest: &Path) -> Result<(), ImagingError> {
        let bytes = self.fetch_square_png(url, self.canonical_size).await?;
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(dest, &bytes)?;
        debug!("Prepared image written to {}", dest.display());
        Ok(())
    }
}

/// Attach normalized previews to search candidates. Failure is per
/// candidate: a preview that cannot be prepared stays `None` and the rest of
/// the list remains usable.
pub async fn prepare_previews(
    preparer: &dyn ImagePreparer,
    candidates: &mut [ImageCandidate],
    preview_size: u32,
) {
    for (idx, candidate) in candidates.iter_mut().enumerate() {
        let url = match candidate.best_preview_url() {
            Some(url) => url.to_string(),
            None => continue,
        };
        match preparer.fetch_square_png(&url, preview_size).await {
            Ok(bytes) => candidate.preview_bytes = Some(bytes),
            Err(e) => {
                warn!("Preview {} could not be prepared: {}", idx + 1, e);
                candidate.preview_bytes = None;
            }
        }
    }
}

/// Decode raw bytes and normalize them to a `size` square PNG.
pub fn square_png_from_bytes(raw: &[u8], size: u32) -> Result<Vec<u8>, ImagingError> {
    let decoded = image::load_from_memory(raw).map_err(ImagingError::Decode)?;
    fit_to_square(&decoded, size)
}

/// Normalize a decoded image to a `size` square PNG.
pub fn fit_to_square(source: &DynamicImage, size: u32) -> Result<Vec<u8>, ImagingError> {
    let (width, height) = (source.width(), source.height());
    let (fit_w, fit_h) = fit_dimensions(width, height, size);

    let resized = if (fit_w, fit_h) == (width, height) {
        source.clone()
    } else {
        source.resize_exact(fit_w, fit_h, FilterType::Lanczos3)
    };

    let offset_x = ((size - fit_w) / 2) as i64;
    let offset_y = ((size - fit_h) / 2) as i64;

    if source.color().has_alpha() {
        let mut canvas = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 0]));
        imageops::overlay(&mut canvas, &resized.to_rgba8(), offset_x, offset_y);
        encode_png(canvas.as_raw(), size, ColorType::Rgba8)
    } else {
        let mut canvas = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
        imageops::overlay(&mut canvas, &resized.to_rgb8(), offset_x, offset_y);
        encode_png(canvas.as_raw(), size, ColorType::Rgb8)
    }
}

/// Dimensions that fit within a `target` square preserving aspect ratio,
/// downscaling only.
fn fit_dimensions(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width <= target && height <= target {
        return (width, height);
    }
    let scale = (target as f64 / width as f64).min(target as f64 / height as f64);
    let fit_w = ((width as f64 * scale).round() as u32).clamp(1, target);
    let fit_h = ((height as f64 * scale).round() as u32).clamp(1, target);
    (fit_w, fit_h)
}

fn encode_png(pixels: &[u8], size: u32, color: ColorType) -> Result<Vec<u8>, ImagingError> {
    let mut out = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(pixels, size, size, color)
        .map_err(ImagingError::Encode)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_dimensions_never_upscales() {
        assert_eq!(fit_dimensions(100, 50, 512), (100, 50));
        assert_eq!(fit_dimensions(1, 1, 512), (1, 1));
    }

    #[test]
    fn test_fit_dimensions_downscales_preserving_ratio() {
        assert_eq!(fit_dimensions(1024, 512, 512), (512, 256));
        assert_eq!(fit_dimensions(512, 1024, 512), (256, 512));
        assert_eq!(fit_dimensions(1000, 1000, 512), (512, 512));
    }

    #[test]
    fn test_fit_dimensions_clamps_to_at_least_one_pixel() {
        let (w, h) = fit_dimensions(10_000, 3, 512);
        assert_eq!(w, 512);
        assert!(h >= 1);
    }
}
