//! Image sources: server-rendered images available for arbitrary extents
//! and resolutions.
//!
//! A source never fetches anything here. It answers the question "what would
//! you load for this extent at this resolution?" with an [`ImageRequest`],
//! and the consumer of the render plan does the actual I/O.

pub mod static_image;
pub mod wms;

pub use static_image::StaticImageSource;
pub use wms::WmsImageSource;

use crate::core::{extent::Extent, geo::Size};
use serde::{Deserialize, Serialize};

/// A single image a source wants loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub url: String,
    /// Map extent the image covers
    pub extent: Extent,
    /// Map units per CSS pixel the image was requested at
    pub resolution: f64,
    pub pixel_ratio: f64,
    /// Image size in device pixels
    pub size: Size,
}

/// Capability required from the source of an image layer
pub trait ImageSource: Send + Sync + std::fmt::Debug {
    /// Describe the image covering `extent` at exactly `resolution`, or
    /// `None` when the source has nothing to show there.
    fn image_request(&self, extent: &Extent, resolution: f64, pixel_ratio: f64)
        -> Option<ImageRequest>;

    /// Resolutions the source can serve, highest first. `None` means any.
    fn resolutions(&self) -> Option<&[f64]> {
        None
    }

    /// The supported resolution closest to `resolution`
    fn nearest_resolution(&self, resolution: f64) -> f64 {
        match self.resolutions() {
            Some(resolutions) if !resolutions.is_empty() => resolutions
                .iter()
                .copied()
                .fold(resolutions[0], |best, candidate| {
                    if (candidate - resolution).abs() < (best - resolution).abs() {
                        candidate
                    } else {
                        best
                    }
                }),
            _ => resolution,
        }
    }

    /// Entry point used by the renderer: snaps the resolution, then asks for
    /// the image
    fn image(&self, extent: &Extent, resolution: f64, pixel_ratio: f64) -> Option<ImageRequest> {
        if extent.is_empty() || !(resolution > 0.0) || !resolution.is_finite() {
            return None;
        }
        self.image_request(extent, self.nearest_resolution(resolution), pixel_ratio)
    }
}

/// Pixel size of `extent` rendered at `resolution` on a `pixel_ratio` screen
pub(crate) fn image_size(extent: &Extent, resolution: f64, pixel_ratio: f64) -> Size {
    let image_resolution = resolution / pixel_ratio;
    Size::new(
        (extent.width() / image_resolution).ceil() as u32,
        (extent.height() / image_resolution).ceil() as u32,
    )
}
