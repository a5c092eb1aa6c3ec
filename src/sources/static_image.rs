use crate::{
    core::{extent::Extent, geo::Size},
    sources::{image_size, ImageRequest, ImageSource},
};

/// A single image georeferenced to a fixed extent
#[derive(Debug, Clone, PartialEq)]
pub struct StaticImageSource {
    url: String,
    image_extent: Extent,
    image_size: Option<Size>,
}

impl StaticImageSource {
    pub fn new(url: impl Into<String>, image_extent: Extent) -> Self {
        Self {
            url: url.into(),
            image_extent,
            image_size: None,
        }
    }

    /// Native pixel size of the image, if known. Requests then always use
    /// the image's own resolution.
    pub fn with_image_size(mut self, size: Size) -> Self {
        self.image_size = Some(size);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn image_extent(&self) -> Extent {
        self.image_extent
    }
}

impl ImageSource for StaticImageSource {
    fn image_request(&self, extent: &Extent, resolution: f64, pixel_ratio: f64) -> Option<ImageRequest> {
        if !self.image_extent.intersects(extent) {
            return None;
        }

        let (resolution, size) = match self.image_size {
            Some(size) if !size.is_empty() => {
                (self.image_extent.width() / size.width as f64, size)
            }
            _ => (
                resolution,
                image_size(&self.image_extent, resolution, pixel_ratio),
            ),
        };

        Some(ImageRequest {
            url: self.url.clone(),
            extent: self.image_extent,
            resolution,
            pixel_ratio,
            size,
        })
    }
}
