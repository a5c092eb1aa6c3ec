//! OGC WMS `GetMap` source
//!
//! Builds one GetMap URL per requested view extent. The requested extent is
//! grown by `ratio` so small pans can be served from the last image.

use crate::{
    core::{constants::DEFAULT_WMS_RATIO, extent::Extent, geo::Size},
    sources::{image_size, ImageRequest, ImageSource},
    Result,
};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct WmsImageSource {
    url: Url,
    layers: String,
    styles: String,
    format: String,
    version: String,
    crs: String,
    transparent: bool,
    ratio: f64,
    params: Vec<(String, String)>,
    resolutions: Option<Vec<f64>>,
}

impl WmsImageSource {
    /// Fails when `url` is not an absolute URL
    pub fn new(url: &str, layers: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            layers: layers.into(),
            styles: String::new(),
            format: "image/png".to_string(),
            version: "1.3.0".to_string(),
            crs: "EPSG:3857".to_string(),
            transparent: true,
            ratio: DEFAULT_WMS_RATIO,
            params: Vec::new(),
            resolutions: None,
        })
    }

    pub fn with_styles(mut self, styles: impl Into<String>) -> Self {
        self.styles = styles.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = crs.into();
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Values below 1 are treated as 1
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Extra query parameter. Replaces a standard parameter of the same
    /// name (case-insensitive), otherwise appended after them.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn with_resolutions(mut self, resolutions: Vec<f64>) -> Self {
        self.resolutions = Some(resolutions);
        self
    }

    pub fn layers(&self) -> &str {
        &self.layers
    }

    pub fn ratio(&self) -> f64 {
        self.ratio.max(1.0)
    }

    fn is_v13(&self) -> bool {
        self.version.starts_with("1.3")
    }

    /// WMS 1.3 uses the CRS's own axis order; EPSG:4326 is latitude first
    fn swaps_axes(&self) -> bool {
        self.is_v13() && self.crs.eq_ignore_ascii_case("EPSG:4326")
    }

    /// GetMap URL for `extent` rendered into an image of `size` pixels
    pub fn get_map_url(&self, extent: &Extent, size: Size) -> String {
        let bbox = if self.swaps_axes() {
            [extent.min_y, extent.min_x, extent.max_y, extent.max_x]
        } else {
            extent.to_array()
        };
        let bbox = bbox
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let crs_key = if self.is_v13() { "CRS" } else { "SRS" };
        let mut pairs: Vec<(String, String)> = vec![
            ("SERVICE".into(), "WMS".into()),
            ("VERSION".into(), self.version.clone()),
            ("REQUEST".into(), "GetMap".into()),
            ("FORMAT".into(), self.format.clone()),
            ("TRANSPARENT".into(), self.transparent.to_string()),
            ("LAYERS".into(), self.layers.clone()),
            ("STYLES".into(), self.styles.clone()),
            (crs_key.into(), self.crs.clone()),
            ("WIDTH".into(), size.width.to_string()),
            ("HEIGHT".into(), size.height.to_string()),
            ("BBOX".into(), bbox),
        ];

        for (key, value) in &self.params {
            match pairs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
                Some(pair) => pair.1 = value.clone(),
                None => pairs.push((key.clone(), value.clone())),
            }
        }

        let mut url = self.url.clone();
        url.query_pairs_mut().extend_pairs(pairs);
        url.into()
    }
}

impl ImageSource for WmsImageSource {
    fn image_request(&self, extent: &Extent, resolution: f64, pixel_ratio: f64) -> Option<ImageRequest> {
        let request_extent = extent.scale_from_center(self.ratio());
        let size = image_size(&request_extent, resolution, pixel_ratio);
        if size.is_empty() {
            return None;
        }

        Some(ImageRequest {
            url: self.get_map_url(&request_extent, size),
            extent: request_extent,
            resolution,
            pixel_ratio,
            size,
        })
    }

    fn resolutions(&self) -> Option<&[f64]> {
        self.resolutions.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;

    fn source() -> WmsImageSource {
        WmsImageSource::new("https://example.com/wms", "roads").unwrap()
    }

    #[test]
    fn test_get_map_url() {
        let url = source().get_map_url(&Extent::new(0.0, 0.0, 100.0, 50.5), Size::new(100, 50));
        assert_eq!(
            url,
            "https://example.com/wms?SERVICE=WMS&VERSION=1.3.0&REQUEST=GetMap&FORMAT=image%2Fpng\
             &TRANSPARENT=true&LAYERS=roads&STYLES=&CRS=EPSG%3A3857&WIDTH=100&HEIGHT=50\
             &BBOX=0%2C0%2C100%2C50.5"
        );
    }

    #[test]
    fn test_v111_uses_srs_and_keeps_axis_order() {
        let url = source()
            .with_version("1.1.1")
            .with_crs("EPSG:4326")
            .get_map_url(&Extent::new(1.0, 2.0, 3.0, 4.0), Size::new(10, 10));
        assert!(url.contains("&SRS=EPSG%3A4326&"));
        assert!(url.ends_with("BBOX=1%2C2%2C3%2C4"));
    }

    #[test]
    fn test_v13_geographic_swaps_axes() {
        let url = source()
            .with_crs("EPSG:4326")
            .get_map_url(&Extent::new(1.0, 2.0, 3.0, 4.0), Size::new(10, 10));
        assert!(url.ends_with("BBOX=2%2C1%2C4%2C3"));
    }

    #[test]
    fn test_extra_params_override_or_append() {
        let url = source()
            .with_param("format", "image/jpeg")
            .with_param("TIME", "2020-01-01")
            .get_map_url(&Extent::new(0.0, 0.0, 1.0, 1.0), Size::new(1, 1));
        assert!(url.contains("FORMAT=image%2Fjpeg"));
        assert!(!url.contains("image%2Fpng"));
        assert!(url.ends_with("&TIME=2020-01-01"));
    }

    #[test]
    fn test_request_is_grown_by_ratio() {
        let request = source()
            .with_ratio(2.0)
            .image(&Extent::new(0.0, 0.0, 100.0, 100.0), 1.0, 1.0)
            .unwrap();
        assert_eq!(request.extent, Extent::new(-50.0, -50.0, 150.0, 150.0));
        assert_eq!(request.size, Size::new(200, 200));

        let unscaled = source()
            .with_ratio(0.5)
            .image(&Extent::new(0.0, 0.0, 100.0, 100.0), 1.0, 2.0)
            .unwrap();
        assert_eq!(unscaled.extent, Extent::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(unscaled.size, Size::new(200, 200));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = WmsImageSource::new("not a url", "roads");
        assert!(matches!(result, Err(MapError::Url(_))));
    }
}
