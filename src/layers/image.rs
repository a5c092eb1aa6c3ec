//! Layers showing server-rendered images that are available for arbitrary
//! extents and resolutions.

use crate::{
    layers::base::{BaseLayer, LayerKind, LayerOptions, LayerTrait},
    prelude::Arc,
    sources::ImageSource,
    Result,
};
use serde::{Deserialize, Serialize};

/// Options an [`ImageLayer`] is built from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLayerOptions {
    /// Options shared with every layer kind
    #[serde(flatten)]
    pub layer: LayerOptions,
    /// Source of the layer's images. Never read from or written to JSON.
    #[serde(skip)]
    pub source: Option<Arc<dyn ImageSource>>,
    /// Request a fresh image on every frame while the view animates,
    /// instead of reusing the last rendered one until the animation ends
    pub update_while_animating: bool,
    /// Same as `update_while_animating`, for user interaction (drag-pan,
    /// pinch-zoom)
    pub update_while_interacting: bool,
}

impl ImageLayerOptions {
    /// Parses options from JSON. The source can't be described in JSON and
    /// has to be set with [`with_source`](Self::with_source).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_layer_options(mut self, layer: LayerOptions) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_source(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_update_while_animating(mut self, update: bool) -> Self {
        self.update_while_animating = update;
        self
    }

    pub fn with_update_while_interacting(mut self, update: bool) -> Self {
        self.update_while_interacting = update;
        self
    }
}

/// Layer backed by an [`ImageSource`]
#[derive(Debug)]
pub struct ImageLayer {
    base: BaseLayer<dyn ImageSource>,
    update_while_animating: bool,
    update_while_interacting: bool,
}

impl ImageLayer {
    pub fn new(options: ImageLayerOptions) -> Self {
        let ImageLayerOptions {
            layer,
            source,
            update_while_animating,
            update_while_interacting,
        } = options;

        Self {
            base: BaseLayer::new(LayerKind::Image, layer, source),
            update_while_animating,
            update_while_interacting,
        }
    }

    /// Whether the rendered layer should be updated while animating
    pub fn update_while_animating(&self) -> bool {
        self.update_while_animating
    }

    /// Whether the rendered layer should be updated while interacting
    pub fn update_while_interacting(&self) -> bool {
        self.update_while_interacting
    }
}

impl Default for ImageLayer {
    fn default() -> Self {
        Self::new(ImageLayerOptions::default())
    }
}

impl LayerTrait for ImageLayer {
    type Source = dyn ImageSource;

    fn base(&self) -> &BaseLayer<dyn ImageSource> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseLayer<dyn ImageSource> {
        &mut self.base
    }
}
