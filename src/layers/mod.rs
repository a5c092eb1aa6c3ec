mod macros;

pub mod base;
pub mod collection;
pub mod image;
pub mod observable;

use crate::layers::{
    base::{LayerAttachment, LayerKind, LayerState, LayerTrait},
    image::ImageLayer,
    macros::with_layer,
};

/// Every layer a map can hold, one variant per layer kind with its own
/// configuration. The renderer matches on the variant to pick a strategy.
#[derive(Debug)]
#[non_exhaustive]
pub enum Layer {
    Image(ImageLayer),
}

impl Layer {
    pub fn id(&self) -> &str {
        with_layer!(self, layer => layer.base().id())
    }

    pub fn kind(&self) -> LayerKind {
        with_layer!(self, layer => layer.base().kind())
    }

    pub fn layer_state(&self) -> LayerState {
        with_layer!(self, layer => layer.base().layer_state())
    }

    pub fn attachment(&self) -> LayerAttachment {
        with_layer!(self, layer => layer.base().attachment())
    }

    pub(crate) fn set_attachment(&mut self, attachment: LayerAttachment) {
        with_layer!(self, layer => layer.base_mut().set_attachment(attachment))
    }

    pub fn as_image(&self) -> Option<&ImageLayer> {
        match self {
            Layer::Image(layer) => Some(layer),
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageLayer> {
        match self {
            Layer::Image(layer) => Some(layer),
        }
    }
}

impl From<ImageLayer> for Layer {
    fn from(layer: ImageLayer) -> Self {
        Layer::Image(layer)
    }
}
