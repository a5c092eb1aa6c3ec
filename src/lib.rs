//! # maplayer
//!
//! Layers backed by server-rendered images, and the pieces of a map stack
//! they plug into.
//!
//! A [`Map`] owns a [`View`](crate::core::view::View), an ordered
//! [`LayerCollection`] and a set of overlay layers. Each frame it snapshots
//! the view and every layer's state into a
//! [`FrameState`](crate::rendering::frame::FrameState) and hands it to the
//! [`MapRenderer`], which decides per layer whether and what to draw. Image
//! layers carry two flags that decide whether the renderer may ask the
//! source for a fresh image while the view is animating or being
//! interacted with, or has to reuse the last rendered snapshot.
//!
//! Nothing in this crate fetches or decodes images. Sources describe the
//! request they would make ([`ImageRequest`]); the render plan is a queue of
//! draw commands.

pub mod core;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod sources;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    extent::Extent,
    geo::{Point, Size},
    map::Map,
    view::{View, ViewHint, ViewOptions},
};

pub use crate::layers::{
    base::{BaseLayer, LayerKind, LayerOptions, LayerState, LayerTrait},
    collection::LayerCollection,
    image::{ImageLayer, ImageLayerOptions},
    observable::{LayerProperty, ListenerKey, PropertyChange},
    Layer,
};

pub use crate::rendering::{
    context::{DrawCommand, RenderContext},
    renderer::MapRenderer,
};

pub use crate::sources::{
    static_image::StaticImageSource, wms::WmsImageSource, ImageRequest, ImageSource,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Invalid extent: {0}")]
    InvalidExtent(String),
}

/// Error type alias for convenience
pub type Error = MapError;
