//! Prelude module for common maplayer types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maplayer::prelude::*;`

pub use crate::core::{
    config::MapConfig,
    extent::Extent,
    geo::{Point, Size},
    map::Map,
    view::{View, ViewHint, ViewOptions, ViewState},
};

pub use crate::layers::{
    base::{BaseLayer, LayerAttachment, LayerKind, LayerOptions, LayerState, LayerTrait},
    collection::LayerCollection,
    image::{ImageLayer, ImageLayerOptions},
    observable::{LayerProperty, ListenerKey, PropertyChange, PropertyValue},
    Layer,
};

pub use crate::sources::{
    static_image::StaticImageSource, wms::WmsImageSource, ImageRequest, ImageSource,
};

pub use crate::rendering::{
    context::{DrawCommand, RenderContext},
    frame::FrameState,
    renderer::MapRenderer,
};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
