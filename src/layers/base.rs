use crate::{
    core::{
        constants::{
            DEFAULT_MAX_RESOLUTION, DEFAULT_MIN_RESOLUTION, DEFAULT_OPACITY, MANAGED_Z_INDEX,
            OVERLAY_Z_INDEX,
        },
        extent::Extent,
    },
    layers::observable::{
        LayerProperty, ListenerKey, PropertyChange, PropertyObservers, PropertyValue,
    },
    prelude::Arc,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Which rendering strategy a layer needs. Fixed when the layer is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Image,
    Tile,
    Vector,
    VectorTile,
    Group,
    Heatmap,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Image => write!(f, "image"),
            LayerKind::Tile => write!(f, "tile"),
            LayerKind::Vector => write!(f, "vector"),
            LayerKind::VectorTile => write!(f, "vector-tile"),
            LayerKind::Group => write!(f, "group"),
            LayerKind::Heatmap => write!(f, "heatmap"),
        }
    }
}

/// How a layer is attached to a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayerAttachment {
    #[default]
    Detached,
    /// Part of the map's layer collection
    Managed,
    /// Attached directly to the map, drawn above every managed layer
    Overlay,
}

/// Options shared by every layer kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerOptions {
    /// Layer id; generated when absent
    pub id: Option<String>,
    /// Opacity (0, 1)
    pub opacity: f32,
    pub visible: bool,
    /// The layer is not rendered outside of this extent
    pub extent: Option<Extent>,
    /// Layers are ordered by z-index, then by position. When absent, 0 is
    /// assumed for managed layers and `i32::MAX` for overlays.
    pub z_index: Option<i32>,
    /// Minimum resolution (inclusive) at which the layer is visible
    pub min_resolution: f64,
    /// Maximum resolution (exclusive) below which the layer is visible;
    /// `null` in JSON when unbounded
    #[serde(with = "crate::core::config::max_resolution")]
    pub max_resolution: f64,
}

impl LayerOptions {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn with_resolution_range(mut self, min_resolution: f64, max_resolution: f64) -> Self {
        self.min_resolution = min_resolution;
        self.max_resolution = max_resolution;
        self
    }
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            id: None,
            opacity: DEFAULT_OPACITY,
            visible: true,
            extent: None,
            z_index: None,
            min_resolution: DEFAULT_MIN_RESOLUTION,
            max_resolution: DEFAULT_MAX_RESOLUTION,
        }
    }
}

/// Per-frame snapshot of a layer's base configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    pub layer_id: String,
    pub kind: LayerKind,
    /// Clamped to [0, 1]
    pub opacity: f32,
    pub visible: bool,
    pub extent: Option<Extent>,
    /// Explicit z-index, or the default for the layer's attachment
    pub z_index: i32,
    pub min_resolution: f64,
    pub max_resolution: f64,
    pub managed: bool,
}

impl LayerState {
    /// Visible and `min_resolution <= resolution < max_resolution`
    pub fn visible_at_resolution(&self, resolution: f64) -> bool {
        self.visible && resolution >= self.min_resolution && resolution < self.max_resolution
    }
}

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

fn generate_layer_id() -> String {
    format!("layer-{}", NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
}

/// Observable configuration every layer kind is built on.
///
/// `S` is the source capability the layer works with, so each kind's
/// [`source`](BaseLayer::source) returns its own source type.
#[derive(Debug)]
pub struct BaseLayer<S: ?Sized> {
    id: String,
    kind: LayerKind,
    opacity: f32,
    visible: bool,
    extent: Option<Extent>,
    z_index: Option<i32>,
    min_resolution: f64,
    max_resolution: f64,
    source: Option<Arc<S>>,
    attachment: LayerAttachment,
    observers: PropertyObservers,
}

impl<S: ?Sized> BaseLayer<S> {
    pub fn new(kind: LayerKind, options: LayerOptions, source: Option<Arc<S>>) -> Self {
        Self {
            id: options.id.unwrap_or_else(generate_layer_id),
            kind,
            opacity: options.opacity,
            visible: options.visible,
            extent: options.extent,
            z_index: options.z_index,
            min_resolution: options.min_resolution,
            max_resolution: options.max_resolution,
            source,
            attachment: LayerAttachment::Detached,
            observers: PropertyObservers::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        if self.opacity != opacity {
            let old = std::mem::replace(&mut self.opacity, opacity);
            self.changed(LayerProperty::Opacity, PropertyValue::Opacity(old));
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            let old = std::mem::replace(&mut self.visible, visible);
            self.changed(LayerProperty::Visible, PropertyValue::Visible(old));
        }
    }

    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    pub fn set_extent(&mut self, extent: Option<Extent>) {
        if self.extent != extent {
            let old = std::mem::replace(&mut self.extent, extent);
            self.changed(LayerProperty::Extent, PropertyValue::Extent(old));
        }
    }

    /// The explicit z-index, if one was set
    pub fn z_index(&self) -> Option<i32> {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: Option<i32>) {
        if self.z_index != z_index {
            let old = std::mem::replace(&mut self.z_index, z_index);
            self.changed(LayerProperty::ZIndex, PropertyValue::ZIndex(old));
        }
    }

    pub fn min_resolution(&self) -> f64 {
        self.min_resolution
    }

    pub fn set_min_resolution(&mut self, min_resolution: f64) {
        if self.min_resolution != min_resolution {
            let old = std::mem::replace(&mut self.min_resolution, min_resolution);
            self.changed(LayerProperty::MinResolution, PropertyValue::Resolution(old));
        }
    }

    pub fn max_resolution(&self) -> f64 {
        self.max_resolution
    }

    pub fn set_max_resolution(&mut self, max_resolution: f64) {
        if self.max_resolution != max_resolution {
            let old = std::mem::replace(&mut self.max_resolution, max_resolution);
            self.changed(LayerProperty::MaxResolution, PropertyValue::Resolution(old));
        }
    }

    pub fn source(&self) -> Option<&Arc<S>> {
        self.source.as_ref()
    }

    /// Replaces the source. Listeners are only told when the new source is
    /// a different object.
    pub fn set_source(&mut self, source: Option<Arc<S>>) {
        let unchanged = match (&self.source, &source) {
            (Some(current), Some(new)) => same_source(current, new),
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            let was_set = std::mem::replace(&mut self.source, source).is_some();
            self.changed(LayerProperty::Source, PropertyValue::Source { was_set });
        }
    }

    pub fn attachment(&self) -> LayerAttachment {
        self.attachment
    }

    pub(crate) fn set_attachment(&mut self, attachment: LayerAttachment) {
        self.attachment = attachment;
    }

    /// Register a listener for changes to any property
    pub fn on_change<F>(&mut self, callback: F) -> ListenerKey
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.observers.on(callback)
    }

    /// Register a listener for changes to one property
    pub fn on_property_change<F>(&mut self, property: LayerProperty, callback: F) -> ListenerKey
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.observers.on_property(property, callback)
    }

    pub fn un(&mut self, key: ListenerKey) -> bool {
        self.observers.un(key)
    }

    fn changed(&self, property: LayerProperty, old: PropertyValue) {
        #[cfg(feature = "debug")]
        log::debug!("layer {} changed {}", self.id, property);

        if self.observers.is_empty() {
            return;
        }
        self.observers.notify(&PropertyChange {
            layer_id: self.id.clone(),
            property,
            old,
        });
    }

    pub fn layer_state(&self) -> LayerState {
        let managed = self.attachment != LayerAttachment::Overlay;
        let default_z_index = if managed {
            MANAGED_Z_INDEX
        } else {
            OVERLAY_Z_INDEX
        };
        LayerState {
            layer_id: self.id.clone(),
            kind: self.kind,
            opacity: self.opacity.clamp(0.0, 1.0),
            visible: self.visible,
            extent: self.extent,
            z_index: self.z_index.unwrap_or(default_z_index),
            min_resolution: self.min_resolution,
            max_resolution: self.max_resolution,
            managed,
        }
    }
}

/// Compares the objects two source handles point at, ignoring vtables
pub(crate) fn same_source<S: ?Sized>(a: &Arc<S>, b: &Arc<S>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Inherited layer API, forwarded to the layer's [`BaseLayer`].
///
/// Implementors only provide `base` and `base_mut`; the associated `Source`
/// narrows [`source`](LayerTrait::source) to the capability the layer kind
/// renders from.
pub trait LayerTrait: Send + Sync {
    type Source: ?Sized + Send + Sync;

    fn base(&self) -> &BaseLayer<Self::Source>;

    fn base_mut(&mut self) -> &mut BaseLayer<Self::Source>;

    fn id(&self) -> &str {
        self.base().id()
    }

    fn kind(&self) -> LayerKind {
        self.base().kind()
    }

    fn opacity(&self) -> f32 {
        self.base().opacity()
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.base_mut().set_opacity(opacity)
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible)
    }

    fn extent(&self) -> Option<Extent> {
        self.base().extent()
    }

    fn set_extent(&mut self, extent: Option<Extent>) {
        self.base_mut().set_extent(extent)
    }

    fn z_index(&self) -> Option<i32> {
        self.base().z_index()
    }

    fn set_z_index(&mut self, z_index: Option<i32>) {
        self.base_mut().set_z_index(z_index)
    }

    fn min_resolution(&self) -> f64 {
        self.base().min_resolution()
    }

    fn set_min_resolution(&mut self, min_resolution: f64) {
        self.base_mut().set_min_resolution(min_resolution)
    }

    fn max_resolution(&self) -> f64 {
        self.base().max_resolution()
    }

    fn set_max_resolution(&mut self, max_resolution: f64) {
        self.base_mut().set_max_resolution(max_resolution)
    }

    fn source(&self) -> Option<&Arc<Self::Source>> {
        self.base().source()
    }

    fn set_source(&mut self, source: Option<Arc<Self::Source>>) {
        self.base_mut().set_source(source)
    }

    fn on_change<F>(&mut self, callback: F) -> ListenerKey
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
        Self: Sized,
    {
        self.base_mut().on_change(callback)
    }

    fn on_property_change<F>(&mut self, property: LayerProperty, callback: F) -> ListenerKey
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
        Self: Sized,
    {
        self.base_mut().on_property_change(property, callback)
    }

    fn un(&mut self, key: ListenerKey) -> bool {
        self.base_mut().un(key)
    }

    fn layer_state(&self) -> LayerState {
        self.base().layer_state()
    }
}

impl<S: ?Sized + Send + Sync> LayerTrait for BaseLayer<S> {
    type Source = S;

    fn base(&self) -> &BaseLayer<S> {
        self
    }

    fn base_mut(&mut self) -> &mut BaseLayer<S> {
        self
    }
}
