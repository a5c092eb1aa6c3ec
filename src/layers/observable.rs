//! Synchronous property-change notification for layers
//!
//! Listeners are plain closures registered on a layer after it has been
//! constructed. Setters call [`PropertyObservers::notify`] before they
//! return, so a listener always sees the new value in place.

use crate::core::extent::Extent;
use serde::{Deserialize, Serialize};

/// Observable base-layer properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerProperty {
    Opacity,
    Visible,
    Extent,
    ZIndex,
    MinResolution,
    MaxResolution,
    Source,
}

impl std::fmt::Display for LayerProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerProperty::Opacity => write!(f, "opacity"),
            LayerProperty::Visible => write!(f, "visible"),
            LayerProperty::Extent => write!(f, "extent"),
            LayerProperty::ZIndex => write!(f, "z_index"),
            LayerProperty::MinResolution => write!(f, "min_resolution"),
            LayerProperty::MaxResolution => write!(f, "max_resolution"),
            LayerProperty::Source => write!(f, "source"),
        }
    }
}

/// Value a property held before a change
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Opacity(f32),
    Visible(bool),
    Extent(Option<Extent>),
    ZIndex(Option<i32>),
    Resolution(f64),
    /// Sources are shared trait objects; only their presence is reported
    Source { was_set: bool },
}

/// Emitted after a layer property changed
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    pub layer_id: String,
    pub property: LayerProperty,
    pub old: PropertyValue,
}

/// Handle returned when registering a listener, used to unregister it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

/// Property listener callback type
pub type PropertyCallback = Box<dyn Fn(&PropertyChange) + Send + Sync>;

struct Listener {
    key: ListenerKey,
    filter: Option<LayerProperty>,
    callback: PropertyCallback,
}

/// Listener registry owned by each layer
#[derive(Default)]
pub struct PropertyObservers {
    next_key: u64,
    listeners: Vec<Listener>,
}

impl PropertyObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every property
    pub fn on<F>(&mut self, callback: F) -> ListenerKey
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.register(None, Box::new(callback))
    }

    /// Register a listener for a single property
    pub fn on_property<F>(&mut self, property: LayerProperty, callback: F) -> ListenerKey
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.register(Some(property), Box::new(callback))
    }

    fn register(&mut self, filter: Option<LayerProperty>, callback: PropertyCallback) -> ListenerKey {
        let key = ListenerKey(self.next_key);
        self.next_key += 1;
        self.listeners.push(Listener {
            key,
            filter,
            callback,
        });
        key
    }

    /// Unregister a listener; returns whether it was registered
    pub fn un(&mut self, key: ListenerKey) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.key != key);
        self.listeners.len() != before
    }

    /// Call every matching listener, in registration order
    pub fn notify(&self, change: &PropertyChange) {
        for listener in &self.listeners {
            if listener.filter.map_or(true, |p| p == change.property) {
                (listener.callback)(change);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for PropertyObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyObservers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
