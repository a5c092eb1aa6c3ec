use crate::{
    layers::{
        base::{LayerAttachment, LayerState},
        Layer,
    },
    MapError, Result,
};

/// Ordered set of layers sharing one attachment (managed or overlay).
///
/// Position is insertion order; render order is by z-index, then position.
#[derive(Debug)]
pub struct LayerCollection {
    layers: Vec<Layer>,
    attachment: LayerAttachment,
}

impl LayerCollection {
    /// Collection of managed layers, as held by a map
    pub fn new() -> Self {
        Self::with_attachment(LayerAttachment::Managed)
    }

    /// Collection of layers attached directly to a map
    pub fn overlays() -> Self {
        Self::with_attachment(LayerAttachment::Overlay)
    }

    fn with_attachment(attachment: LayerAttachment) -> Self {
        Self {
            layers: Vec::new(),
            attachment,
        }
    }

    pub fn attachment(&self) -> LayerAttachment {
        self.attachment
    }

    /// Appends a layer on top of the collection
    pub fn push(&mut self, layer: impl Into<Layer>) -> Result<()> {
        self.insert_at(self.layers.len(), layer)
    }

    /// Inserts a layer at `index`, shifting later layers up
    pub fn insert_at(&mut self, index: usize, layer: impl Into<Layer>) -> Result<()> {
        let mut layer = layer.into();
        if self.contains(layer.id()) {
            return Err(MapError::Layer(format!("duplicate layer id: {}", layer.id())));
        }
        if index > self.layers.len() {
            return Err(MapError::Layer(format!(
                "index {} out of range for {} layers",
                index,
                self.layers.len()
            )));
        }

        layer.set_attachment(self.attachment);
        self.layers.insert(index, layer);
        Ok(())
    }

    /// Removes a layer, returning it detached
    pub fn remove(&mut self, layer_id: &str) -> Option<Layer> {
        let index = self.position(layer_id)?;
        let mut layer = self.layers.remove(index);
        layer.set_attachment(LayerAttachment::Detached);
        Some(layer)
    }

    pub fn get(&self, layer_id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == layer_id)
    }

    pub fn get_mut(&mut self, layer_id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == layer_id)
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.position(layer_id).is_some()
    }

    /// Insertion position of a layer
    pub fn position(&self, layer_id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == layer_id)
    }

    /// Layers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.layers.iter_mut()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.id()).collect()
    }

    /// Layers in render order, paired with their current state
    pub fn sorted(&self) -> Vec<(LayerState, &Layer)> {
        let mut ordered: Vec<_> = self
            .layers
            .iter()
            .map(|layer| (layer.layer_state(), layer))
            .collect();
        // stable: equal z-indices keep insertion order
        ordered.sort_by_key(|(state, _)| state.z_index);
        ordered
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerCollection {
    fn default() -> Self {
        Self::new()
    }
}
