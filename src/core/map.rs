use crate::{
    core::{
        config::MapConfig,
        geo::Size,
        view::{View, ViewHint},
    },
    layers::{base::LayerState, collection::LayerCollection, Layer},
    rendering::{context::RenderContext, frame::FrameState, renderer::MapRenderer},
    MapError, Result,
};
use instant::Instant;

/// Owns the view, the layers and the renderer, and produces one render plan
/// per frame.
///
/// Managed layers live in the map's [`LayerCollection`]. Overlays are
/// attached directly, are not part of that collection, and are rendered on
/// top of it.
#[derive(Debug)]
pub struct Map {
    view: View,
    layers: LayerCollection,
    overlays: LayerCollection,
    renderer: MapRenderer,
    context: RenderContext,
    size: Size,
    pixel_ratio: f64,
    frame_index: u64,
}

impl Map {
    pub fn new(config: MapConfig) -> Self {
        Self {
            view: View::new(config.view),
            layers: LayerCollection::new(),
            overlays: LayerCollection::overlays(),
            renderer: MapRenderer::new(),
            context: RenderContext::new(config.size, config.pixel_ratio),
            size: config.size,
            pixel_ratio: config.pixel_ratio,
            frame_index: 0,
        }
    }

    /// Adds a layer on top of the map's layer collection
    pub fn add_layer(&mut self, layer: impl Into<Layer>) -> Result<()> {
        let layer = layer.into();
        self.ensure_unused(layer.id())?;
        self.layers.push(layer)
    }

    /// Inserts a layer at `index` in the map's layer collection
    pub fn insert_layer_at(&mut self, index: usize, layer: impl Into<Layer>) -> Result<()> {
        let layer = layer.into();
        self.ensure_unused(layer.id())?;
        self.layers.insert_at(index, layer)
    }

    /// Attaches a layer directly to the map. It is not managed by the layer
    /// collection and is rendered above every managed layer.
    pub fn add_overlay(&mut self, layer: impl Into<Layer>) -> Result<()> {
        let layer = layer.into();
        self.ensure_unused(layer.id())?;
        self.overlays.push(layer)
    }

    fn ensure_unused(&self, layer_id: &str) -> Result<()> {
        if self.layers.contains(layer_id) || self.overlays.contains(layer_id) {
            return Err(MapError::Layer(format!(
                "layer {} is already attached to this map",
                layer_id
            )));
        }
        Ok(())
    }

    /// Removes a managed layer
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Layer> {
        let layer = self.layers.remove(layer_id)?;
        self.renderer.forget(layer_id);
        Some(layer)
    }

    /// Detaches an overlay layer
    pub fn remove_overlay(&mut self, layer_id: &str) -> Option<Layer> {
        let layer = self.overlays.remove(layer_id)?;
        self.renderer.forget(layer_id);
        Some(layer)
    }

    /// Looks a layer up among managed layers, then overlays
    pub fn layer(&self, layer_id: &str) -> Option<&Layer> {
        self.layers
            .get(layer_id)
            .or_else(|| self.overlays.get(layer_id))
    }

    pub fn layer_mut(&mut self, layer_id: &str) -> Option<&mut Layer> {
        if self.layers.contains(layer_id) {
            self.layers.get_mut(layer_id)
        } else {
            self.overlays.get_mut(layer_id)
        }
    }

    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    pub fn overlays(&self) -> &LayerCollection {
        &self.overlays
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
    }

    /// Convenience for `view_mut().set_hint(..)`
    pub fn set_view_hint(&mut self, hint: ViewHint, delta: i32) -> u32 {
        self.view.set_hint(hint, delta)
    }

    /// Snapshot of the view and every layer for the next frame
    pub fn frame_state(&self) -> FrameState {
        let (layer_states, _) = ordered_layers(&self.layers, &self.overlays);
        self.build_frame_state(layer_states)
    }

    fn build_frame_state(&self, layer_states: Vec<LayerState>) -> FrameState {
        FrameState {
            index: self.frame_index,
            time: Instant::now(),
            pixel_ratio: self.pixel_ratio,
            size: self.size,
            view_state: self.view.state(),
            extent: self.view.calculate_extent(self.size),
            view_hints: self.view.hints(),
            layer_states,
        }
    }

    /// Renders one frame and returns its plan. A map without a size renders
    /// nothing.
    pub fn render_frame(&mut self) -> Result<&RenderContext> {
        self.context.begin_frame(self.size, self.pixel_ratio);
        if self.size.is_empty() {
            return Ok(&self.context);
        }

        let (layer_states, ordered) = ordered_layers(&self.layers, &self.overlays);
        let frame = self.build_frame_state(layer_states);
        self.frame_index += 1;

        self.renderer
            .render_frame(&frame, &ordered, &mut self.context)?;
        Ok(&self.context)
    }

    pub fn renderer(&self) -> &MapRenderer {
        &self.renderer
    }
}

/// Managed layers in render order, then overlays in render order
fn ordered_layers<'a>(
    layers: &'a LayerCollection,
    overlays: &'a LayerCollection,
) -> (Vec<LayerState>, Vec<&'a Layer>) {
    layers.sorted().into_iter().chain(overlays.sorted()).unzip()
}

impl Default for Map {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}
