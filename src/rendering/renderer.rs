use crate::{
    layers::{base::LayerState, Layer},
    prelude::{HashMap, HashSet},
    rendering::{context::RenderContext, frame::FrameState, image::ImageLayerRenderer},
    Result,
};

/// Turns a frame state into a render plan.
///
/// Keeps one renderer per layer id so per-layer caches survive between
/// frames; renderers of layers that disappeared are dropped after each frame.
#[derive(Debug, Default)]
pub struct MapRenderer {
    image_renderers: HashMap<String, ImageLayerRenderer>,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a layer takes part in the frame at all
    pub fn is_rendered(frame: &FrameState, state: &LayerState) -> bool {
        if !state.visible_at_resolution(frame.view_state.resolution) || state.opacity <= 0.0 {
            return false;
        }
        state
            .extent
            .map_or(true, |extent| extent.intersects(&frame.extent))
    }

    /// Render `layers`, which must be in the order of `frame.layer_states`,
    /// into `context`
    pub fn render_frame(
        &mut self,
        frame: &FrameState,
        layers: &[&Layer],
        context: &mut RenderContext,
    ) -> Result<()> {
        debug_assert_eq!(frame.layer_states.len(), layers.len());

        for (state, layer) in frame.layer_states.iter().zip(layers) {
            debug_assert_eq!(state.layer_id, layer.id());
            if !Self::is_rendered(frame, state) {
                continue;
            }

            match layer {
                Layer::Image(image) => {
                    let renderer = self
                        .image_renderers
                        .entry(state.layer_id.clone())
                        .or_default();
                    if let Some(prepared) = renderer.prepare_frame(frame, state, image) {
                        context.draw_image(state, prepared.request, prepared.reused)?;
                    }
                }
            }
        }

        let present: HashSet<&str> = layers.iter().map(|layer| layer.id()).collect();
        self.image_renderers
            .retain(|layer_id, _| present.contains(layer_id.as_str()));

        #[cfg(feature = "debug")]
        log::debug!(
            "frame {}: {} of {} layers drawn",
            frame.index,
            context.len(),
            layers.len()
        );

        Ok(())
    }

    /// Drop the cached state of a layer
    pub fn forget(&mut self, layer_id: &str) -> bool {
        self.image_renderers.remove(layer_id).is_some()
    }

    /// Renderer of an image layer, if it has been rendered before
    pub fn image_renderer(&self, layer_id: &str) -> Option<&ImageLayerRenderer> {
        self.image_renderers.get(layer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            extent::Extent,
            geo::{Point, Size},
            view::ViewState,
        },
        layers::{
            base::{LayerOptions, LayerTrait},
            image::{ImageLayer, ImageLayerOptions},
        },
        prelude::Arc,
        sources::{ImageSource, StaticImageSource},
    };
    use instant::Instant;

    fn image_layer(options: LayerOptions) -> Layer {
        let source: Arc<dyn ImageSource> = Arc::new(StaticImageSource::new(
            "https://example.com/a.png",
            Extent::new(0.0, 0.0, 100.0, 100.0),
        ));
        ImageLayer::new(
            ImageLayerOptions::default()
                .with_layer_options(options)
                .with_source(source),
        )
        .into()
    }

    fn frame(layers: &[&Layer], resolution: f64) -> FrameState {
        FrameState {
            index: 1,
            time: Instant::now(),
            pixel_ratio: 1.0,
            size: Size::new(10, 10),
            view_state: ViewState {
                center: Point::new(5.0, 5.0),
                resolution,
                rotation: 0.0,
            },
            extent: Extent::new(0.0, 0.0, 10.0, 10.0),
            view_hints: [0, 0],
            layer_states: layers.iter().map(|layer| layer.layer_state()).collect(),
        }
    }

    #[test]
    fn test_skips_layers_outside_resolution_or_transparent() {
        let visible = image_layer(LayerOptions::default().with_id("visible"));
        let too_coarse = image_layer(
            LayerOptions::default()
                .with_id("coarse")
                .with_resolution_range(0.0, 1.0),
        );
        let transparent = image_layer(LayerOptions::default().with_id("clear").with_opacity(0.0));
        let elsewhere = image_layer(
            LayerOptions::default()
                .with_id("elsewhere")
                .with_extent(Extent::new(50.0, 50.0, 60.0, 60.0)),
        );
        let layers = [&visible, &too_coarse, &transparent, &elsewhere];

        let mut renderer = MapRenderer::new();
        let mut context = RenderContext::default();
        renderer
            .render_frame(&frame(&layers, 1.0), &layers, &mut context)
            .unwrap();

        let drawn: Vec<_> = context
            .get_drawing_queue()
            .iter()
            .map(|command| command.layer_id().to_string())
            .collect();
        assert_eq!(drawn, vec!["visible"]);
        assert!(renderer.image_renderer("visible").is_some());
        assert!(renderer.image_renderer("coarse").is_none());
    }

    #[test]
    fn test_drops_renderers_of_missing_layers() {
        let a = image_layer(LayerOptions::default().with_id("a"));
        let b = image_layer(LayerOptions::default().with_id("b"));
        let mut renderer = MapRenderer::new();
        let mut context = RenderContext::default();

        let both = [&a, &b];
        renderer
            .render_frame(&frame(&both, 1.0), &both, &mut context)
            .unwrap();
        assert!(renderer.image_renderer("b").is_some());

        let only_a = [&a];
        context.begin_frame(Size::new(10, 10), 1.0);
        renderer
            .render_frame(&frame(&only_a, 1.0), &only_a, &mut context)
            .unwrap();
        assert!(renderer.image_renderer("b").is_none());
        assert!(renderer.forget("a"));
        assert!(!renderer.forget("a"));
    }

    #[test]
    fn test_draw_order_follows_states() {
        let mut low = image_layer(LayerOptions::default().with_id("low"));
        if let Some(image) = low.as_image_mut() {
            image.set_z_index(Some(-1));
        }
        let high = image_layer(LayerOptions::default().with_id("high").with_z_index(2));
        let layers = [&low, &high];

        let mut renderer = MapRenderer::new();
        let mut context = RenderContext::default();
        renderer
            .render_frame(&frame(&layers, 1.0), &layers, &mut context)
            .unwrap();

        let z: Vec<_> = context
            .get_drawing_queue()
            .iter()
            .map(|command| match command {
                crate::rendering::context::DrawCommand::Image { z_index, .. } => *z_index,
            })
            .collect();
        assert_eq!(z, vec![-1, 2]);
    }
}
