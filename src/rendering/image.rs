use crate::{
    layers::{
        base::{same_source, LayerState, LayerTrait},
        image::ImageLayer,
    },
    prelude::Arc,
    rendering::frame::FrameState,
    sources::{ImageRequest, ImageSource},
};

/// Image chosen for one layer in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    pub request: ImageRequest,
    pub reused: bool,
}

#[derive(Debug)]
struct Snapshot {
    source: Arc<dyn ImageSource>,
    request: ImageRequest,
}

/// Per-layer renderer state for an [`ImageLayer`]: the last image it
/// rendered.
///
/// While the view animates or is interacted with, the snapshot is reused
/// unless the layer opted into per-frame updates for that kind of change.
#[derive(Debug, Default)]
pub struct ImageLayerRenderer {
    snapshot: Option<Snapshot>,
}

impl ImageLayerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a new image may be requested for this frame
    pub fn refresh_allowed(frame: &FrameState, layer: &ImageLayer) -> bool {
        (!frame.is_animating() || layer.update_while_animating())
            && (!frame.is_interacting() || layer.update_while_interacting())
    }

    /// Pick the image to draw for `layer` in `frame`, or `None` when there
    /// is nothing to draw.
    pub fn prepare_frame(
        &mut self,
        frame: &FrameState,
        state: &LayerState,
        layer: &ImageLayer,
    ) -> Option<PreparedImage> {
        let Some(source) = layer.source() else {
            self.snapshot = None;
            return None;
        };

        if !Self::refresh_allowed(frame, layer) {
            if let Some(snapshot) = &self.snapshot {
                if same_source(&snapshot.source, source) {
                    #[cfg(feature = "debug")]
                    log::debug!(
                        "layer {}: view in motion, reusing snapshot {}",
                        state.layer_id,
                        snapshot.request.url
                    );
                    return Some(PreparedImage {
                        request: snapshot.request.clone(),
                        reused: true,
                    });
                }
            }
        }

        let render_extent = match state.extent {
            Some(layer_extent) => frame.extent.intersection(&layer_extent)?,
            None => frame.extent,
        };

        match source.image(&render_extent, frame.view_state.resolution, frame.pixel_ratio) {
            Some(request) if request.extent.is_empty() => {
                #[cfg(feature = "debug")]
                log::warn!(
                    "layer {}: source returned {} with an empty extent, skipping",
                    state.layer_id,
                    request.url
                );

                self.snapshot = None;
                None
            }
            Some(request) => {
                #[cfg(feature = "debug")]
                log::debug!("layer {}: requesting {}", state.layer_id, request.url);

                self.snapshot = Some(Snapshot {
                    source: source.clone(),
                    request: request.clone(),
                });
                Some(PreparedImage {
                    request,
                    reused: false,
                })
            }
            None => {
                self.snapshot = None;
                None
            }
        }
    }

    /// The request of the last rendered image
    pub fn snapshot(&self) -> Option<&ImageRequest> {
        self.snapshot.as_ref().map(|snapshot| &snapshot.request)
    }
}
