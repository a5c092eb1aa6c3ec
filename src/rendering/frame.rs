use crate::{
    core::{
        extent::Extent,
        geo::Size,
        view::{ViewHint, ViewState},
    },
    layers::base::LayerState,
};
use instant::Instant;

/// Everything the renderer needs to know about one frame
#[derive(Debug, Clone)]
pub struct FrameState {
    /// Increases by one per rendered frame
    pub index: u64,
    pub time: Instant,
    pub pixel_ratio: f64,
    pub size: Size,
    pub view_state: ViewState,
    /// Map extent covered by the frame
    pub extent: Extent,
    /// `[animating, interacting]` counters of the view
    pub view_hints: [u32; 2],
    /// Managed layers in render order, followed by overlays in render order
    pub layer_states: Vec<LayerState>,
}

impl FrameState {
    pub fn hint_active(&self, hint: ViewHint) -> bool {
        self.view_hints[hint.index()] > 0
    }

    pub fn is_animating(&self) -> bool {
        self.hint_active(ViewHint::Animating)
    }

    pub fn is_interacting(&self) -> bool {
        self.hint_active(ViewHint::Interacting)
    }
}
