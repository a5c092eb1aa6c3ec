use crate::{
    core::geo::Size,
    layers::base::LayerState,
    sources::ImageRequest,
    MapError, Result,
};

/// Commands that can be issued to the render context
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Composite an image over the frame
    Image {
        layer_id: String,
        request: ImageRequest,
        opacity: f32,
        z_index: i32,
        /// The image is the layer's last snapshot, kept while the view is
        /// in motion, rather than one requested for this frame
        reused: bool,
    },
}

impl DrawCommand {
    pub fn layer_id(&self) -> &str {
        match self {
            DrawCommand::Image { layer_id, .. } => layer_id,
        }
    }
}

/// Render plan of one frame: draw commands in compositing order
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub size: Size,
    pub pixel_ratio: f64,
    drawing_queue: Vec<DrawCommand>,
}

impl RenderContext {
    pub fn new(size: Size, pixel_ratio: f64) -> Self {
        Self {
            size,
            pixel_ratio,
            drawing_queue: Vec::new(),
        }
    }

    /// Begin a frame
    pub fn begin_frame(&mut self, size: Size, pixel_ratio: f64) {
        self.size = size;
        self.pixel_ratio = pixel_ratio;
        self.drawing_queue.clear();
    }

    /// Queue an image for compositing with the layer's opacity and z-index
    pub fn draw_image(
        &mut self,
        state: &LayerState,
        request: ImageRequest,
        reused: bool,
    ) -> Result<()> {
        if request.extent.is_empty() {
            return Err(MapError::InvalidExtent(format!(
                "image for layer {} covers an empty extent",
                state.layer_id
            )));
        }

        self.drawing_queue.push(DrawCommand::Image {
            layer_id: state.layer_id.clone(),
            request,
            opacity: state.opacity,
            z_index: state.z_index,
            reused,
        });
        Ok(())
    }

    /// Get the current drawing queue
    pub fn get_drawing_queue(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    pub fn len(&self) -> usize {
        self.drawing_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawing_queue.is_empty()
    }
}
