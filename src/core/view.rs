use crate::core::{
    constants::{DEFAULT_MAX_RESOLUTION, DEFAULT_MIN_RESOLUTION, DEFAULT_RESOLUTION},
    extent::Extent,
    geo::{Point, Size},
};
use serde::{Deserialize, Serialize};

/// Continuous view changes the renderer cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewHint {
    /// A programmatic animation (fly-to, animated zoom) is running
    Animating,
    /// The user is changing the view (drag-pan, pinch-zoom, wheel)
    Interacting,
}

impl ViewHint {
    pub(crate) fn index(self) -> usize {
        match self {
            ViewHint::Animating => 0,
            ViewHint::Interacting => 1,
        }
    }
}

/// Options a [`View`] is created from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub center: Point,
    pub resolution: f64,
    /// Rotation in radians, counter-clockwise
    pub rotation: f64,
    pub min_resolution: f64,
    /// `null` in JSON when unbounded
    #[serde(with = "crate::core::config::max_resolution")]
    pub max_resolution: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            center: Point::default(),
            resolution: DEFAULT_RESOLUTION,
            rotation: 0.0,
            min_resolution: DEFAULT_MIN_RESOLUTION,
            max_resolution: DEFAULT_MAX_RESOLUTION,
        }
    }
}

/// Snapshot of the view taken for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center: Point,
    pub resolution: f64,
    pub rotation: f64,
}

/// Center, resolution and rotation of the map, plus the hints telling the
/// renderer whether the view is in motion
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    center: Point,
    resolution: f64,
    rotation: f64,
    min_resolution: f64,
    max_resolution: f64,
    hints: [u32; 2],
}

impl View {
    pub fn new(options: ViewOptions) -> Self {
        let mut view = Self {
            center: options.center,
            resolution: options.resolution,
            rotation: options.rotation,
            min_resolution: options.min_resolution,
            max_resolution: options.max_resolution,
            hints: [0; 2],
        };
        view.resolution = view.constrain_resolution(options.resolution);
        view
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Sets the resolution, clamping to the view's limits
    pub fn set_resolution(&mut self, resolution: f64) {
        self.resolution = self.constrain_resolution(resolution);
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn resolution_limits(&self) -> (f64, f64) {
        (self.min_resolution, self.max_resolution)
    }

    /// Sets the resolution limits and re-clamps the current resolution
    pub fn set_resolution_limits(&mut self, min_resolution: f64, max_resolution: f64) {
        self.min_resolution = min_resolution;
        self.max_resolution = max_resolution;
        self.resolution = self.constrain_resolution(self.resolution);
    }

    fn constrain_resolution(&self, resolution: f64) -> f64 {
        if self.min_resolution <= self.max_resolution {
            resolution.clamp(self.min_resolution, self.max_resolution)
        } else {
            resolution
        }
    }

    /// Adjusts the counter for `hint` by `delta` and returns the new count.
    /// Callers increment when a continuous change starts and decrement when
    /// it ends; the counter never drops below zero.
    pub fn set_hint(&mut self, hint: ViewHint, delta: i32) -> u32 {
        let slot = &mut self.hints[hint.index()];
        *slot = (*slot as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32;
        *slot
    }

    pub fn hint(&self, hint: ViewHint) -> u32 {
        self.hints[hint.index()]
    }

    /// Current hint counters as `[animating, interacting]`
    pub fn hints(&self) -> [u32; 2] {
        self.hints
    }

    pub fn is_animating(&self) -> bool {
        self.hint(ViewHint::Animating) > 0
    }

    pub fn is_interacting(&self) -> bool {
        self.hint(ViewHint::Interacting) > 0
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            center: self.center,
            resolution: self.resolution,
            rotation: self.rotation,
        }
    }

    /// Extent covered by a map of `size` pixels, enlarged to the bounding
    /// box of the rotated viewport
    pub fn calculate_extent(&self, size: Size) -> Extent {
        let dx = self.resolution * size.width as f64 / 2.0;
        let dy = self.resolution * size.height as f64 / 2.0;
        let corners = [
            Point::new(-dx, -dy),
            Point::new(-dx, dy),
            Point::new(dx, -dy),
            Point::new(dx, dy),
        ]
        .map(|corner| corner.rotate(self.rotation).add(&self.center));
        Extent::bounding(&corners)
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(ViewOptions::default())
    }
}
