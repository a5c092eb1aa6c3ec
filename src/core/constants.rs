//! Layer and view defaults shared across the crate.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Opacity a layer is created with when none is given.
pub const DEFAULT_OPACITY: f32 = 1.0;

/// Inclusive lower resolution bound of a freshly created layer.
pub const DEFAULT_MIN_RESOLUTION: f64 = 0.0;

/// Exclusive upper resolution bound of a freshly created layer.
pub const DEFAULT_MAX_RESOLUTION: f64 = f64::INFINITY;

/// Z-index assumed for layers in a map's layer collection that don't set one.
pub const MANAGED_Z_INDEX: i32 = 0;

/// Z-index assumed for overlay layers that don't set one. Keeps them above
/// every managed layer.
pub const OVERLAY_Z_INDEX: i32 = i32::MAX;

/// Device pixel ratio used when the map config does not set one.
pub const DEFAULT_PIXEL_RATIO: f64 = 1.0;

/// Resolution (map units per pixel) of a view created without options.
/// Matches zoom level 0 of a 256px Web Mercator tile grid.
pub const DEFAULT_RESOLUTION: f64 = 156_543.033_928_041;

/// How much bigger than the viewport a WMS request is, per axis.
pub const DEFAULT_WMS_RATIO: f64 = 1.5;
