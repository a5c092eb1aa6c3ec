//! Macros to reduce boilerplate when dispatching over [`Layer`] variants
//!
//! [`Layer`]: crate::layers::Layer

/// Evaluates `$body` with `$inner` bound to the variant payload of a
/// [`Layer`](crate::layers::Layer), by reference or mutable reference
/// depending on how `$layer` is passed.
///
/// Usage:
/// ```ignore
/// with_layer!(self, layer => layer.base().id())
/// ```
macro_rules! with_layer {
    ($layer:expr, $inner:ident => $body:expr) => {
        match $layer {
            $crate::layers::Layer::Image($inner) => $body,
        }
    };
}

pub(crate) use with_layer;
